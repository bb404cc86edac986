use std::collections::BTreeMap;
use std::mem;

use serde::Deserialize;

use super::Value;

/// CLDR plural category names, in canonical order.
pub const PLURAL_CATEGORIES: &[&str] = &["zero", "one", "two", "few", "many", "other"];

/// A node of a locale tree.
///
/// The variant is decided once, when the tree is built or deserialized, from
/// the shape of the data:
/// - a string, number or boolean becomes a [`Node::Leaf`]
/// - a mapping whose keys are all plural tags (category names or exact counts
///   such as `"0"`), with at least one category name, and whose values are
///   all strings becomes a [`Node::Plural`]
/// - any other mapping becomes a [`Node::Scope`]
///
/// JSON arrays load as scopes keyed by index and `null` members are dropped.
///
/// # Example
///
/// ```
/// use tolk::Node;
///
/// let node: Node = serde_json::from_str(r#"{"one": "card", "other": "cards"}"#).unwrap();
/// assert!(node.is_plural());
/// assert_eq!(node.variant("other"), Some("cards"));
///
/// let node: Node = serde_json::from_str(r#"{"title": "Cards", "one": "card"}"#).unwrap();
/// assert!(!node.is_plural());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub enum Node {
    /// A message template or a scalar configuration value.
    Leaf(Value),

    /// Plural variants keyed by plural tag. Every value is a string leaf.
    Plural(BTreeMap<String, Node>),

    /// A nested scope.
    Scope(BTreeMap<String, Node>),
}

impl Node {
    /// Create a string leaf.
    pub fn text(text: impl Into<String>) -> Node {
        Node::Leaf(Value::String(text.into()))
    }

    /// Create a mapping node from key/child pairs, classifying it by shape.
    ///
    /// ```
    /// use tolk::Node;
    ///
    /// let greeting = Node::map([("one", Node::text("Hi")), ("other", Node::text("Hi all"))]);
    /// assert!(greeting.is_plural());
    ///
    /// let scope = Node::map([("greeting", greeting)]);
    /// assert!(!scope.is_plural());
    /// ```
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Node {
        let children: BTreeMap<String, Node> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Node::classify(children)
    }

    fn classify(children: BTreeMap<String, Node>) -> Node {
        if is_plural_shape(&children) {
            Node::Plural(children)
        } else {
            Node::Scope(children)
        }
    }

    /// Get a child by key. Both scopes and plural mappings have children.
    pub fn get(&self, segment: &str) -> Option<&Node> {
        self.children().and_then(|children| children.get(segment))
    }

    /// Walk a path of segments, returning `None` as soon as a segment is
    /// absent or an intermediate node is a leaf.
    pub fn walk<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Node> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.get(segment.as_ref()))
    }

    /// The children of a mapping node.
    pub fn children(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Leaf(_) => None,
            Node::Plural(children) | Node::Scope(children) => Some(children),
        }
    }

    /// Get the text of a string leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => value.as_string(),
            _ => None,
        }
    }

    /// Get the value of a leaf.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this node holds plural variants.
    pub fn is_plural(&self) -> bool {
        matches!(self, Node::Plural(_))
    }

    /// Get the string stored under a plural tag.
    ///
    /// Scopes are searched too, so a scope that mixes plural tags with other
    /// keys can still be pluralized.
    pub fn variant(&self, tag: &str) -> Option<&str> {
        self.get(tag).and_then(Node::as_text)
    }

    /// Collect every message in this subtree with its dotted path.
    ///
    /// A message is a string leaf or a plural mapping. Paths are joined with
    /// `separator` and prefixed with `prefix`. Map keys that contain the
    /// separator are kept as they are.
    pub fn messages<'a>(
        &'a self,
        prefix: &str,
        separator: &str,
        out: &mut Vec<(String, &'a Node)>,
    ) {
        match self {
            Node::Leaf(Value::String(_)) | Node::Plural(_) => {
                if !prefix.is_empty() {
                    out.push((prefix.to_string(), self));
                }
            }
            Node::Leaf(_) => {}
            Node::Scope(children) => {
                for (key, child) in children {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}{separator}{key}")
                    };
                    child.messages(&path, separator, out);
                }
            }
        }
    }

    /// Deep-merge `other` into this node. Mappings merge key by key and
    /// anything else is replaced by the incoming node.
    pub fn merge(&mut self, other: Node) {
        match (&mut *self, other) {
            (Node::Scope(mine) | Node::Plural(mine), Node::Scope(theirs) | Node::Plural(theirs)) => {
                for (key, child) in theirs {
                    match mine.get_mut(&key) {
                        Some(existing) => existing.merge(child),
                        None => {
                            mine.insert(key, child);
                        }
                    }
                }
            }
            (slot, other) => *slot = other,
        }
        self.reclassify();
    }

    fn reclassify(&mut self) {
        if let Node::Scope(children) | Node::Plural(children) = self {
            let children = mem::take(children);
            *self = Node::classify(children);
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Scope(BTreeMap::new())
    }
}

/// Whether a key names a plural variant: a category name or an exact count.
pub fn is_plural_tag(key: &str) -> bool {
    PLURAL_CATEGORIES.contains(&key) || (!key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
}

fn is_plural_shape(children: &BTreeMap<String, Node>) -> bool {
    let mut has_category = false;
    for (key, child) in children {
        if !is_plural_tag(key) || child.as_text().is_none() {
            return false;
        }
        has_category |= PLURAL_CATEGORIES.contains(&key.as_str());
    }
    has_category
}

/// Untyped shape used while deserializing, before classification.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Null(()),
    Leaf(Value),
    List(Vec<RawNode>),
    Map(BTreeMap<String, RawNode>),
}

impl RawNode {
    fn into_node(self) -> Option<Node> {
        match self {
            RawNode::Null(()) => None,
            RawNode::Leaf(value) => Some(Node::Leaf(value)),
            RawNode::List(items) => {
                let children = items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, item)| item.into_node().map(|node| (index.to_string(), node)))
                    .collect();
                Some(Node::classify(children))
            }
            RawNode::Map(entries) => {
                let children = entries
                    .into_iter()
                    .filter_map(|(key, item)| item.into_node().map(|node| (key, node)))
                    .collect();
                Some(Node::classify(children))
            }
        }
    }
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        raw.into_node().unwrap_or_default()
    }
}
