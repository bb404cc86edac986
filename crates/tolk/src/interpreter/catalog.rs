//! Locale tree storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::interpreter::LoadError;
use crate::types::Node;

/// Translations for every locale, plus an optional extras tree.
///
/// The main tree maps a locale code to its root [`Node`]. The extras tree is
/// keyed the same way and is consulted within each resolution attempt after
/// the main tree misses.
///
/// # Example
///
/// ```
/// use tolk::Catalog;
///
/// let catalog = Catalog::from_json_str(r#"{
///     "en": { "js": { "hello": "Hello!" } },
///     "de": { "js": { "hello": "Hallo!" } }
/// }"#).unwrap();
///
/// assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["de", "en"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Root node per locale.
    locales: BTreeMap<String, Node>,
    /// Secondary root node per locale.
    extras: BTreeMap<String, Node>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON object keyed by locale.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let mut catalog = Catalog::new();
        catalog.merge_json_str(content)?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut catalog = Catalog::new();
        catalog.merge_file(path)?;
        Ok(catalog)
    }

    /// Merge a JSON object keyed by locale into the main tree.
    ///
    /// Returns the number of locales in the merged document.
    pub fn merge_json_str(&mut self, content: &str) -> Result<usize, LoadError> {
        let parsed = parse_locales(content, None)?;
        Ok(merge_into(&mut self.locales, parsed))
    }

    /// Merge a JSON file keyed by locale into the main tree.
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let parsed = parse_locales(&content, Some(path))?;
        Ok(merge_into(&mut self.locales, parsed))
    }

    /// Merge a JSON object keyed by locale into the extras tree.
    pub fn merge_extras_json_str(&mut self, content: &str) -> Result<usize, LoadError> {
        let parsed = parse_locales(content, None)?;
        Ok(merge_into(&mut self.extras, parsed))
    }

    /// Add (or deep-merge) the root node for a locale.
    pub fn add_locale(&mut self, locale: impl Into<String>, root: Node) {
        merge_into(&mut self.locales, BTreeMap::from([(locale.into(), root)]));
    }

    /// Add (or deep-merge) the extras root node for a locale.
    pub fn add_extras(&mut self, locale: impl Into<String>, root: Node) {
        merge_into(&mut self.extras, BTreeMap::from([(locale.into(), root)]));
    }

    /// Get the root node for a locale.
    pub fn locale(&self, locale: &str) -> Option<&Node> {
        self.locales.get(locale)
    }

    /// Get the extras root node for a locale.
    pub fn extras(&self, locale: &str) -> Option<&Node> {
        self.extras.get(locale)
    }

    /// Whether a locale has a main tree.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locale codes with a main tree, in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Every message key of a locale under the `root` namespace, sorted.
    ///
    /// Keys are joined with `separator` and do not include the namespace.
    pub fn keys(&self, locale: &str, root: &str, separator: &str) -> Vec<String> {
        self.messages(locale, root, separator)
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    }

    /// Every message node of a locale under the `root` namespace, paired
    /// with its key. Sorted by key.
    pub fn messages(&self, locale: &str, root: &str, separator: &str) -> Vec<(String, &Node)> {
        let mut messages = Vec::new();
        if let Some(node) = self.locales.get(locale).and_then(|tree| tree.get(root)) {
            node.messages("", separator, &mut messages);
        }
        messages
    }
}

fn merge_into(target: &mut BTreeMap<String, Node>, incoming: BTreeMap<String, Node>) -> usize {
    let count = incoming.len();
    for (locale, root) in incoming {
        match target.get_mut(&locale) {
            Some(existing) => existing.merge(root),
            None => {
                target.insert(locale, root);
            }
        }
    }
    count
}

fn parse_locales(content: &str, path: Option<&Path>) -> Result<BTreeMap<String, Node>, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse {
        path: path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<string>")),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}
