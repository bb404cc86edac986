use std::collections::BTreeMap;

use super::Value;

/// Option naming the locale to translate into.
pub const LOCALE: &str = "locale";
/// Option naming a delimited scope prepended to the key.
pub const SCOPE: &str = "scope";
/// Option carrying the count used for pluralization.
pub const COUNT: &str = "count";
/// Option carrying a terminal value returned when nothing resolves.
pub const DEFAULT_VALUE: &str = "defaultValue";
/// Option suppressing missing-plural diagnostics.
pub const IGNORE_MISSING: &str = "ignoreMissing";

/// An options bag: named values passed with a translation call.
///
/// Well-known names (`locale`, `scope`, `count`, `defaultValue`,
/// `ignoreMissing`) steer resolution; every entry, well-known or not, is also
/// available to placeholders in the message template.
///
/// # Example
///
/// ```
/// use tolk::{Options, options};
///
/// let explicit = options! { "count" => 2 };
/// let defaults = options! { "count" => 1, "name" => "Al" };
/// let merged = Options::merge([&explicit, &defaults]);
///
/// assert_eq!(merged.count(), Some(2.0));
/// assert_eq!(merged.get("name").and_then(|v| v.as_string()), Some("Al"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<String, Value>,
}

impl Options {
    /// Create an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge several sources, first source wins.
    ///
    /// A name set by an earlier source is never overwritten by a later one.
    pub fn merge<'a>(sources: impl IntoIterator<Item = &'a Options>) -> Options {
        let mut merged = Options::new();
        for source in sources {
            for (name, value) in &source.values {
                merged
                    .values
                    .entry(name.clone())
                    .or_insert_with(|| value.clone());
            }
        }
        merged
    }

    /// Set a value, replacing any existing one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`Options::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get a value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether a name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over all entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `locale` option, if it is a string.
    pub fn locale(&self) -> Option<&str> {
        self.get(LOCALE).and_then(Value::as_string)
    }

    /// The `scope` option, if it is a string.
    pub fn scope(&self) -> Option<&str> {
        self.get(SCOPE).and_then(Value::as_string)
    }

    /// The `count` option, if it is numeric.
    pub fn count(&self) -> Option<f64> {
        self.get(COUNT).and_then(Value::as_number)
    }

    /// The `defaultValue` option rendered as text.
    pub fn default_value(&self) -> Option<String> {
        self.get(DEFAULT_VALUE).map(ToString::to_string)
    }

    /// The `ignoreMissing` option; absent means `false`.
    pub fn ignore_missing(&self) -> bool {
        self.get(IGNORE_MISSING)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Options {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
