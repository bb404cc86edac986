use std::fmt::{Display, Formatter, Result as FmtResult};

/// A translation key: either a delimited path or an ordered list of segments.
///
/// Segment lists are joined with the translator's separator before lookup,
/// so `Key::from(["user", "name"])` and `Key::from("user.name")` resolve to
/// the same entry under the default separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A delimited path such as `"user.name"`.
    Path(String),

    /// Path segments such as `["user", "name"]`.
    Segments(Vec<String>),
}

impl Key {
    /// Render the key as a single delimited path.
    pub fn join(&self, separator: &str) -> String {
        match self {
            Key::Path(path) => path.clone(),
            Key::Segments(segments) => segments.join(separator),
        }
    }

    /// Whether the key has no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Key::Path(path) => path.is_empty(),
            Key::Segments(segments) => segments.iter().all(String::is_empty),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.join("."))
    }
}

impl From<&str> for Key {
    fn from(path: &str) -> Self {
        Key::Path(path.to_string())
    }
}

impl From<String> for Key {
    fn from(path: String) -> Self {
        Key::Path(path)
    }
}

impl From<&String> for Key {
    fn from(path: &String) -> Self {
        Key::Path(path.clone())
    }
}

impl From<&[&str]> for Key {
    fn from(segments: &[&str]) -> Self {
        Key::Segments(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Key {
    fn from(segments: [&str; N]) -> Self {
        Key::Segments(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<Vec<String>> for Key {
    fn from(segments: Vec<String>) -> Self {
        Key::Segments(segments)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
