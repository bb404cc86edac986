//! AST types for parsed message templates.

/// A parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Segments in source order. Adjacent literals are merged.
    pub segments: Vec<Segment>,
}

impl Template {
    /// Iterate over the placeholder names in source order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template contains no placeholders.
    pub fn is_literal(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

/// A segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied to the output unchanged.
    Literal(String),

    /// A named placeholder written as `{{name}}` or `%{name}`.
    Placeholder(String),
}
