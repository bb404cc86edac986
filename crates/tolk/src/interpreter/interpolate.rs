//! Placeholder substitution.

use crate::interpreter::InterpolationError;
use crate::parser::{Segment, Template, parse_template};
use crate::types::Options;

/// The text substituted for a placeholder whose value is absent.
///
/// ```
/// use tolk::interpreter::missing_placeholder;
///
/// assert_eq!(missing_placeholder("name"), "[missing {{name}} value]");
/// ```
pub fn missing_placeholder(name: &str) -> String {
    format!("[missing {{{{{name}}}}} value]")
}

/// Interpolate a template string with values from an options bag.
///
/// Both `{{name}}` and `%{name}` are recognized. Values are inserted
/// literally; absent names become [`missing_placeholder`] markers.
///
/// # Example
///
/// ```
/// use tolk::{interpolate, options};
///
/// let text = interpolate("Hello {{name}}, %{count} new", &options! {
///     "name" => "Al",
///     "count" => 3,
/// }).unwrap();
/// assert_eq!(text, "Hello Al, 3 new");
/// ```
pub fn interpolate(template: &str, options: &Options) -> Result<String, InterpolationError> {
    if !template.contains(['{', '%']) {
        return Ok(template.to_string());
    }
    let parsed = parse_template(template)?;
    Ok(render(&parsed, options))
}

/// Render a parsed template.
pub fn render(template: &Template, options: &Options) -> String {
    let mut out = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => match options.get(name) {
                Some(value) => out.push_str(&value.to_string()),
                None => out.push_str(&missing_placeholder(name)),
            },
        }
    }
    out
}
