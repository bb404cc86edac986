//! Template string parser using winnow.
//!
//! Handles:
//! - Literal text segments
//! - `{{name}}` placeholders
//! - `%{name}` placeholders
//!
//! A placeholder name runs up to the first `}` and never spans a line break.
//! Either opener may be closed by `}` or `}}`. An empty name is still a
//! placeholder. An opener without any closer is kept as literal text.

use super::ast::*;
use super::error::ParseError;
use winnow::combinator::{alt, delimited, opt};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

/// Parse a template string into an AST.
///
/// # Example
///
/// ```
/// use tolk::parser::{Segment, parse_template};
///
/// let template = parse_template("Hello {{name}}, you have %{count} items").unwrap();
/// let names: Vec<&str> = template.placeholders().collect();
/// assert_eq!(names, vec!["name", "count"]);
/// assert_eq!(template.segments[0], Segment::Literal("Hello ".to_string()));
/// ```
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    let mut segments = Vec::new();

    while !remaining.is_empty() {
        let parsed = segment(&mut remaining).map_err(|e| {
            let (line, column) = calculate_position(input, remaining);
            ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            }
        })?;
        segments.push(parsed);
    }

    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (placeholder, literal run, or a lone opener char).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_run, literal_char)).parse_next(input)
}

/// Parse a placeholder in either syntax. A second closing brace is optional
/// after both openers.
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(alt(("{{", "%{")), placeholder_name, ('}', opt('}')))
        .map(|name: &str| Segment::Placeholder(name.to_string()))
        .parse_next(input)
}

/// Parse a placeholder name: everything up to the first `}` on the same line.
fn placeholder_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., |c: char| c != '}' && c != '\n').parse_next(input)
}

/// Parse a run of text that cannot start a placeholder.
fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., ['{', '%'])
        .map(|text: &str| Segment::Literal(text.to_string()))
        .parse_next(input)
}

/// Parse a single `{` or `%` that did not open a placeholder.
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}
