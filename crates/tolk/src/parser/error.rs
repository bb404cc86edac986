//! Parse error types for message templates.

use thiserror::Error;

/// An error that occurred while parsing a message template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No segment rule matched the remaining input.
    ///
    /// Unmatched openers fall back to literal characters, so the current
    /// grammar accepts every string and this is never returned for it.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
}
