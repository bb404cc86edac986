//! Message template parser.
//!
//! Templates are plain text with named placeholders written either as
//! `{{name}}` or `%{name}`. The parser produces a [`Template`] AST that the
//! interpolator walks once to build the output string.

pub mod ast;
pub mod error;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use template::parse_template;
