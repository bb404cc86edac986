//! Miette diagnostics for catalog and template errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tolk::LoadError;

/// A miette-compatible diagnostic pointing into a catalog file.
///
/// Fields are read by the miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid catalog: {message}")]
#[diagnostic(code(tolk::catalog))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic from a catalog load error.
    ///
    /// The path inside `err` is ignored in favour of `path`, because
    /// catalogs parsed from memory report a placeholder path.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        match err {
            LoadError::Parse {
                line,
                column,
                message,
                ..
            } => Self::at(path, content, *line, *column, message.clone(), None),
            LoadError::Io { .. } => Self::at(path, content, 1, 1, err.to_string(), None),
        }
    }

    /// Create a diagnostic for a problem in a message template.
    ///
    /// The span covers the start of the catalog, since the template is a
    /// JSON string value whose position the catalog does not keep.
    pub fn from_template_error(path: &Path, content: &str, key: &str, problem: &str) -> Self {
        Self::at(
            path,
            content,
            1,
            1,
            format!("template for '{key}' is malformed: {problem}"),
            Some("placeholders look like {{name}} or %{name}".to_string()),
        )
    }

    fn at(
        path: &Path,
        content: &str,
        line: usize,
        column: usize,
        message: String,
        help: Option<String>,
    ) -> Self {
        // Sum of (line_length + 1) for lines before the error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // miette panics on spans past the end of the source
        let offset = offset.min(content.len());

        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help,
        }
    }
}
