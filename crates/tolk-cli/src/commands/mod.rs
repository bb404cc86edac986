//! CLI command implementations.

mod check;
mod coverage;
mod translate;

use std::fs::read_to_string;
use std::path::Path;

use miette::{miette, Result};
use tolk::Catalog;

use crate::output::CatalogDiagnostic;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use translate::{run_translate, TranslateArgs};

/// Read and parse a catalog file, turning parse errors into source-annotated
/// diagnostics.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read catalog file {}: {}", path.display(), e))?;
    Catalog::from_json_str(&content)
        .map_err(|e| CatalogDiagnostic::from_load_error(path, &content, &e).into())
}
