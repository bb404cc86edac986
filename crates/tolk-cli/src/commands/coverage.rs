//! Coverage command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use tolk::interpreter::ROOT_NAMESPACE;
use tolk::Catalog;

use super::load_catalog;
use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Catalog file (JSON keyed by locale).
    #[arg(long, env = "TOLK_CATALOG")]
    pub catalog: PathBuf,

    /// Locale whose keys are the reference set.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Locales to check (comma-separated). Defaults to every other locale.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any locale is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let catalog = load_catalog(&args.catalog)?;
    if !catalog.has_locale(&args.source) {
        return Err(miette!(
            "Source locale '{}' not found in {}",
            args.source,
            args.catalog.display()
        ));
    }

    let source_count = key_set(&catalog, &args.source).len();

    let targets: Vec<String> = if args.lang.is_empty() {
        catalog
            .locales()
            .filter(|locale| *locale != args.source)
            .map(str::to_string)
            .collect()
    } else {
        args.lang.clone()
    };

    let coverage_data = compute_coverage(&catalog, &args.source, targets);

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{table}");

        for locale_coverage in &coverage_data {
            if !locale_coverage.missing.is_empty() {
                println!("\nMissing in {}:", locale_coverage.locale);
                for key in &locale_coverage.missing {
                    println!("  - {key}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Compare each target locale's message keys against the source locale's.
fn compute_coverage(
    catalog: &Catalog,
    source: &str,
    targets: Vec<String>,
) -> Vec<LocaleCoverage> {
    let source_keys = key_set(catalog, source);
    targets
        .into_iter()
        .map(|locale| {
            let translated = key_set(catalog, &locale);
            let missing: Vec<String> = source_keys.difference(&translated).cloned().collect();
            LocaleCoverage {
                translated: source_keys.len() - missing.len(),
                locale,
                missing,
            }
        })
        .collect()
}

/// Message keys of a locale. Missing locales have no keys.
fn key_set(catalog: &Catalog, locale: &str) -> BTreeSet<String> {
    catalog
        .keys(locale, ROOT_NAMESPACE, ".")
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "en": { "js": { "hello": "Hello", "bye": "Bye", "files": { "one": "file", "other": "files" } } },
        "de": { "js": { "hello": "Hallo", "files": { "one": "Datei", "other": "Dateien" }, "extra": "x" } },
        "fr": { "js": { "hello": "Bonjour", "bye": "Au revoir", "files": { "other": "fichiers" } } }
    }"#;

    #[test]
    fn missing_keys_are_listed_per_locale() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        let coverage = compute_coverage(&catalog, "en", vec!["de".to_string(), "fr".to_string()]);

        assert_eq!(coverage[0].locale, "de");
        assert_eq!(coverage[0].translated, 2);
        assert_eq!(coverage[0].missing, vec!["bye"]);

        assert_eq!(coverage[1].locale, "fr");
        assert_eq!(coverage[1].translated, 3);
        assert!(coverage[1].missing.is_empty());
    }

    #[test]
    fn unknown_target_locale_misses_everything() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        let coverage = compute_coverage(&catalog, "en", vec!["ja".to_string()]);
        assert_eq!(coverage[0].translated, 0);
        assert_eq!(coverage[0].missing, vec!["bye", "files", "hello"]);
    }
}
