//! Implementation of the `tolk check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tolk::interpreter::ROOT_NAMESPACE;
use tolk::parser::parse_template;
use tolk::{Catalog, LoadError, Node};

use crate::output::CatalogDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Catalog files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    locales: Vec<String>,
    keys: usize,
    errors: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::new();
    let mut failed = false;

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette::miette!("Cannot read {}: {}", path.display(), e))?;
        let mut report = FileReport {
            file: path.display().to_string(),
            locales: Vec::new(),
            keys: 0,
            errors: Vec::new(),
        };

        match Catalog::from_json_str(&content) {
            Ok(catalog) => {
                for (key, problem) in template_problems(&catalog, &mut report) {
                    report.errors.push(format!("{key}: {problem}"));
                    if !args.json {
                        let diagnostic =
                            CatalogDiagnostic::from_template_error(path, &content, &key, &problem);
                        eprintln!("{:?}", Report::new(diagnostic));
                    }
                }
            }
            Err(err) => {
                report.errors.push(load_error_message(&err));
                if !args.json {
                    let diagnostic = CatalogDiagnostic::from_load_error(path, &content, &err);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
        }

        failed |= !report.errors.is_empty();
        if !args.json && report.errors.is_empty() {
            println!(
                "{} {} ({} locales, {} keys)",
                "ok".if_supports_color(Stream::Stdout, |text| text.green()),
                report.file,
                report.locales.len(),
                report.keys
            );
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Check every message template of every locale, returning the problems as
/// `locale.key` paired with a description.
fn template_problems(catalog: &Catalog, report: &mut FileReport) -> Vec<(String, String)> {
    let mut problems = Vec::new();
    for locale in catalog.locales() {
        report.locales.push(locale.to_string());
        let messages = catalog.messages(locale, ROOT_NAMESPACE, ".");
        report.keys += messages.len();

        for (key, node) in messages {
            for template in templates(node) {
                if let Some(problem) = template_problem(template) {
                    problems.push((format!("{locale}.{key}"), problem));
                }
            }
        }
    }
    problems
}

/// Describe what is wrong with a template, if anything. Empty placeholder
/// names render as missing-value markers, so they are reported too.
fn template_problem(template: &str) -> Option<String> {
    match parse_template(template) {
        Err(err) => Some(err.to_string()),
        Ok(parsed) if parsed.placeholders().any(str::is_empty) => {
            Some(format!("empty placeholder name in {template:?}"))
        }
        Ok(_) => None,
    }
}

/// The message templates held by a node: the text of a leaf, or every
/// variant of a plural mapping.
fn templates(node: &Node) -> Vec<&str> {
    match node.as_text() {
        Some(text) => vec![text],
        None => node
            .children()
            .map(|children| children.values().filter_map(Node::as_text).collect())
            .unwrap_or_default(),
    }
}

fn load_error_message(err: &LoadError) -> String {
    match err {
        LoadError::Parse {
            line,
            column,
            message,
            ..
        } => format!("{line}:{column}: {message}"),
        LoadError::Io { .. } => err.to_string(),
    }
}
