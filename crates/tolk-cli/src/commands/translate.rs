//! Implementation of the `tolk translate` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tolk::types::options::SCOPE;
use tolk::{compute_suggestions, Options, Translator, TranslatorConfig, Value};
use tracing::debug;

use super::load_catalog;

/// Arguments for the translate command.
#[derive(Debug, clap::Args)]
pub struct TranslateArgs {
    /// Catalog file (JSON keyed by locale)
    #[arg(long, env = "TOLK_CATALOG")]
    pub catalog: PathBuf,

    /// Key to translate, without the `js` root
    #[arg(long)]
    pub key: String,

    /// Locale to translate into
    #[arg(long, env = "TOLK_LOCALE", default_value = "en")]
    pub locale: String,

    /// Locale tried before the default locale
    #[arg(long)]
    pub fallback: Option<String>,

    /// Do not fall back to other locales
    #[arg(long)]
    pub no_fallbacks: bool,

    /// Scope prepended to the key
    #[arg(long)]
    pub scope: Option<String>,

    /// Options in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a successful translation.
#[derive(Serialize)]
struct TranslateResult<'a> {
    key: &'a str,
    locale: &'a str,
    result: String,
}

/// JSON output for a failed translation.
#[derive(Serialize)]
struct TranslateFailure {
    error: String,
    marker: String,
    suggestions: Vec<String>,
}

/// Parse a name=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((name.to_string(), value.to_string()))
}

/// Interpret a parameter value as a boolean, an integer, a float or text.
fn parse_value(raw: &str) -> Value {
    if let Ok(b) = raw.parse::<bool>() {
        Value::from(b)
    } else if let Ok(n) = raw.parse::<i64>() {
        Value::from(n)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::from(f)
    } else {
        Value::from(raw)
    }
}

/// Run the translate command.
pub fn run_translate(args: TranslateArgs) -> miette::Result<i32> {
    let catalog = load_catalog(&args.catalog)?;
    let config = TranslatorConfig::builder()
        .locale(args.locale.as_str())
        .maybe_fallback_locale(args.fallback.as_deref())
        .fallbacks(!args.no_fallbacks)
        .build();
    let translator = Translator::builder().catalog(catalog).config(config).build();

    let mut options: Options = args
        .params
        .iter()
        .map(|(name, raw)| (name.as_str(), parse_value(raw)))
        .collect();
    if let Some(scope) = &args.scope {
        options.insert(SCOPE, scope.as_str());
    }
    debug!(key = %args.key, ?options, "translating");

    match translator.try_translate(args.key.as_str(), &options) {
        Ok(result) => {
            if args.json {
                let output = TranslateResult {
                    key: &args.key,
                    locale: &args.locale,
                    result,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(error) => {
            let suggestions = compute_suggestions(error.key(), &translator.keys());
            if args.json {
                let output = TranslateFailure {
                    error: error.to_string(),
                    marker: error.marker(),
                    suggestions,
                };
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!(
                    "{} {error}",
                    "error:".if_supports_color(Stream::Stderr, |text| text.red())
                );
                if !suggestions.is_empty() {
                    eprintln!("  did you mean: {}", suggestions.join(", "));
                }
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        assert_eq!(
            parse_key_val("name=Al=B"),
            Ok(("name".to_string(), "Al=B".to_string()))
        );
        assert!(parse_key_val("name").is_err());
    }

    #[test]
    fn parameter_values_are_typed() {
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("3"), Value::Number(3));
        assert_eq!(parse_value("2.5"), Value::Float(2.5));
        assert_eq!(parse_value("Al"), Value::String("Al".to_string()));
    }
}
