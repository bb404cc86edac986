//! Error types for loading and translating.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur while loading a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a catalog file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON syntax or shape error with location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
}

/// An error produced while interpolating a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// The template could not be parsed.
    #[error("malformed template: {0}")]
    Parse(#[from] ParseError),
}

/// An error produced by one stage of a translation.
///
/// Every variant has a diagnostic [`marker`](TranslateError::marker) that
/// [`Translator::translate`](crate::Translator::translate) returns in place
/// of the missing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// No locale attempt resolved the key to a message.
    #[error("missing translation for '{key}' in locale '{locale}'")]
    MissingTranslation { locale: String, key: String },

    /// The key resolved to plural variants but none of the candidate tags
    /// were present.
    #[error("missing plural variant '{tag}' for '{key}' in locale '{locale}'")]
    MissingPluralVariant {
        locale: String,
        key: String,
        tag: String,
    },

    /// The resolved template could not be interpolated.
    #[error("failed to interpolate '{key}' in locale '{locale}': {source}")]
    Interpolation {
        locale: String,
        key: String,
        #[source]
        source: InterpolationError,
    },
}

impl TranslateError {
    /// The locale the failing translation was requested in.
    pub fn locale(&self) -> &str {
        match self {
            TranslateError::MissingTranslation { locale, .. }
            | TranslateError::MissingPluralVariant { locale, .. }
            | TranslateError::Interpolation { locale, .. } => locale,
        }
    }

    /// The full key (scope included, root namespace excluded).
    pub fn key(&self) -> &str {
        match self {
            TranslateError::MissingTranslation { key, .. }
            | TranslateError::MissingPluralVariant { key, .. }
            | TranslateError::Interpolation { key, .. } => key,
        }
    }

    /// The visible diagnostic string for this error.
    ///
    /// `[locale.key]`, or `[locale.key.tag]` for a missing plural variant.
    pub fn marker(&self) -> String {
        match self {
            TranslateError::MissingPluralVariant { locale, key, tag } => {
                format!("[{locale}.{key}.{tag}]")
            }
            TranslateError::MissingTranslation { locale, key }
            | TranslateError::Interpolation { locale, key, .. } => format!("[{locale}.{key}]"),
        }
    }
}
