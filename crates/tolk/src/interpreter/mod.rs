//! Translation engine.
//!
//! This module resolves keys against a [`Catalog`], picks plural variants,
//! substitutes placeholders, and walks the locale fallback chain. Failures
//! at every stage are values ([`TranslateError`]) that the orchestration in
//! [`Translator::translate`] turns into visible diagnostic strings.

mod catalog;
mod error;
mod interpolate;
mod logging;
mod plural;
mod suggest;
mod translator;

pub use catalog::Catalog;
pub use error::{InterpolationError, LoadError, TranslateError};
pub use interpolate::{interpolate, missing_placeholder, render};
pub use logging::LoggingTranslator;
pub use plural::{
    PluralizerFn, PluralizerRegistry, cldr_pluralizer, language_of, plural_category,
};
pub use suggest::compute_suggestions;
pub use translator::{
    DEFAULT_LOCALE, LAST_RESORT_LOCALE, MissingBehaviour, ROOT_NAMESPACE, Resolved, Translate,
    Translator, TranslatorConfig, humanize,
};
