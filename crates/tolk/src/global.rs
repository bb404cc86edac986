//! Process-wide translator for the `global` feature.
//!
//! Provides thread-safe access to a shared translator, wrapped in a
//! [`LoggingTranslator`] whose logging starts disabled.

use std::sync::{LazyLock, PoisonError, RwLock};

use crate::formatter::NumberOptions;
use crate::interpreter::{Catalog, LoggingTranslator, Translate, Translator};
use crate::types::{Key, Options};

static GLOBAL_TRANSLATOR: LazyLock<RwLock<LoggingTranslator<Translator>>> = LazyLock::new(|| {
    let mut translator = LoggingTranslator::new(Translator::default());
    translator.set_enabled(false);
    RwLock::new(translator)
});

/// Provides read access to the global translator.
pub fn with_translator<T>(f: impl FnOnce(&LoggingTranslator<Translator>) -> T) -> T {
    let guard = GLOBAL_TRANSLATOR
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Provides write access to the global translator.
pub fn with_translator_mut<T>(f: impl FnOnce(&mut LoggingTranslator<Translator>) -> T) -> T {
    let mut guard = GLOBAL_TRANSLATOR
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Replace the global catalog.
pub fn load_catalog(catalog: Catalog) {
    with_translator_mut(|translator| translator.inner_mut().set_catalog(catalog));
}

/// Sets the current locale of the global translator.
pub fn set_locale(locale: impl Into<String>) {
    with_translator_mut(|translator| translator.inner_mut().set_locale(locale));
}

/// Returns the current locale of the global translator.
pub fn locale() -> String {
    with_translator(|translator| translator.inner().locale().to_owned())
}

/// Sets or clears the global fallback locale.
pub fn set_fallback_locale(locale: Option<impl Into<String>>) {
    with_translator_mut(|translator| translator.inner_mut().set_fallback_locale(locale));
}

/// Enables or disables cross-locale fallback.
pub fn set_fallbacks(enabled: bool) {
    with_translator_mut(|translator| translator.inner_mut().set_fallbacks(enabled));
}

/// Enables or disables first-use logging of translation keys.
pub fn set_verbose(enabled: bool) {
    with_translator_mut(|translator| translator.set_enabled(enabled));
}

/// Translate a key with the global translator.
pub fn translate(key: impl Into<Key>, options: &Options) -> String {
    let key = key.into();
    with_translator(|translator| translator.translate_key(&key, options))
}

/// Format a number with the global translator.
pub fn to_number(value: f64, options: &NumberOptions) -> String {
    with_translator(|translator| translator.inner().to_number(value, options))
}

/// Format a byte count with the global translator.
pub fn to_human_size(bytes: f64, options: &NumberOptions) -> String {
    with_translator(|translator| translator.inner().to_human_size(bytes, options))
}
