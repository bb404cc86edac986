//! First-use logging for translation keys.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::interpreter::translator::Translate;
use crate::types::{Key, Options};

/// Wraps a [`Translate`] implementation and logs the first use of each key.
///
/// Logging is emitted at `info` level on the `tolk::usage` target. Keys are
/// recorded whether or not the wrapped translation succeeds. A disabled
/// wrapper delegates without logging or recording.
///
/// # Example
///
/// ```
/// use tolk::{LoggingTranslator, Translator, options};
///
/// let translator = LoggingTranslator::new(Translator::default());
/// translator.translate("menu.open", &options! {});
/// translator.translate("menu.open", &options! {});
///
/// assert_eq!(translator.seen_keys(), vec!["menu.open".to_string()]);
/// ```
pub struct LoggingTranslator<T> {
    inner: T,
    enabled: bool,
    seen: Mutex<BTreeSet<String>>,
}

impl<T: Translate> LoggingTranslator<T> {
    /// Wrap a translator with logging enabled.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            enabled: true,
            seen: Mutex::new(BTreeSet::new()),
        }
    }

    /// Whether logging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable logging.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The wrapped translator.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The wrapped translator (mutable).
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap, discarding the usage record.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Keys used so far, sorted.
    pub fn seen_keys(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Forget which keys have been used.
    pub fn reset(&self) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Translate a key, logging it if this is its first use.
    pub fn translate(&self, key: impl Into<Key>, options: &Options) -> String {
        self.translate_key(&key.into(), options)
    }

    fn record(&self, key: &Key, options: &Options) {
        let rendered = key.to_string();
        let first_use = self
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(rendered.clone());
        if first_use {
            info!(
                target: "tolk::usage",
                key = %rendered,
                scope = options.scope().unwrap_or_default(),
                locale = options.locale().unwrap_or_default(),
                "first use of translation key"
            );
        }
    }
}

impl<T: Translate> Translate for LoggingTranslator<T> {
    fn translate_key(&self, key: &Key, options: &Options) -> String {
        if self.enabled {
            self.record(key, options);
        }
        self.inner.translate_key(key, options)
    }
}
