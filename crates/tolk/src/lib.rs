//! Scoped translation lookup with locale fallback, placeholder interpolation
//! and CLDR pluralization.
//!
//! ```
//! use tolk::{Catalog, Translator, options};
//!
//! let catalog = Catalog::from_json_str(r#"{
//!     "en": { "js": { "inbox": { "0": "No messages", "one": "One message", "other": "{{count}} messages" } } }
//! }"#).unwrap();
//! let translator = Translator::new(catalog);
//!
//! assert_eq!(translator.translate("inbox", &options! { "count" => 0 }), "No messages");
//! assert_eq!(translator.translate("inbox", &options! { "count" => 4 }), "4 messages");
//! ```

pub mod formatter;
#[cfg(feature = "global")]
pub mod global;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use formatter::{NumberOptions, format_number};
#[cfg(feature = "global")]
pub use global::{
    load_catalog, locale, set_fallback_locale, set_fallbacks, set_locale, set_verbose,
    to_human_size, to_number, translate, with_translator, with_translator_mut,
};
pub use interpreter::{
    Catalog, InterpolationError, LoadError, LoggingTranslator, MissingBehaviour,
    PluralizerRegistry, Resolved, TranslateError, Translate, Translator, TranslatorConfig,
    compute_suggestions, interpolate,
};
pub use types::{Key, Node, Options, Value};

/// Creates an [`Options`] bag from key-value pairs.
///
/// Values are converted via `Into<Value>`, so you can pass integers, floats,
/// booleans or strings directly.
///
/// # Example
///
/// ```
/// use tolk::options;
///
/// let o = options! { "count" => 3, "name" => "Alice" };
/// assert_eq!(o.len(), 2);
/// assert_eq!(o.count(), Some(3.0));
/// assert_eq!(o.get("name").and_then(|v| v.as_string()), Some("Alice"));
/// ```
#[macro_export]
macro_rules! options {
    {} => {
        $crate::Options::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut options = $crate::Options::new();
            $(
                options.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            options
        }
    };
}
