//! Translation resolution, fallback and orchestration.
//!
//! The Translator struct provides the user-facing API: locale selection,
//! key lookup, pluralization and interpolation.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use bon::Builder;
use tracing::debug;

use crate::interpreter::catalog::Catalog;
use crate::interpreter::error::{InterpolationError, TranslateError};
use crate::interpreter::interpolate::render;
use crate::interpreter::plural::{PluralizerRegistry, language_of};
use crate::parser::{Template, parse_template};
use crate::types::options::{IGNORE_MISSING, LOCALE};
use crate::types::{Key, Node, Options};

/// Namespace every key is rooted under unless it already starts with it.
pub const ROOT_NAMESPACE: &str = "js";

/// Built-in default locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Locale tried last when fallbacks are enabled.
pub const LAST_RESORT_LOCALE: &str = "en";

/// What `translate` returns when no translation is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingBehaviour {
    /// A bracketed diagnostic marker such as `[en.user.name]`.
    #[default]
    Message,

    /// A humanized guess from the last key segment (`user_name` → `user name`),
    /// prefixed with the configured missing-translation prefix.
    Guess,
}

/// Translator settings.
///
/// # Example
///
/// ```
/// use tolk::TranslatorConfig;
///
/// let config = TranslatorConfig::builder()
///     .locale("de")
///     .fallback_locale("fr")
///     .build();
///
/// assert_eq!(config.locale, "de");
/// assert_eq!(config.default_locale, "en");
/// assert!(config.fallbacks);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct TranslatorConfig {
    /// Current locale code.
    #[builder(into, default = DEFAULT_LOCALE.to_string())]
    pub locale: String,

    /// Default locale, tried after the fallback locale.
    #[builder(into, default = DEFAULT_LOCALE.to_string())]
    pub default_locale: String,

    /// Locale tried first when the active locale misses.
    #[builder(into)]
    pub fallback_locale: Option<String>,

    /// Whether missing translations fall back to other locales.
    #[builder(default = true)]
    pub fallbacks: bool,

    /// Key segment separator.
    #[builder(into, default = ".".to_string())]
    pub separator: String,

    /// What to return for missing translations.
    #[builder(default)]
    pub missing_behaviour: MissingBehaviour,

    /// Prefix for guessed translations.
    #[builder(into, default)]
    pub missing_translation_prefix: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig::builder().build()
    }
}

/// The result of a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// A node of the locale tree (or extras tree).
    Node(&'a Node),

    /// The caller's `defaultValue`, returned verbatim.
    Default(String),
}

/// Anything that can turn a key and options into display text.
pub trait Translate {
    /// Translate a key, degrading to a diagnostic string on failure.
    fn translate_key(&self, key: &Key, options: &Options) -> String;
}

/// Translates keys against a [`Catalog`].
///
/// A translator holds the catalog, the locale settings and the pluralizer
/// registry. Catalog and registry are read-only after construction; locale
/// settings change through explicit setters.
///
/// # Example
///
/// ```
/// use tolk::{Catalog, Translator, options};
///
/// let catalog = Catalog::from_json_str(r#"{
///     "en": { "js": { "greeting": { "one": "Hi {{name}}", "other": "Hi {{name}}s" } } }
/// }"#).unwrap();
/// let translator = Translator::builder().catalog(catalog).build();
///
/// assert_eq!(translator.translate("greeting", &options! { "count" => 1, "name" => "Al" }), "Hi Al");
/// assert_eq!(translator.translate("greeting", &options! { "count" => 3, "name" => "Al" }), "Hi Als");
/// assert_eq!(translator.translate("nope", &options! {}), "[en.nope]");
/// ```
#[derive(Builder)]
pub struct Translator {
    /// Locale tree and extras tree.
    #[builder(default)]
    catalog: Catalog,

    /// Locale settings.
    #[builder(default)]
    config: TranslatorConfig,

    /// Per-locale pluralizers.
    #[builder(default)]
    pluralizers: PluralizerRegistry,

    /// Cache of parsed template ASTs keyed by template source.
    #[builder(skip)]
    template_cache: Mutex<HashMap<String, Template>>,
}

impl Default for Translator {
    fn default() -> Self {
        Translator::builder().build()
    }
}

impl Translator {
    /// Create a translator over a catalog with default settings.
    pub fn new(catalog: Catalog) -> Self {
        Translator::builder().catalog(catalog).build()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// The current locale code.
    pub fn locale(&self) -> &str {
        &self.config.locale
    }

    /// Change the current locale.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.config.locale = locale.into();
    }

    /// The configured fallback locale, if any.
    pub fn fallback_locale(&self) -> Option<&str> {
        self.config.fallback_locale.as_deref()
    }

    /// Set or clear the fallback locale.
    pub fn set_fallback_locale(&mut self, locale: Option<impl Into<String>>) {
        self.config.fallback_locale = locale.map(Into::into);
    }

    /// Enable or disable cross-locale fallback.
    pub fn set_fallbacks(&mut self, enabled: bool) {
        self.config.fallbacks = enabled;
    }

    /// Change what missing translations render as.
    pub fn set_missing_behaviour(&mut self, behaviour: MissingBehaviour) {
        self.config.missing_behaviour = behaviour;
    }

    /// The translator settings.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// The catalog being translated against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the catalog and drop the templates cached from the old one.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.clear_template_cache();
    }

    /// The pluralizer registry (mutable) for registering custom pluralizers.
    pub fn pluralizers_mut(&mut self) -> &mut PluralizerRegistry {
        &mut self.pluralizers
    }

    /// The locale a call resolves in: the `locale` option, then the current
    /// locale, then the default locale.
    pub fn active_locale<'a>(&'a self, options: &'a Options) -> &'a str {
        [
            options.locale(),
            Some(self.config.locale.as_str()),
            Some(self.config.default_locale.as_str()),
        ]
        .into_iter()
        .flatten()
        .find(|locale| !locale.is_empty())
        .unwrap_or(DEFAULT_LOCALE)
    }

    /// Every message key of the current locale, without the root namespace.
    pub fn keys(&self) -> Vec<String> {
        self.catalog
            .keys(self.locale(), ROOT_NAMESPACE, &self.config.separator)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Look up the node for a key in the active locale.
    ///
    /// The `scope` option is prepended to the key, and the path is rooted
    /// under the `js` namespace. The extras tree is tried when the main tree
    /// misses. If neither has the key and `defaultValue` is set, it is
    /// returned verbatim.
    pub fn lookup(&self, key: impl Into<Key>, options: &Options) -> Option<Resolved<'_>> {
        let full_key = self.full_key(&key.into(), options);
        self.lookup_full(&full_key, options)
    }

    fn lookup_full(&self, full_key: &str, options: &Options) -> Option<Resolved<'_>> {
        let locale = self.active_locale(options);
        let segments = self.segments(full_key);
        self.resolve_in(locale, &segments)
            .map(Resolved::Node)
            .or_else(|| options.default_value().map(Resolved::Default))
    }

    fn resolve_in(&self, locale: &str, segments: &[&str]) -> Option<&Node> {
        self.catalog
            .locale(locale)
            .and_then(|root| root.walk(segments))
            .or_else(|| {
                self.catalog
                    .extras(locale)
                    .and_then(|root| root.walk(segments))
            })
    }

    /// Join the `scope` option and the key into one delimited path.
    fn full_key(&self, key: &Key, options: &Options) -> String {
        let separator = &self.config.separator;
        let key = key.join(separator);
        match options.scope() {
            Some(scope) if !scope.is_empty() => format!("{scope}{separator}{key}"),
            _ => key,
        }
    }

    /// Split a full key into segments rooted under the namespace.
    fn segments<'k>(&self, full_key: &'k str) -> Vec<&'k str> {
        let mut segments: Vec<&str> = full_key.split(self.config.separator.as_str()).collect();
        if segments.first() != Some(&ROOT_NAMESPACE) {
            segments.insert(0, ROOT_NAMESPACE);
        }
        segments
    }

    /// The locales to try for a call, in order, without duplicates.
    pub fn locale_chain(&self, active: &str) -> Vec<String> {
        let mut candidates = vec![active];
        if self.config.fallbacks {
            candidates.extend(self.config.fallback_locale.as_deref());
            candidates.push(&self.config.default_locale);
            candidates.push(LAST_RESORT_LOCALE);
        }

        let mut chain: Vec<String> = Vec::new();
        let mut push = |locale: &str| {
            if !locale.is_empty() && !chain.iter().any(|existing| existing == locale) {
                chain.push(locale.to_string());
            }
        };
        for locale in candidates {
            push(locale);
            if self.config.fallbacks {
                push(language_of(locale));
            }
        }
        chain
    }

    // =========================================================================
    // Pluralization
    // =========================================================================

    /// Select the plural variant of `node` for the `count` option.
    ///
    /// A string leaf is returned unchanged. Candidate tags come from the
    /// active locale's pluralizer; the first one present wins. When none is
    /// present, `ignoreMissing` yields `Ok(None)` and otherwise the error
    /// names the first candidate tag. Without a numeric count a mapping is
    /// not a message.
    pub fn pluralize(
        &self,
        node: &Node,
        key: &str,
        options: &Options,
    ) -> Result<Option<String>, TranslateError> {
        if let Some(value) = node.as_value() {
            return Ok(Some(value.to_string()));
        }

        let locale = self.active_locale(options);
        let Some(count) = options.count() else {
            return if options.ignore_missing() {
                Ok(None)
            } else {
                Err(TranslateError::MissingTranslation {
                    locale: locale.to_string(),
                    key: key.to_string(),
                })
            };
        };

        let pluralizer = self.pluralizers.resolve(locale, &self.config.default_locale);
        let tags = pluralizer(locale, count.abs());
        if let Some(text) = tags.iter().find_map(|tag| node.variant(tag)) {
            return Ok(Some(text.to_string()));
        }

        if options.ignore_missing() {
            return Ok(None);
        }
        Err(TranslateError::MissingPluralVariant {
            locale: locale.to_string(),
            key: key.to_string(),
            tag: tags.into_iter().next().unwrap_or_else(|| "other".to_string()),
        })
    }

    // =========================================================================
    // Interpolation
    // =========================================================================

    /// Interpolate a template with options, reusing cached parses.
    pub fn interpolate(&self, template: &str, options: &Options) -> Result<String, InterpolationError> {
        if !template.contains(['{', '%']) {
            return Ok(template.to_string());
        }
        let parsed = self.cached_template(template)?;
        Ok(render(&parsed, options))
    }

    /// Clear the template cache.
    pub fn clear_template_cache(&self) {
        self.template_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Return the number of cached template ASTs.
    pub fn template_cache_len(&self) -> usize {
        self.template_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Look up or parse and cache a template string.
    fn cached_template(&self, template: &str) -> Result<Template, InterpolationError> {
        let mut cache = self
            .template_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(parsed) = cache.get(template) {
            return Ok(parsed.clone());
        }
        let parsed = parse_template(template)?;
        cache.insert(template.to_string(), parsed.clone());
        Ok(parsed)
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate a key, returning a diagnostic string on failure.
    ///
    /// Never panics: missing keys, missing plural variants and malformed
    /// templates all produce a visible marker (or a guess, depending on
    /// [`MissingBehaviour`]).
    pub fn translate(&self, key: impl Into<Key>, options: &Options) -> String {
        match self.try_translate(key, options) {
            Ok(text) => text,
            Err(error) => {
                debug!(%error, "translation missing");
                self.missing_message(&error)
            }
        }
    }

    /// Translate a key, returning the failing stage's error.
    ///
    /// Each locale in [`locale_chain`](Translator::locale_chain) gets a fresh
    /// resolve. All attempts but the last run with `ignoreMissing` forced on,
    /// so only the last attempt can produce a plural diagnostic. A
    /// `defaultValue` ends the chain at the active locale when that locale
    /// has no entry for the key.
    pub fn try_translate(
        &self,
        key: impl Into<Key>,
        options: &Options,
    ) -> Result<String, TranslateError> {
        let full_key = self.full_key(&key.into(), options);
        let active = self.active_locale(options).to_string();
        let chain = self.locale_chain(&active);
        let last = chain.len().saturating_sub(1);

        for (index, locale) in chain.iter().enumerate() {
            let mut overrides = Options::new().with(LOCALE, locale.as_str());
            if index < last {
                overrides.insert(IGNORE_MISSING, true);
            }
            let attempt = Options::merge([&overrides, options]);

            if let Some(text) = self.translate_once(&full_key, &attempt)? {
                return Ok(text);
            }
            debug!(key = %full_key, %locale, "no translation in locale");
        }

        Err(TranslateError::MissingTranslation {
            locale: active,
            key: full_key,
        })
    }

    /// One resolve, pluralize and interpolate pass in the options' locale.
    fn translate_once(
        &self,
        full_key: &str,
        options: &Options,
    ) -> Result<Option<String>, TranslateError> {
        let template = match self.lookup_full(full_key, options) {
            None => return Ok(None),
            Some(Resolved::Default(text)) => return Ok(Some(text)),
            Some(Resolved::Node(node)) => {
                if options.count().is_some() {
                    self.pluralize(node, full_key, options)?
                } else {
                    node.as_value().map(ToString::to_string)
                }
            }
        };
        let Some(template) = template else {
            return Ok(None);
        };

        self.interpolate(&template, options)
            .map(Some)
            .map_err(|source| TranslateError::Interpolation {
                locale: self.active_locale(options).to_string(),
                key: full_key.to_string(),
                source,
            })
    }

    /// Render a failed translation according to the missing behaviour.
    fn missing_message(&self, error: &TranslateError) -> String {
        match (self.config.missing_behaviour, error) {
            (MissingBehaviour::Guess, TranslateError::MissingTranslation { key, .. }) => {
                let last = key
                    .rsplit(self.config.separator.as_str())
                    .next()
                    .unwrap_or(key);
                format!("{}{}", self.config.missing_translation_prefix, humanize(last))
            }
            _ => error.marker(),
        }
    }
}

impl Translate for Translator {
    fn translate_key(&self, key: &Key, options: &Options) -> String {
        self.translate(key, options)
    }
}

/// Turn a key segment into words: `user_name` and `userName` → `user name`.
pub fn humanize(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut previous_lower = false;
    for c in segment.chars() {
        if c == '_' {
            out.push(' ');
            previous_lower = false;
        } else if c.is_uppercase() && previous_lower {
            out.push(' ');
            out.extend(c.to_lowercase());
            previous_lower = false;
        } else {
            out.push(c);
            previous_lower = c.is_lowercase();
        }
    }
    out
}
