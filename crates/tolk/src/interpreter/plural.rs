//! Plural tag resolution.
//!
//! A pluralizer maps a count to an ordered list of candidate tags; the
//! dispatcher picks the first tag present in a plural mapping. The built-in
//! pluralizer follows CLDR rules: English has "one" and "other", Russian has
//! "one", "few", "many" and "other", Arabic uses all six categories.
//!
//! Plural rules are cached per thread per locale to avoid re-creating
//! `PluralRules` instances on every call. The cache is initialized lazily
//! on first access within each thread.

use std::cell::RefCell;
use std::collections::HashMap;

use icu_locale_core::Locale as IcuLocale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// Pluralizer function signature.
///
/// Takes:
/// - `locale`: the locale being translated into
/// - `count`: the absolute count
///
/// Returns candidate tags in priority order.
pub type PluralizerFn = fn(locale: &str, count: f64) -> Vec<String>;

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale code.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, Option<PluralRules>)>> = const { RefCell::new(Vec::new()) };
}

/// Registry of per-locale pluralizers.
///
/// Lookup order for a locale: an exact registration, then its language
/// subtag (`pt-BR` uses `pt`), then the default locale's registration, then
/// [`cldr_pluralizer`].
#[derive(Debug, Clone, Default)]
pub struct PluralizerRegistry {
    pluralizers: HashMap<String, PluralizerFn>,
}

impl PluralizerRegistry {
    /// Create an empty registry. Every locale uses [`cldr_pluralizer`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pluralizer for a locale, replacing any previous one.
    pub fn register(&mut self, locale: impl Into<String>, pluralizer: PluralizerFn) {
        self.pluralizers.insert(locale.into(), pluralizer);
    }

    /// Get the pluralizer registered for exactly this locale.
    pub fn get(&self, locale: &str) -> Option<PluralizerFn> {
        self.pluralizers.get(locale).copied()
    }

    /// Check if a pluralizer is registered for a locale.
    pub fn has_pluralizer(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    /// Resolve the pluralizer to use for `locale`.
    pub fn resolve(&self, locale: &str, default_locale: &str) -> PluralizerFn {
        self.get(locale)
            .or_else(|| self.get(language_of(locale)))
            .or_else(|| self.get(default_locale))
            .unwrap_or(cldr_pluralizer)
    }
}

/// The language subtag of a locale code (`"pt-BR"` → `"pt"`).
pub fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Build `PluralRules` for a locale code, if CLDR data covers it.
fn build_rules(locale: &str) -> Option<PluralRules> {
    let parsed: IcuLocale = locale.replace('_', "-").parse().ok()?;
    PluralRules::try_new(parsed.into(), PluralRuleType::Cardinal.into()).ok()
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Get CLDR plural category for a number in a given locale.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other". Locales
/// without CLDR data use English rules.
///
/// # Examples
///
/// ```
/// use tolk::interpreter::plural_category;
///
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
///
/// assert_eq!(plural_category("ru", 1), "one");
/// assert_eq!(plural_category("ru", 2), "few");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(locale: &str, n: i64) -> &'static str {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache.iter().find(|(code, _)| code == locale) {
            return rules
                .as_ref()
                .map_or("other", |rules| category_str(rules.category_for(n)));
        }
        let rules = build_rules(locale).or_else(|| build_rules("en"));
        let category = rules
            .as_ref()
            .map_or("other", |rules| category_str(rules.category_for(n)));
        cache.push((locale.to_string(), rules));
        category
    })
}

/// The built-in pluralizer backed by CLDR data.
///
/// A zero count emits the exact tag `"0"` and then `"zero"` ahead of its
/// CLDR category, so `{"0": ..., "other": ...}` mappings pick the exact
/// entry. Fractional or out-of-range counts emit `"other"`.
///
/// ```
/// use tolk::interpreter::cldr_pluralizer;
///
/// assert_eq!(cldr_pluralizer("en", 0.0), vec!["0", "zero", "other"]);
/// assert_eq!(cldr_pluralizer("en", 1.0), vec!["one"]);
/// assert_eq!(cldr_pluralizer("en", 1.5), vec!["other"]);
/// ```
pub fn cldr_pluralizer(locale: &str, count: f64) -> Vec<String> {
    let count = count.abs();
    if count.fract() != 0.0 || count >= i64::MAX as f64 {
        return vec!["other".to_string()];
    }
    let n = count as i64;

    let mut tags = Vec::with_capacity(3);
    if n == 0 {
        tags.push("0".to_string());
        tags.push("zero".to_string());
    }
    let category = plural_category(locale, n);
    if !tags.iter().any(|tag| tag == category) {
        tags.push(category.to_string());
    }
    tags
}
