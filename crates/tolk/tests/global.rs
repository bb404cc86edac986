#![cfg(feature = "global")]

//! Integration tests for the `global` feature.
//!
//! The global translator is process-wide, so every test that mutates it
//! holds the same lock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tolk::{Catalog, NumberOptions, options};

static LOCK: Mutex<()> = Mutex::new(());

fn setup() -> MutexGuard<'static, ()> {
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let catalog = Catalog::from_json_str(
        r#"{
            "en": { "js": { "hello": "Hello!", "cards": { "one": "card", "other": "cards" } } },
            "de": { "js": { "hello": "Hallo!" } }
        }"#,
    )
    .unwrap();
    tolk::load_catalog(catalog);
    tolk::set_locale("en");
    tolk::set_fallback_locale(None::<String>);
    tolk::set_fallbacks(true);
    tolk::set_verbose(false);
    guard
}

#[test]
fn translate_with_current_locale() {
    let _guard = setup();
    assert_eq!(tolk::translate("hello", &options! {}), "Hello!");
    tolk::set_locale("de");
    assert_eq!(tolk::locale(), "de");
    assert_eq!(tolk::translate("hello", &options! {}), "Hallo!");
}

#[test]
fn fallback_settings_apply_globally() {
    let _guard = setup();
    tolk::set_locale("de");
    assert_eq!(tolk::translate("cards", &options! { "count" => 2 }), "cards");
    tolk::set_fallbacks(false);
    assert_eq!(tolk::translate("cards", &options! { "count" => 2 }), "[de.cards]");
}

#[test]
fn verbose_mode_records_keys() {
    let _guard = setup();
    tolk::with_translator(|translator| translator.reset());
    tolk::set_verbose(true);
    tolk::translate("hello", &options! {});
    let seen = tolk::with_translator(|translator| translator.seen_keys());
    assert_eq!(seen, vec!["hello".to_string()]);
}

#[test]
fn formatting_helpers_use_global_translator() {
    let _guard = setup();
    assert_eq!(tolk::to_number(1234.5, &NumberOptions::default()), "1,234.500");
    assert_eq!(tolk::to_human_size(2048.0, &NumberOptions::default()), "2KB");
}
