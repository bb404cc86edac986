//! Integration tests for the first-use logging decorator.

use std::cell::Cell;

use tolk::{Catalog, Key, LoggingTranslator, Options, Translate, Translator, options};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tolk=debug")
        .with_test_writer()
        .try_init();
}

fn wrapped() -> LoggingTranslator<Translator> {
    let catalog = Catalog::from_json_str(
        r#"{ "en": { "js": { "hello": "Hello {{name}}!", "bye": "Bye!" } } }"#,
    )
    .unwrap();
    LoggingTranslator::new(Translator::new(catalog))
}

/// Counts calls and echoes the key back.
struct Echo {
    calls: Cell<usize>,
}

impl Translate for Echo {
    fn translate_key(&self, key: &Key, _options: &Options) -> String {
        self.calls.set(self.calls.get() + 1);
        format!("<{key}>")
    }
}

#[test]
fn delegates_to_inner_translator() {
    init_tracing();
    let translator = wrapped();
    assert_eq!(
        translator.translate("hello", &options! { "name" => "Al" }),
        "Hello Al!"
    );
    assert_eq!(translator.translate("nope", &options! {}), "[en.nope]");
}

#[test]
fn records_each_key_once() {
    init_tracing();
    let translator = wrapped();
    translator.translate("hello", &options! { "name" => "Al" });
    translator.translate("hello", &options! { "name" => "Bo" });
    translator.translate("bye", &options! {});
    translator.translate(["menu", "open"], &options! {});

    assert_eq!(
        translator.seen_keys(),
        vec!["bye".to_string(), "hello".to_string(), "menu.open".to_string()]
    );
}

#[test]
fn disabled_wrapper_records_nothing() {
    let mut translator = wrapped();
    translator.set_enabled(false);
    assert!(!translator.is_enabled());
    assert_eq!(translator.translate("bye", &options! {}), "Bye!");
    assert!(translator.seen_keys().is_empty());
}

#[test]
fn reset_forgets_seen_keys() {
    let translator = wrapped();
    translator.translate("bye", &options! {});
    translator.reset();
    assert!(translator.seen_keys().is_empty());
}

#[test]
fn wraps_any_translate_implementation() {
    let translator = LoggingTranslator::new(Echo { calls: Cell::new(0) });
    assert_eq!(translator.translate("a.b", &options! {}), "<a.b>");
    assert_eq!(translator.translate("a.b", &options! {}), "<a.b>");

    assert_eq!(translator.seen_keys(), vec!["a.b".to_string()]);
    assert_eq!(translator.into_inner().calls.get(), 2);
}

#[test]
fn inner_translator_stays_configurable() {
    let mut translator = wrapped();
    translator.inner_mut().set_fallbacks(false);
    translator.inner_mut().set_locale("de");
    assert_eq!(translator.inner().locale(), "de");
    assert_eq!(translator.translate("bye", &options! {}), "[de.bye]");
}
