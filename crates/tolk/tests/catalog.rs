//! Integration tests for catalog loading, tree shape and merging.

use std::fs;

use tolk::{Catalog, LoadError, Node, Translator, Value, options};

// =========================================================================
// Tree shape
// =========================================================================

#[test]
fn mappings_are_classified_by_shape() {
    let catalog = Catalog::from_json_str(
        r#"{ "en": { "js": {
            "cards": { "one": "card", "other": "cards" },
            "exact": { "0": "none", "other": "some" },
            "numbers_only": { "0": "zero", "1": "one" },
            "mixed": { "one": "card", "title": "Cards" },
            "nested": { "one": { "deep": "x" } }
        } } }"#,
    )
    .unwrap();
    let js = catalog.locale("en").and_then(|root| root.get("js")).unwrap();

    assert!(js.get("cards").unwrap().is_plural());
    assert!(js.get("exact").unwrap().is_plural());
    assert!(!js.get("numbers_only").unwrap().is_plural());
    assert!(!js.get("mixed").unwrap().is_plural());
    assert!(!js.get("nested").unwrap().is_plural());
}

#[test]
fn scalar_leaves_keep_their_type() {
    let catalog = Catalog::from_json_str(
        r#"{ "en": { "js": { "format": { "precision": 2, "ratio": 0.5, "strip": true } } } }"#,
    )
    .unwrap();
    let format = catalog
        .locale("en")
        .and_then(|root| root.walk(&["js", "format"]))
        .unwrap();

    assert_eq!(format.get("precision").and_then(Node::as_value), Some(&Value::Number(2)));
    assert_eq!(format.get("ratio").and_then(Node::as_value), Some(&Value::Float(0.5)));
    assert_eq!(format.get("strip").and_then(Node::as_value), Some(&Value::Bool(true)));
}

#[test]
fn arrays_are_indexed_and_nulls_dropped() {
    let catalog = Catalog::from_json_str(
        r#"{ "en": { "js": { "days": ["Mon", "Tue", null, "Thu"], "gone": null } } }"#,
    )
    .unwrap();
    let translator = Translator::new(catalog);

    assert_eq!(translator.translate("days.1", &options! {}), "Tue");
    assert_eq!(translator.translate("days.3", &options! {}), "Thu");
    assert_eq!(translator.translate("days.2", &options! {}), "[en.days.2]");
    assert_eq!(translator.translate("gone", &options! {}), "[en.gone]");
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn locales_are_listed_in_order() {
    let catalog = Catalog::from_json_str(r#"{ "fr": {}, "de": {}, "en": {} }"#).unwrap();
    assert_eq!(catalog.locales().collect::<Vec<_>>(), vec!["de", "en", "fr"]);
    assert!(catalog.has_locale("fr"));
    assert!(!catalog.has_locale("es"));
}

#[test]
fn parse_error_reports_location() {
    let content = "{\n  \"en\": {\n    \"js\": oops\n  }\n}";
    let error = Catalog::from_json_str(content).unwrap_err();
    match error {
        LoadError::Parse { path, line, .. } => {
            assert_eq!(path.to_str(), Some("<string>"));
            assert_eq!(line, 3);
        }
        LoadError::Io { .. } => panic!("expected parse error"),
    }
}

#[test]
fn top_level_must_be_an_object() {
    let error = Catalog::from_json_str("[1, 2]").unwrap_err();
    assert!(matches!(error, LoadError::Parse { .. }));
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("translations.json");
    fs::write(&path, r#"{ "en": { "js": { "hello": "Hello!" } } }"#).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let translator = Translator::new(catalog);
    assert_eq!(translator.translate("hello", &options! {}), "Hello!");
}

#[test]
fn parse_error_in_file_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"en\": ").unwrap();

    let error = Catalog::load(&path).unwrap_err();
    match error {
        LoadError::Parse { path: reported, line, .. } => {
            assert_eq!(reported, path);
            assert_eq!(line, 1);
        }
        LoadError::Io { .. } => panic!("expected parse error"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let error = Catalog::load(&path).unwrap_err();
    assert!(matches!(error, LoadError::Io { .. }));
    assert!(error.to_string().contains("absent.json"));
}

// =========================================================================
// Merging
// =========================================================================

#[test]
fn merge_is_deep() {
    let mut catalog =
        Catalog::from_json_str(r#"{ "en": { "js": { "a": "A", "nested": { "b": "B" } } } }"#)
            .unwrap();
    let merged = catalog
        .merge_json_str(r#"{ "en": { "js": { "nested": { "c": "C" }, "a": "A2" } }, "de": {} }"#)
        .unwrap();
    assert_eq!(merged, 2);

    let translator = Translator::new(catalog);
    assert_eq!(translator.translate("a", &options! {}), "A2");
    assert_eq!(translator.translate("nested.b", &options! {}), "B");
    assert_eq!(translator.translate("nested.c", &options! {}), "C");
}

#[test]
fn merged_mappings_are_reclassified() {
    let mut catalog = Catalog::new();
    catalog.add_locale(
        "en",
        Node::map([("js", Node::map([("cards", Node::map([("title", Node::text("Cards"))]))]))]),
    );
    catalog.add_locale(
        "en",
        Node::map([("js", Node::map([("cards", Node::map([("one", Node::text("card"))]))]))]),
    );
    let cards = catalog
        .locale("en")
        .and_then(|root| root.walk(&["js", "cards"]))
        .unwrap();
    assert!(!cards.is_plural());

    let mut catalog = Catalog::new();
    catalog.add_locale("en", Node::map([("items", Node::map([("one", Node::text("item"))]))]));
    catalog.add_locale("en", Node::map([("items", Node::map([("other", Node::text("items"))]))]));
    let items = catalog.locale("en").and_then(|root| root.get("items")).unwrap();
    assert!(items.is_plural());
}

#[test]
fn keys_are_listed_without_namespace() {
    let catalog = Catalog::from_json_str(
        r#"{ "en": {
            "js": { "b": "B", "a": { "one": "a", "other": "as" }, "c": { "d": "D", "n": 1 } },
            "other": { "ignored": "x" }
        } }"#,
    )
    .unwrap();
    assert_eq!(catalog.keys("en", "js", "."), vec!["a", "b", "c.d"]);
    assert!(catalog.keys("fr", "js", ".").is_empty());
}

#[test]
fn messages_pair_keys_with_nodes() {
    let catalog = Catalog::from_json_str(
        r#"{ "en": { "js": { "a.b": "Dotted", "c": { "one": "c", "other": "cs" } } } }"#,
    )
    .unwrap();
    let messages = catalog.messages("en", "js", ".");
    let keys: Vec<&str> = messages.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["a.b", "c"]);
    assert_eq!(messages[0].1.as_text(), Some("Dotted"));
    assert!(messages[1].1.is_plural());
}
