//! Integration tests for template parsing and placeholder interpolation.

use tolk::parser::{Segment, parse_template};
use tolk::{interpolate, options};

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_pure_literal() {
    let t = parse_template("Hello, world!").unwrap();
    assert_eq!(t.segments, vec![Segment::Literal("Hello, world!".into())]);
    assert!(t.is_literal());
}

#[test]
fn test_empty_string() {
    let t = parse_template("").unwrap();
    assert_eq!(t.segments, vec![]);
}

#[test]
fn test_both_placeholder_syntaxes() {
    let t = parse_template("{{greeting}}, %{name}!").unwrap();
    assert_eq!(
        t.segments,
        vec![
            Segment::Placeholder("greeting".into()),
            Segment::Literal(", ".into()),
            Segment::Placeholder("name".into()),
            Segment::Literal("!".into()),
        ]
    );
}

#[test]
fn test_lone_openers_stay_literal() {
    let t = parse_template("100% of {x} and {{y").unwrap();
    assert_eq!(t.segments, vec![Segment::Literal("100% of {x} and {{y".into())]);
}

#[test]
fn test_placeholder_does_not_span_lines() {
    let t = parse_template("{{na\nme}}").unwrap();
    assert_eq!(t.segments, vec![Segment::Literal("{{na\nme}}".into())]);
}

#[test]
fn test_placeholder_names_in_order() {
    let t = parse_template("{{a}} {{b}} %{a}").unwrap();
    assert_eq!(t.placeholders().collect::<Vec<_>>(), vec!["a", "b", "a"]);
}

// =============================================================================
// Closers and empty names
// =============================================================================

#[test]
fn test_either_opener_accepts_one_or_two_closing_braces() {
    for input in ["{{name}}", "{{name}", "%{name}", "%{name}}"] {
        let t = parse_template(input).unwrap();
        assert_eq!(t.segments, vec![Segment::Placeholder("name".into())], "{input}");
    }
}

#[test]
fn test_closer_ends_at_first_brace() {
    let t = parse_template("{{a}}}").unwrap();
    assert_eq!(
        t.segments,
        vec![Segment::Placeholder("a".into()), Segment::Literal("}".into())]
    );
}

#[test]
fn test_empty_name_is_a_placeholder() {
    let t = parse_template("Hello {{}} and\nb %{}").unwrap();
    assert_eq!(t.placeholders().collect::<Vec<_>>(), vec!["", ""]);
}

#[test]
fn test_any_input_parses() {
    let inputs = ["{", "%", "{{", "%{", "}}", "{{}", "%{}}}", "{%{{%{", "\u{1F600}{{\u{e9}}}"];
    for input in inputs {
        assert!(parse_template(input).is_ok(), "{input:?}");
    }
}

// =============================================================================
// Interpolation
// =============================================================================

#[test]
fn test_interpolates_named_values() {
    let text = interpolate("Hello {{name}}", &options! { "name" => "Al" }).unwrap();
    assert_eq!(text, "Hello Al");
}

#[test]
fn test_missing_value_marker() {
    let text = interpolate("Hello {{name}}", &options! {}).unwrap();
    assert_eq!(text, "Hello [missing {{name}} value]");

    let text = interpolate("Hello %{name}", &options! {}).unwrap();
    assert_eq!(text, "Hello [missing {{name}} value]");
}

#[test]
fn test_dollar_sequences_are_inserted_literally() {
    let value = "$1 $& $$ $'";
    let text = interpolate("Price: {{price}}", &options! { "price" => value }).unwrap();
    assert_eq!(text, "Price: $1 $& $$ $'");
}

#[test]
fn test_template_without_placeholders_is_unchanged() {
    let template = "Nothing to see { here } 50%";
    let text = interpolate(template, &options! { "here" => "x", "count" => 3 }).unwrap();
    assert_eq!(text, template);
}

#[test]
fn test_repeated_placeholder_is_replaced_everywhere() {
    let text = interpolate("{{x}}-{{x}}-%{x}", &options! { "x" => 1 }).unwrap();
    assert_eq!(text, "1-1-1");
}

#[test]
fn test_inserted_values_are_not_rescanned() {
    let options = options! { "a" => "{{b}}", "b" => "B" };
    let text = interpolate("{{a}} {{b}}", &options).unwrap();
    assert_eq!(text, "{{b}} B");
}

#[test]
fn test_scalar_values_use_display_form() {
    let options = options! { "n" => 3, "f" => 2.5, "b" => true };
    let text = interpolate("{{n}} {{f}} {{b}}", &options).unwrap();
    assert_eq!(text, "3 2.5 true");
}

#[test]
fn test_mixed_closers_are_substituted() {
    let options = options! { "name" => "Al" };
    assert_eq!(interpolate("%{name}}", &options).unwrap(), "Al");
    assert_eq!(interpolate("{{name}", &options).unwrap(), "Al");
    assert_eq!(interpolate("<{{name}>", &options).unwrap(), "<Al>");
}

#[test]
fn test_empty_placeholder_gets_missing_marker() {
    let text = interpolate("a {{}} b", &options! {}).unwrap();
    assert_eq!(text, "a [missing {{}} value] b");

    let text = interpolate("a %{} b", &options! {}).unwrap();
    assert_eq!(text, "a [missing {{}} value] b");
}
