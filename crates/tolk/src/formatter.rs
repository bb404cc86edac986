//! Number and byte-size formatting.
//!
//! Every helper merges three option sources, first one wins: the options
//! passed by the caller, the locale tree (for example `number.format`), and
//! built-in defaults.

use bon::Builder;

use crate::interpreter::{Resolved, Translator};
use crate::types::options::{COUNT, DEFAULT_VALUE, LOCALE};
use crate::types::{Node, Options, Value};

const BYTE_BASE: f64 = 1024.0;
const SIZE_UNITS: [&str; 5] = ["byte", "kb", "mb", "gb", "tb"];
const SIZE_UNIT_NAMES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Options for number formatting. Unset fields fall through to the locale
/// tree and then to built-in defaults.
///
/// # Example
///
/// ```
/// use tolk::{NumberOptions, Translator};
///
/// let translator = Translator::default();
/// let options = NumberOptions::builder().precision(2).delimiter(" ").build();
/// assert_eq!(translator.to_number(1234567.891, &options), "1 234 567.89");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct NumberOptions {
    /// Digits after the separator.
    pub precision: Option<usize>,

    /// Decimal mark.
    #[builder(into)]
    pub separator: Option<String>,

    /// Thousands mark.
    #[builder(into)]
    pub delimiter: Option<String>,

    /// Drop trailing zeros after the separator (and the separator itself
    /// when nothing is left).
    pub strip_insignificant_zeros: Option<bool>,

    /// Unit for currency and sizes.
    #[builder(into)]
    pub unit: Option<String>,

    /// Output pattern: `%n` is the number, `%u` the unit.
    #[builder(into)]
    pub format: Option<String>,

    /// Locale whose tree supplies defaults; the translator's locale if unset.
    #[builder(into)]
    pub locale: Option<String>,
}

impl NumberOptions {
    /// Fill unset fields from `fallback`. Fields already set are kept.
    pub fn or(self, fallback: NumberOptions) -> NumberOptions {
        NumberOptions {
            precision: self.precision.or(fallback.precision),
            separator: self.separator.or(fallback.separator),
            delimiter: self.delimiter.or(fallback.delimiter),
            strip_insignificant_zeros: self
                .strip_insignificant_zeros
                .or(fallback.strip_insignificant_zeros),
            unit: self.unit.or(fallback.unit),
            format: self.format.or(fallback.format),
            locale: self.locale.or(fallback.locale),
        }
    }

    /// Read formatting fields from the leaves of a tree node.
    ///
    /// Leaves with an unexpected type are ignored.
    pub fn from_node(node: &Node) -> NumberOptions {
        let text = |name: &str| node.get(name).and_then(Node::as_text).map(str::to_string);
        NumberOptions {
            precision: node
                .get("precision")
                .and_then(Node::as_value)
                .and_then(Value::as_integer)
                .and_then(|p| usize::try_from(p).ok()),
            separator: text("separator"),
            delimiter: text("delimiter"),
            strip_insignificant_zeros: node
                .get("strip_insignificant_zeros")
                .and_then(Node::as_value)
                .and_then(Value::as_bool),
            unit: text("unit"),
            format: text("format"),
            locale: None,
        }
    }

    fn builtin_number() -> NumberOptions {
        NumberOptions {
            precision: Some(3),
            separator: Some(".".to_string()),
            delimiter: Some(",".to_string()),
            strip_insignificant_zeros: Some(false),
            unit: None,
            format: None,
            locale: None,
        }
    }
}

/// Format a number with fixed precision, a decimal separator and a
/// thousands delimiter.
///
/// Rounds half away from zero. Non-finite values are returned as Rust
/// displays them.
///
/// ```
/// use tolk::format_number;
///
/// assert_eq!(format_number(1234.5678, 2, ".", ",", false), "1,234.57");
/// assert_eq!(format_number(-1234.5, 3, ",", ".", true), "-1.234,5");
/// assert_eq!(format_number(12.0, 2, ".", ",", true), "12");
/// ```
pub fn format_number(
    value: f64,
    precision: usize,
    separator: &str,
    delimiter: &str,
    strip_insignificant_zeros: bool,
) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let factor = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = (value * factor).round() / factor;
    let rounded = if scaled.is_finite() { scaled } else { value };

    let fixed = format!("{:.*}", precision, rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = if strip_insignificant_zeros {
        fraction.trim_end_matches('0')
    } else {
        fraction
    };

    let mut out = String::with_capacity(fixed.len() + 8);
    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0');
    if rounded.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(integer, delimiter));
    if !fraction.is_empty() {
        out.push_str(separator);
        out.push_str(fraction);
    }
    out
}

/// Insert `delimiter` between groups of three digits, counting from the right.
fn group_thousands(digits: &str, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return digits.to_string();
    }
    let len = digits.len();
    let mut out = String::with_capacity(len + len.saturating_sub(1) * delimiter.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push_str(delimiter);
        }
        out.push(digit);
    }
    out
}

fn apply_format(format: &str, number: &str, unit: &str) -> String {
    format.replace("%u", unit).replace("%n", number)
}

impl Translator {
    /// Format a number using `number.format` from the locale tree.
    ///
    /// Built-in defaults: precision 3, separator `.`, delimiter `,`, zeros kept.
    pub fn to_number(&self, value: f64, options: &NumberOptions) -> String {
        let resolved = options
            .clone()
            .or(self.tree_number_options("number.format", options))
            .or(NumberOptions::builtin_number());
        self.format_resolved(value, &resolved)
    }

    /// Format an amount of money using `number.currency.format`.
    ///
    /// Built-in defaults: unit `$`, precision 2, format `%u%n`.
    ///
    /// ```
    /// use tolk::{NumberOptions, Translator};
    ///
    /// let translator = Translator::default();
    /// assert_eq!(translator.to_currency(1234.5, &NumberOptions::default()), "$1,234.50");
    /// ```
    pub fn to_currency(&self, value: f64, options: &NumberOptions) -> String {
        let builtin = NumberOptions {
            precision: Some(2),
            unit: Some("$".to_string()),
            format: Some("%u%n".to_string()),
            ..NumberOptions::default()
        };
        let resolved = options
            .clone()
            .or(self.tree_number_options("number.currency.format", options))
            .or(builtin);
        self.formatted_with_unit(value, resolved)
    }

    /// Format a percentage using `number.percentage.format`.
    ///
    /// Built-in defaults: precision 3, no delimiter, format `%n%`.
    pub fn to_percentage(&self, value: f64, options: &NumberOptions) -> String {
        let builtin = NumberOptions {
            precision: Some(3),
            delimiter: Some(String::new()),
            format: Some("%n%".to_string()),
            ..NumberOptions::default()
        };
        let resolved = options
            .clone()
            .or(self.tree_number_options("number.percentage.format", options))
            .or(builtin);
        self.formatted_with_unit(value, resolved)
    }

    /// Format a byte count as a human-readable size.
    ///
    /// Divides by 1024 up to four times. Units come from
    /// `number.human.storage_units.units.<unit>` (bytes are pluralized by the
    /// count), falling back to `Byte`/`Bytes`, `KB`, `MB`, `GB` and `TB`. Byte
    /// counts and whole sizes use precision 0, others 1. The format defaults
    /// to `%n%u`, or `number.human.storage_units.format` from the tree.
    ///
    /// ```
    /// use tolk::{NumberOptions, Translator};
    ///
    /// let translator = Translator::default();
    /// assert_eq!(translator.to_human_size(1024.0, &NumberOptions::default()), "1KB");
    /// assert_eq!(translator.to_human_size(1500.0, &NumberOptions::default()), "1.5KB");
    /// assert_eq!(translator.to_human_size(1.0, &NumberOptions::default()), "1Byte");
    /// ```
    pub fn to_human_size(&self, bytes: f64, options: &NumberOptions) -> String {
        let mut size = bytes;
        let mut iterations = 0;
        while size >= BYTE_BASE && iterations < 4 {
            size /= BYTE_BASE;
            iterations += 1;
        }

        let mut unit_options = Options::new();
        if let Some(locale) = &options.locale {
            unit_options.insert(LOCALE, locale.as_str());
        }
        let precision = if iterations == 0 {
            let count = if size.fract() == 0.0 {
                Value::Number(size as i64)
            } else {
                Value::Float(size)
            };
            let default_unit = if size == 1.0 { "Byte" } else { SIZE_UNIT_NAMES[0] };
            unit_options.insert(COUNT, count);
            unit_options.insert(DEFAULT_VALUE, default_unit);
            0
        } else {
            unit_options.insert(DEFAULT_VALUE, SIZE_UNIT_NAMES[iterations]);
            usize::from(size.fract() != 0.0)
        };
        let unit_key = ["number", "human", "storage_units", "units", SIZE_UNITS[iterations]];
        let unit = self.translate(unit_key, &unit_options);

        let computed = NumberOptions {
            precision: Some(precision),
            delimiter: Some(String::new()),
            unit: Some(unit),
            format: Some("%n%u".to_string()),
            ..NumberOptions::default()
        };
        let storage_format = NumberOptions {
            format: self.tree_number_options("number.human.storage_units", options).format,
            ..NumberOptions::default()
        };
        let resolved = options.clone().or(storage_format).or(computed);
        self.formatted_with_unit(size, resolved)
    }

    fn formatted_with_unit(&self, value: f64, resolved: NumberOptions) -> String {
        let format = resolved.format.clone().unwrap_or_else(|| "%n".to_string());
        let unit = resolved.unit.clone().unwrap_or_default();
        let number = self.to_number(value, &resolved);
        apply_format(&format, &number, &unit)
    }

    fn format_resolved(&self, value: f64, resolved: &NumberOptions) -> String {
        format_number(
            value,
            resolved.precision.unwrap_or(3),
            resolved.separator.as_deref().unwrap_or("."),
            resolved.delimiter.as_deref().unwrap_or(","),
            resolved.strip_insignificant_zeros.unwrap_or(false),
        )
    }

    /// Read number options stored under `key`, walking the locale chain.
    fn tree_number_options(&self, key: &str, options: &NumberOptions) -> NumberOptions {
        let lookup_options = match &options.locale {
            Some(locale) => Options::new().with(LOCALE, locale.as_str()),
            None => Options::new(),
        };
        let active = self.active_locale(&lookup_options).to_string();
        self.locale_chain(&active)
            .into_iter()
            .find_map(|locale| {
                let attempt = Options::new().with(LOCALE, locale);
                match self.lookup(key, &attempt) {
                    Some(Resolved::Node(node)) if node.children().is_some() => {
                        Some(NumberOptions::from_node(node))
                    }
                    _ => None,
                }
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_counts_from_the_right() {
        assert_eq!(group_thousands("1", ","), "1");
        assert_eq!(group_thousands("123", ","), "123");
        assert_eq!(group_thousands("1234", ","), "1,234");
        assert_eq!(group_thousands("1234567", "'"), "1'234'567");
        assert_eq!(group_thousands("1234567", ""), "1234567");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.0001, 2, ".", ",", false), "0.00");
    }
}
