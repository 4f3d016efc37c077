//! Number formatting: the `number` and `choice` placeholder types.
//!
//! Styles are `integer`, `percent`, `currency` or a decimal pattern such as
//! `#,##0.00`. Rounding is half-even on the exact binary value.

use crate::arg::Number;
use crate::error::{FormatError, FormatResult};
use crate::symbols::{LocaleSymbols, NARROW_NBSP, NBSP};

/// Digit layout shared by every style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: Option<usize>,
}

impl Layout {
    const DEFAULT: Self = Self {
        min_int: 1,
        min_frac: 0,
        max_frac: 3,
        grouping: Some(3),
    };

    const INTEGER: Self = Self {
        min_int: 1,
        min_frac: 0,
        max_frac: 0,
        grouping: Some(3),
    };

    const fn fixed(digits: usize) -> Self {
        Self {
            min_int: 1,
            min_frac: digits,
            max_frac: digits,
            grouping: Some(3),
        }
    }
}

/// A parsed decimal pattern (`#,##0.00`, `0.#`, `'#'0`, `0.0%`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalPattern {
    prefix: String,
    suffix: String,
    layout: Layout,
    multiplier: i64,
}

impl DecimalPattern {
    /// Parses the positive subpattern of `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::NumberPattern`] when the pattern has no digit
    /// placeholder, more than one decimal point, a trailing grouping
    /// separator or an unclosed quote.
    pub fn parse(pattern: &str) -> FormatResult<Self> {
        let invalid = || FormatError::NumberPattern(pattern.to_string());
        let positive = pattern.split(';').next().unwrap_or_default();

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut number = String::new();
        let mut multiplier = 1;
        let mut in_number = false;
        let mut in_quote = false;
        let chars: Vec<char> = positive.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            i += 1;
            let affix = if number.is_empty() { &mut prefix } else { &mut suffix };

            if c == '\'' {
                if chars.get(i) == Some(&'\'') {
                    affix.push('\'');
                    i += 1;
                } else {
                    in_quote = !in_quote;
                    in_number = false;
                }
                continue;
            }
            if in_quote {
                affix.push(c);
                continue;
            }
            if matches!(c, '#' | '0' | ',' | '.') && (in_number || number.is_empty()) {
                in_number = true;
                number.push(c);
                continue;
            }
            in_number = false;
            match c {
                '%' => multiplier = 100,
                '\u{2030}' => multiplier = 1000,
                _ => {}
            }
            affix.push(c);
        }

        if in_quote || !number.contains(['#', '0']) {
            return Err(invalid());
        }

        let mut halves = number.split('.');
        let int_spec = halves.next().unwrap_or_default();
        let frac_spec = halves.next().unwrap_or_default();
        if halves.next().is_some() || frac_spec.contains(',') {
            return Err(invalid());
        }

        let grouping = match int_spec.rfind(',') {
            Some(pos) => {
                let size = int_spec.len() - pos - 1;
                if size == 0 {
                    return Err(invalid());
                }
                Some(size)
            }
            None => None,
        };

        Ok(Self {
            prefix,
            suffix,
            layout: Layout {
                min_int: int_spec.matches('0').count(),
                min_frac: frac_spec.matches('0').count(),
                max_frac: frac_spec.len(),
                grouping,
            },
            multiplier,
        })
    }
}

/// Style of a `number` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberStyle {
    /// Grouping and up to three fraction digits.
    Default,
    /// Rounded to an integer.
    Integer,
    /// Multiplied by 100 with a percent sign.
    Percent,
    /// The locale's currency.
    Currency,
    /// A decimal pattern.
    Pattern(DecimalPattern),
}

impl NumberStyle {
    /// Interprets the style part of a placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::NumberPattern`] for malformed decimal patterns.
    pub fn parse(style: Option<&str>) -> FormatResult<Self> {
        let Some(raw) = style else {
            return Ok(Self::Default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Self::Default),
            "integer" => Ok(Self::Integer),
            "percent" => Ok(Self::Percent),
            "currency" => Ok(Self::Currency),
            _ => DecimalPattern::parse(raw).map(Self::Pattern),
        }
    }
}

/// Formats `value` in `style` with the given locale symbols.
#[must_use]
pub fn format_number(value: Number, style: &NumberStyle, symbols: &LocaleSymbols) -> String {
    match style {
        NumberStyle::Default => signed(digits(value, Layout::DEFAULT, symbols)),
        NumberStyle::Integer => signed(digits(value, Layout::INTEGER, symbols)),
        NumberStyle::Percent => {
            let body = signed(digits(scale(value, 100), Layout::INTEGER, symbols));
            match symbols.percent_separator {
                Some(separator) => format!("{body}{separator}%"),
                None => format!("{body}%"),
            }
        }
        NumberStyle::Currency => {
            let currency = symbols.currency;
            let (negative, body) = digits(value, Layout::fixed(currency.digits), symbols);
            let sign = if negative { "-" } else { "" };
            let space = if currency.spaced { NBSP.to_string() } else { String::new() };
            if currency.prefix {
                format!("{sign}{}{space}{body}", currency.symbol)
            } else {
                format!("{sign}{body}{NBSP}{}", currency.symbol)
            }
        }
        NumberStyle::Pattern(pattern) => {
            let (negative, body) = digits(scale(value, pattern.multiplier), pattern.layout, symbols);
            let currency = symbols.currency.symbol;
            format!(
                "{}{}{body}{}",
                if negative { "-" } else { "" },
                pattern.prefix.replace('\u{a4}', currency),
                pattern.suffix.replace('\u{a4}', currency),
            )
        }
    }
}

/// Default number formatting for `locale` symbols.
#[must_use]
pub fn format_default(value: Number, symbols: &LocaleSymbols) -> String {
    format_number(value, &NumberStyle::Default, symbols)
}

/// Reads a number formatted in `style` with the given locale symbols.
///
/// Grouping separators, no-break spaces and the style's affixes are
/// ignored; percent and per-mille values are divided back.
///
/// # Errors
///
/// Returns [`FormatError::Unparseable`] when digits are missing or mixed
/// with other text.
pub fn parse_number(text: &str, style: &NumberStyle, symbols: &LocaleSymbols) -> FormatResult<Number> {
    let currency = symbols.currency.symbol;
    let mut body = text.trim().to_string();
    let mut multiplier = 1;

    match style {
        NumberStyle::Percent => {
            multiplier = 100;
            body = body.replace('%', "");
        }
        NumberStyle::Currency => body = body.replacen(currency, "", 1),
        NumberStyle::Pattern(pattern) => {
            multiplier = pattern.multiplier;
            for affix in [&pattern.prefix, &pattern.suffix] {
                if !affix.is_empty() {
                    body = body.replacen(&affix.replace('\u{a4}', currency), "", 1);
                }
            }
        }
        NumberStyle::Default | NumberStyle::Integer => {}
    }

    let body: String = body
        .chars()
        .filter(|&c| c != symbols.grouping && !matches!(c, NBSP | NARROW_NBSP | ' '))
        .collect();
    let (negative, magnitude) = body.strip_prefix('-').map_or((false, body.as_str()), |rest| (true, rest));

    let value = match magnitude {
        "NaN" => return Ok(Number::Float(f64::NAN)),
        "\u{221e}" if negative => return Ok(Number::Float(f64::NEG_INFINITY)),
        "\u{221e}" => return Ok(Number::Float(f64::INFINITY)),
        _ => {
            let normalized: String = magnitude
                .chars()
                .map(|c| if c == symbols.decimal { '.' } else { c })
                .collect();
            let well_formed = normalized.bytes().any(|b| b.is_ascii_digit())
                && normalized.bytes().all(|b| b.is_ascii_digit() || b == b'.')
                && normalized.matches('.').count() <= 1;
            if !well_formed {
                return Err(FormatError::unparseable(text, "not a number"));
            }
            read_digits(&normalized, negative)
        }
    };

    Ok(unscale(value, multiplier))
}

fn read_digits(normalized: &str, negative: bool) -> Number {
    let sign = if negative { -1 } else { 1 };
    if !normalized.contains('.') {
        if let Ok(int) = normalized.parse::<i64>() {
            return Number::Int(sign * int);
        }
    }
    let float = normalized.parse::<f64>().unwrap_or(f64::NAN);
    Number::Float(if negative { -float } else { float })
}

#[allow(clippy::cast_precision_loss)]
fn unscale(value: Number, multiplier: i64) -> Number {
    if multiplier == 1 {
        return value;
    }
    match value {
        Number::Int(i) if i % multiplier == 0 => Number::Int(i / multiplier),
        Number::Int(i) => Number::Float(i as f64 / multiplier as f64),
        Number::Float(f) => Number::Float(f / multiplier as f64),
    }
}

fn signed((negative, body): (bool, String)) -> String {
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

#[allow(clippy::cast_precision_loss)]
fn scale(value: Number, multiplier: i64) -> Number {
    match value {
        Number::Int(i) => i
            .checked_mul(multiplier)
            .map_or_else(|| Number::Float(i as f64 * multiplier as f64), Number::Int),
        Number::Float(f) => Number::Float(f * multiplier as f64),
    }
}

/// Renders the absolute value of `value` and reports whether a minus sign
/// is needed.
fn digits(value: Number, layout: Layout, symbols: &LocaleSymbols) -> (bool, String) {
    let (negative, int_part, frac_part) = match value {
        Number::Int(i) => (i < 0, i.unsigned_abs().to_string(), String::new()),
        Number::Float(f) if f.is_nan() => return (false, "NaN".to_string()),
        Number::Float(f) if f.is_infinite() => return (f < 0.0, "\u{221e}".to_string()),
        Number::Float(f) => {
            let rounded = format!("{:.*}", layout.max_frac, f.abs());
            let (int_part, frac_part) = rounded
                .split_once('.')
                .map_or((rounded.as_str(), ""), |(i, f)| (i, f));
            (f < 0.0, int_part.to_string(), frac_part.to_string())
        }
    };

    let mut frac = frac_part;
    while frac.len() > layout.min_frac && frac.ends_with('0') {
        frac.pop();
    }
    while frac.len() < layout.min_frac {
        frac.push('0');
    }

    let mut int = int_part;
    if layout.min_int == 0 && int == "0" && !frac.is_empty() {
        int.clear();
    }
    while int.len() < layout.min_int {
        int.insert(0, '0');
    }

    let is_zero = int.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');

    let mut out = match layout.grouping {
        Some(size) => group(&int, size, symbols.grouping),
        None => int,
    };
    if !frac.is_empty() {
        out.push(symbols.decimal);
        out.push_str(&frac);
    }

    (negative && !is_zero, out)
}

fn group(digits: &str, size: usize, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / size.max(1));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::NARROW_NBSP;
    use msgspec_core::LocaleTag;

    fn symbols(tag: &str) -> LocaleSymbols {
        LocaleSymbols::for_locale(&LocaleTag::parse(tag).unwrap())
    }

    fn fmt(value: impl Into<Number>, style: Option<&str>, tag: &str) -> String {
        format_number(value.into(), &NumberStyle::parse(style).unwrap(), &symbols(tag))
    }

    #[test]
    fn test_default_style() {
        assert_eq!(fmt(1_234_567.891, None, "en-US"), "1,234,567.891");
        assert_eq!(fmt(1234.5, None, "en-GB"), "1,234.5");
        assert_eq!(fmt(-1234, None, "en-US"), "-1,234");
        assert_eq!(fmt(0.1 + 0.2, None, "en-US"), "0.3");
        assert_eq!(fmt(2.0004, None, "en-US"), "2");
        assert_eq!(fmt(-0.0001, None, "en-US"), "0");
        assert_eq!(fmt(42, None, "en-US"), "42");
    }

    #[test]
    fn test_locale_separators() {
        assert_eq!(fmt(1234.5, None, "de-DE"), "1.234,5");
        assert_eq!(fmt(1234.5, None, "fr-FR"), format!("1{NARROW_NBSP}234,5"));
        assert_eq!(fmt(1234.5, None, "de-CH"), "1\u{2019}234.5");
    }

    #[test]
    fn test_integer_rounds_half_even() {
        assert_eq!(fmt(2.5, Some("integer"), "en-US"), "2");
        assert_eq!(fmt(3.5, Some("integer"), "en-US"), "4");
        assert_eq!(fmt(12_345, Some(" INTEGER "), "de-DE"), "12.345");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt(0.256, Some("percent"), "en-US"), "26%");
        assert_eq!(fmt(1, Some("percent"), "en-US"), "100%");
        assert_eq!(fmt(0.5, Some("percent"), "de-DE"), "50\u{a0}%");
    }

    #[test]
    fn test_currency() {
        assert_eq!(fmt(1234.5, Some("currency"), "en-US"), "$1,234.50");
        assert_eq!(fmt(-3, Some("currency"), "en-US"), "-$3.00");
        assert_eq!(fmt(1234, Some("currency"), "ja-JP"), "¥1,234");
        assert_eq!(
            fmt(1234.5, Some("currency"), "fr-FR"),
            format!("1{NARROW_NBSP}234,50\u{a0}€")
        );
    }

    #[test]
    fn test_patterns() {
        assert_eq!(fmt(1234.5, Some("#,##0.00"), "en-US"), "1,234.50");
        assert_eq!(fmt(2, Some("0.#"), "en-US"), "2");
        assert_eq!(fmt(2.25, Some("0.#"), "en-US"), "2.2");
        assert_eq!(fmt(7, Some("000"), "en-US"), "007");
        assert_eq!(fmt(0.456, Some("#.##"), "en-US"), ".46");
        assert_eq!(fmt(0.1234, Some("0.00%"), "en-US"), "12.34%");
        assert_eq!(fmt(5, Some("'#'0"), "en-US"), "#5");
        assert_eq!(fmt(1234.5, Some("\u{a4}#,##0.00"), "en-GB"), "£1,234.50");
        assert_eq!(fmt(1_234_567, Some("#,####"), "en-US"), "123,4567");
        assert_eq!(fmt(-5, Some("0.0;(0.0)"), "en-US"), "-5.0");
    }

    #[test]
    fn test_invalid_patterns() {
        for pattern in ["abc", "0.0.0", "#,", "'0"] {
            assert!(
                matches!(NumberStyle::parse(Some(pattern)), Err(FormatError::NumberPattern(_))),
                "pattern {pattern:?} should be rejected"
            );
        }
    }

    fn read(text: &str, style: Option<&str>, tag: &str) -> Number {
        parse_number(text, &NumberStyle::parse(style).unwrap(), &symbols(tag)).unwrap()
    }

    #[test]
    fn test_parse_reads_locale_separators() {
        assert_eq!(read("1,234,567", None, "en-US"), Number::Int(1_234_567));
        assert_eq!(read("1.234,5", None, "de-DE"), Number::Float(1234.5));
        assert_eq!(read(&format!("1{NARROW_NBSP}234,5"), None, "fr-FR"), Number::Float(1234.5));
        assert_eq!(read("-42", Some("integer"), "en-GB"), Number::Int(-42));
    }

    #[test]
    fn test_parse_strips_units() {
        assert_eq!(read("50\u{a0}%", Some("percent"), "de-DE"), Number::Float(0.5));
        assert_eq!(read("300%", Some("percent"), "en-US"), Number::Int(3));
        assert_eq!(read("-$3.00", Some("currency"), "en-US"), Number::Float(-3.0));
        assert_eq!(
            read(&format!("1{NARROW_NBSP}234,50\u{a0}€"), Some("currency"), "fr-FR"),
            Number::Float(1234.5)
        );
        assert_eq!(read("#5", Some("'#'0"), "en-US"), Number::Int(5));
        assert_eq!(read("£1,234.50", Some("\u{a4}#,##0.00"), "en-GB"), Number::Float(1234.5));
    }

    #[test]
    fn test_parse_rejects_text() {
        for text in ["", "abc", "1.2.3", "12 apples"] {
            let result = parse_number(text, &NumberStyle::Default, &symbols("en-US"));
            assert!(
                matches!(result, Err(FormatError::Unparseable { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(fmt(f64::NAN, None, "en-US"), "NaN");
        assert_eq!(fmt(f64::NEG_INFINITY, None, "en-US"), "-\u{221e}");
    }
}
