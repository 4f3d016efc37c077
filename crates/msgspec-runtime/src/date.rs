//! Date and time formatting: the `date` and `time` placeholder types.
//!
//! Styles are `short`, `medium` (the default), `long`, `full`, or a pattern
//! built from the letters `y M L d E H k h K m s S a`. Text between single
//! quotes is literal; `''` is one quote.

use crate::arg::DateTimeValue;
use crate::error::{FormatError, FormatResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use msgspec_core::LocaleTag;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Month, weekday and day-period names for one language.
#[derive(Debug)]
pub struct CalendarNames {
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    weekdays: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    day_periods: [&'static str; 2],
}

static EN: CalendarNames = CalendarNames {
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekdays: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    day_periods: ["AM", "PM"],
};

static FR: CalendarNames = CalendarNames {
    months: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    weekdays: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
    weekdays_short: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
    day_periods: ["AM", "PM"],
};

static DE: CalendarNames = CalendarNames {
    months: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    weekdays: [
        "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
    ],
    weekdays_short: ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
    day_periods: ["AM", "PM"],
};

static ES: CalendarNames = CalendarNames {
    months: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    months_short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekdays: ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"],
    weekdays_short: ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
    day_periods: ["a. m.", "p. m."],
};

static NAMES: Lazy<HashMap<&'static str, &'static CalendarNames>> = Lazy::new(|| {
    HashMap::from([("en", &EN), ("fr", &FR), ("de", &DE), ("es", &ES)])
});

impl CalendarNames {
    /// Names for `locale`'s language, English when unknown.
    #[must_use]
    pub fn for_locale(locale: &LocaleTag) -> &'static Self {
        NAMES.get(locale.language()).copied().unwrap_or(&EN)
    }
}

/// Style of a `date` or `time` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateStyle {
    /// Numeric, compact.
    Short,
    /// The default.
    Medium,
    /// With month names.
    Long,
    /// With weekday and month names.
    Full,
    /// An explicit pattern.
    Pattern(String),
}

impl DateStyle {
    /// Interprets the style part of a placeholder.
    #[must_use]
    pub fn parse(style: Option<&str>) -> Self {
        let Some(raw) = style else {
            return Self::Medium;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "medium" => Self::Medium,
            "short" => Self::Short,
            "long" => Self::Long,
            "full" => Self::Full,
            _ => Self::Pattern(raw.to_string()),
        }
    }
}

/// Whether a placeholder renders the date or the time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `date` placeholders.
    Date,
    /// `time` placeholders.
    Time,
}

fn uses_us_conventions(locale: &LocaleTag) -> bool {
    locale.language() == "en" && matches!(locale.region(), None | Some("US"))
}

fn date_pattern(locale: &LocaleTag, style: &DateStyle) -> &'static str {
    use DateStyle::{Full, Long, Medium, Short};

    if uses_us_conventions(locale) {
        return match style {
            Short => "M/d/yy",
            Long => "MMMM d, yyyy",
            Full => "EEEE, MMMM d, yyyy",
            _ => "MMM d, yyyy",
        };
    }

    match (locale.language(), style) {
        ("en", Short) => "dd/MM/yyyy",
        ("en", Long) => "d MMMM yyyy",
        ("en", Full) => "EEEE, d MMMM yyyy",
        ("en", _) => "d MMM yyyy",
        ("fr", Short) => "dd/MM/yyyy",
        ("fr", Long) => "d MMMM yyyy",
        ("fr", Full) => "EEEE d MMMM yyyy",
        ("fr", _) => "d MMM yyyy",
        ("de", Short) => "dd.MM.yy",
        ("de", Long) => "d. MMMM yyyy",
        ("de", Full) => "EEEE, d. MMMM yyyy",
        ("de", _) => "dd.MM.yyyy",
        ("es", Short) => "d/M/yy",
        ("es", Long) => "d 'de' MMMM 'de' yyyy",
        ("es", Full) => "EEEE, d 'de' MMMM 'de' yyyy",
        ("es", _) => "d MMM yyyy",
        ("it" | "pt", Short) => "dd/MM/yy",
        ("it" | "pt", _) => "dd/MM/yyyy",
        ("ru", Short) => "dd.MM.yy",
        ("ru", _) => "dd.MM.yyyy",
        ("nl", _) => "dd-MM-yyyy",
        ("ja" | "zh", Short | Medium) => "yyyy/MM/dd",
        ("ja" | "zh", _) => "yyyy年M月d日",
        ("ko", Short) => "yy. M. d.",
        ("ko", Medium) => "yyyy. M. d.",
        ("ko", _) => "yyyy년 M월 d일",
        _ => "yyyy-MM-dd",
    }
}

fn time_pattern(locale: &LocaleTag, style: &DateStyle) -> &'static str {
    match (uses_us_conventions(locale), style) {
        (true, DateStyle::Short) => "h:mm a",
        (true, _) => "h:mm:ss a",
        (false, DateStyle::Short) => "HH:mm",
        (false, _) => "HH:mm:ss",
    }
}

/// Formats the date or time part of `value`.
///
/// # Errors
///
/// Returns [`FormatError::DatePattern`] for malformed explicit patterns.
pub fn format_date(
    value: &DateTimeValue,
    field: DateField,
    style: &DateStyle,
    locale: &LocaleTag,
) -> FormatResult<String> {
    format_pattern(
        value.naive(),
        pattern_for(style, field, locale),
        CalendarNames::for_locale(locale),
    )
}

/// Reads a date or time formatted in `style` for `locale`.
///
/// Fields the pattern does not carry default to 1970-01-01 00:00:00.
///
/// # Errors
///
/// Returns [`FormatError::Unparseable`] when `text` does not follow the
/// pattern, and [`FormatError::DatePattern`] for malformed patterns.
pub fn parse_date(
    text: &str,
    field: DateField,
    style: &DateStyle,
    locale: &LocaleTag,
) -> FormatResult<DateTimeValue> {
    parse_pattern(text, pattern_for(style, field, locale), CalendarNames::for_locale(locale))
        .map(DateTimeValue::new)
}

fn pattern_for<'a>(style: &'a DateStyle, field: DateField, locale: &LocaleTag) -> &'a str {
    match (style, field) {
        (DateStyle::Pattern(pattern), _) => pattern.as_str(),
        (_, DateField::Date) => date_pattern(locale, style),
        (_, DateField::Time) => time_pattern(locale, style),
    }
}

/// Short date followed by short time; used for untyped date arguments.
///
/// # Errors
///
/// Never fails for the built-in patterns; the result type is shared with
/// [`format_date`].
pub fn format_date_time(value: &DateTimeValue, locale: &LocaleTag) -> FormatResult<String> {
    let date = format_date(value, DateField::Date, &DateStyle::Short, locale)?;
    let time = format_date(value, DateField::Time, &DateStyle::Short, locale)?;
    let separator = if locale.language() == "en" { ", " } else { " " };
    Ok(format!("{date}{separator}{time}"))
}

/// Formats `value` with an explicit pattern.
///
/// # Errors
///
/// Returns [`FormatError::DatePattern`] for unsupported letters or an
/// unclosed quote.
pub fn format_pattern(
    value: NaiveDateTime,
    pattern: &str,
    names: &CalendarNames,
) -> FormatResult<String> {
    let invalid = |reason: String| FormatError::DatePattern {
        pattern: pattern.to_string(),
        reason,
    };

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
            } else {
                in_quote = !in_quote;
                i += 1;
            }
            continue;
        }
        if in_quote || !c.is_ascii_alphabetic() {
            out.push(c);
            i += 1;
            continue;
        }

        let count = chars[i..].iter().take_while(|&&next| next == c).count();
        i += count;

        let month = value.month0() as usize;
        let weekday = value.weekday().num_days_from_monday() as usize;
        match c {
            'y' if count == 2 => out.push_str(&format!("{:02}", value.year().rem_euclid(100))),
            'y' => out.push_str(&format!("{:0count$}", value.year())),
            'M' | 'L' if count >= 4 => out.push_str(names.months[month]),
            'M' | 'L' if count == 3 => out.push_str(names.months_short[month]),
            'M' | 'L' => out.push_str(&format!("{:0count$}", value.month())),
            'd' => out.push_str(&format!("{:0count$}", value.day())),
            'E' if count >= 4 => out.push_str(names.weekdays[weekday]),
            'E' => out.push_str(names.weekdays_short[weekday]),
            'H' => out.push_str(&format!("{:0count$}", value.hour())),
            'k' => out.push_str(&format!("{:0count$}", if value.hour() == 0 { 24 } else { value.hour() })),
            'h' => {
                let hour = value.hour() % 12;
                out.push_str(&format!("{:0count$}", if hour == 0 { 12 } else { hour }));
            }
            'K' => out.push_str(&format!("{:0count$}", value.hour() % 12)),
            'm' => out.push_str(&format!("{:0count$}", value.minute())),
            's' => out.push_str(&format!("{:0count$}", value.second())),
            'S' => out.push_str(&format!(
                "{:0count$}",
                value.nanosecond().min(999_999_999) / 1_000_000
            )),
            'a' => out.push_str(names.day_periods[usize::from(value.hour() >= 12)]),
            other => return Err(invalid(format!("unsupported pattern letter '{other}'"))),
        }
    }

    if in_quote {
        return Err(invalid("unterminated quote".to_string()));
    }
    Ok(out)
}

/// Date and time fields collected while parsing.
#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    hour12: Option<u32>,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
    millis: Option<u32>,
}

impl Fields {
    fn resolve(&self) -> Option<NaiveDateTime> {
        let hour = match (self.hour12, self.hour) {
            (Some(hour12), _) => hour12 + if self.pm == Some(true) { 12 } else { 0 },
            (None, Some(hour)) => hour,
            (None, None) => 0,
        };
        NaiveDate::from_ymd_opt(
            self.year.unwrap_or(1970),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )?
        .and_hms_milli_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.millis.unwrap_or(0),
        )
    }
}

/// Reads `text` with an explicit pattern.
///
/// Abutting numeric fields take exactly as many digits as their letter
/// count; a field followed by a literal takes every digit available.
/// Two-digit years fall within 80 years before and 20 years after now.
///
/// # Errors
///
/// Returns [`FormatError::Unparseable`] when `text` does not follow the
/// pattern or names an impossible date, and [`FormatError::DatePattern`]
/// for unsupported letters or an unclosed quote.
pub fn parse_pattern(text: &str, pattern: &str, names: &CalendarNames) -> FormatResult<NaiveDateTime> {
    let invalid = |reason: String| FormatError::DatePattern {
        pattern: pattern.to_string(),
        reason,
    };

    let chars: Vec<char> = pattern.chars().collect();
    let mut rest = text;
    let mut fields = Fields::default();
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                rest = expect_char(text, rest, '\'')?;
                i += 2;
            } else {
                in_quote = !in_quote;
                i += 1;
            }
            continue;
        }
        if in_quote || !c.is_ascii_alphabetic() {
            rest = expect_char(text, rest, c)?;
            i += 1;
            continue;
        }

        let count = chars[i..].iter().take_while(|&&next| next == c).count();
        i += count;
        let width = if chars.get(i).is_some_and(char::is_ascii_alphabetic) {
            count
        } else {
            usize::MAX
        };

        match c {
            'M' | 'L' if count >= 4 => fields.month = Some(take_name(text, &mut rest, &names.months)? + 1),
            'M' | 'L' if count == 3 => {
                fields.month = Some(take_name(text, &mut rest, &names.months_short)? + 1);
            }
            'E' if count >= 4 => {
                take_name(text, &mut rest, &names.weekdays)?;
            }
            'E' => {
                take_name(text, &mut rest, &names.weekdays_short)?;
            }
            'a' => fields.pm = Some(take_name(text, &mut rest, &names.day_periods)? == 1),
            'y' | 'M' | 'L' | 'd' | 'H' | 'k' | 'h' | 'K' | 'm' | 's' | 'S' => {
                let value = take_number(text, &mut rest, width)?;
                match c {
                    'y' if count == 2 => fields.year = Some(expand_year(value)),
                    'y' => fields.year = i32::try_from(value).ok(),
                    'M' | 'L' => fields.month = Some(value),
                    'd' => fields.day = Some(value),
                    'H' => fields.hour = Some(value),
                    'k' => fields.hour = Some(value % 24),
                    'h' | 'K' => fields.hour12 = Some(value % 12),
                    'm' => fields.minute = Some(value),
                    's' => fields.second = Some(value),
                    _ => fields.millis = Some(value),
                }
            }
            other => return Err(invalid(format!("unsupported pattern letter '{other}'"))),
        }
    }

    if in_quote {
        return Err(invalid("unterminated quote".to_string()));
    }
    if !rest.is_empty() {
        return Err(FormatError::unparseable(text, format!("unexpected trailing text '{rest}'")));
    }
    fields
        .resolve()
        .ok_or_else(|| FormatError::unparseable(text, "no such date or time"))
}

fn expect_char<'t>(text: &str, rest: &'t str, expected: char) -> FormatResult<&'t str> {
    rest.strip_prefix(expected)
        .ok_or_else(|| FormatError::unparseable(text, format!("expected '{expected}'")))
}

fn take_number(text: &str, rest: &mut &str, width: usize) -> FormatResult<u32> {
    let len = rest
        .bytes()
        .take(width)
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return Err(FormatError::unparseable(text, "expected digits"));
    }
    let (digits, tail) = rest.split_at(len);
    *rest = tail;
    digits
        .parse()
        .map_err(|_| FormatError::unparseable(text, format!("'{digits}' is out of range")))
}

/// Index of the longest name `rest` starts with.
fn take_name(text: &str, rest: &mut &str, names: &[&str]) -> FormatResult<u32> {
    let (index, name) = names
        .iter()
        .enumerate()
        .filter(|(_, name)| rest.starts_with(**name))
        .max_by_key(|(_, name)| name.len())
        .ok_or_else(|| FormatError::unparseable(text, "expected a month, weekday or day period name"))?;
    *rest = &rest[name.len()..];
    u32::try_from(index).map_err(|_| FormatError::unparseable(text, "name index out of range"))
}

#[allow(clippy::cast_possible_wrap)]
fn expand_year(two_digits: u32) -> i32 {
    let start = Utc::now().year() - 80;
    let mut year = start - start.rem_euclid(100) + (two_digits % 100) as i32;
    if year < start {
        year += 100;
    }
    year
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    fn value() -> DateTimeValue {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
            .into()
    }

    fn date(style: Option<&str>, locale: &str) -> String {
        format_date(&value(), DateField::Date, &DateStyle::parse(style), &tag(locale)).unwrap()
    }

    fn time(style: Option<&str>, locale: &str) -> String {
        format_date(&value(), DateField::Time, &DateStyle::parse(style), &tag(locale)).unwrap()
    }

    #[test]
    fn test_us_dates() {
        assert_eq!(date(Some("short"), "en-US"), "3/9/24");
        assert_eq!(date(None, "en-US"), "Mar 9, 2024");
        assert_eq!(date(Some("long"), "en-US"), "March 9, 2024");
        assert_eq!(date(Some("full"), "en-US"), "Saturday, March 9, 2024");
    }

    #[test]
    fn test_day_first_dates() {
        assert_eq!(date(Some("short"), "en-GB"), "09/03/2024");
        assert_eq!(date(None, "en-GB"), "9 Mar 2024");
        assert_eq!(date(Some("full"), "fr-FR"), "samedi 9 mars 2024");
        assert_eq!(date(Some("long"), "es-ES"), "9 de marzo de 2024");
        assert_eq!(date(Some("short"), "it-IT"), "09/03/24");
    }

    #[test]
    fn test_dotted_and_year_first_dates() {
        assert_eq!(date(None, "de-DE"), "09.03.2024");
        assert_eq!(date(Some("long"), "de-DE"), "9. März 2024");
        assert_eq!(date(None, "ru-RU"), "09.03.2024");
        assert_eq!(date(Some("long"), "ja-JP"), "2024年3月9日");
        assert_eq!(date(None, "sv-SE"), "2024-03-09");
    }

    #[test]
    fn test_times() {
        assert_eq!(time(Some("short"), "en-US"), "2:05 PM");
        assert_eq!(time(None, "en-US"), "2:05:07 PM");
        assert_eq!(time(Some("short"), "fr-FR"), "14:05");
        assert_eq!(time(None, "de-DE"), "14:05:07");
    }

    #[test]
    fn test_explicit_patterns() {
        assert_eq!(date(Some("yyyy-MM-dd'T'HH:mm"), "en-US"), "2024-03-09T14:05");
        assert_eq!(date(Some("EEE d MMM yy"), "de-DE"), "Sa. 9 März 24");
        assert_eq!(date(Some("h 'o''clock' a"), "en-GB"), "2 o'clock PM");
        assert_eq!(date(Some("dd/MM/yyyy"), "fr-FR"), "09/03/2024");
    }

    #[test]
    fn test_invalid_patterns() {
        let err = format_date(
            &value(),
            DateField::Date,
            &DateStyle::parse(Some("yyyy-QQ")),
            &tag("en-US"),
        )
        .unwrap_err();
        assert!(matches!(err, FormatError::DatePattern { .. }));

        assert!(format_pattern(value().naive(), "'open", &EN).is_err());
    }

    fn read(text: &str, field: DateField, style: Option<&str>, locale: &str) -> NaiveDateTime {
        parse_date(text, field, &DateStyle::parse(style), &tag(locale))
            .unwrap()
            .naive()
    }

    #[test]
    fn test_parse_reads_what_was_formatted() {
        let day = value().naive().date().and_hms_opt(0, 0, 0).unwrap();
        for (style, locale) in [
            (Some("short"), "en-GB"),
            (None, "en-US"),
            (Some("full"), "fr-FR"),
            (Some("long"), "de-DE"),
            (Some("long"), "es-ES"),
            (Some("long"), "ja-JP"),
        ] {
            let text = date(style, locale);
            assert_eq!(read(&text, DateField::Date, style, locale), day, "{text}");
        }
    }

    #[test]
    fn test_parse_times_default_to_the_epoch_date() {
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(read("2:05 PM", DateField::Time, Some("short"), "en-US"), expected);
        assert_eq!(read("14:05", DateField::Time, Some("short"), "fr-FR"), expected);
        assert_eq!(
            read("12:30 AM", DateField::Time, Some("short"), "en-US"),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_abutting_fields_and_quotes() {
        assert_eq!(
            read("20240309T1405", DateField::Date, Some("yyyyMMdd'T'HHmm"), "en-US"),
            value().naive().with_second(0).unwrap()
        );
        assert_eq!(
            read("09.03.24", DateField::Date, Some("short"), "de-DE").date(),
            value().naive().date()
        );
    }

    #[test]
    fn test_parse_rejects_mismatches() {
        for (text, style) in [("9 Mars 2024", "long"), ("31/02/2024", "short"), ("09/03/2024 extra", "short")] {
            let result = parse_date(text, DateField::Date, &DateStyle::parse(Some(style)), &tag("en-GB"));
            assert!(
                matches!(result, Err(FormatError::Unparseable { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_untyped_date_time() {
        assert_eq!(format_date_time(&value(), &tag("en-US")).unwrap(), "3/9/24, 2:05 PM");
        assert_eq!(format_date_time(&value(), &tag("de-DE")).unwrap(), "09.03.24 14:05");
    }
}
