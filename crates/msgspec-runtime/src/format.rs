//! Template resolution and argument substitution.

use crate::arg::MessageArg;
use crate::choice::ChoicePattern;
use crate::date::{format_date, format_date_time, DateField, DateStyle};
use crate::error::{FormatError, FormatResult};
use crate::number::{format_default, format_number, NumberStyle};
use crate::symbols::LocaleSymbols;
use msgspec_core::{ArgType, LocaleTag, Placeholder, Segment, Template};
use tracing::warn;

/// Formats `template` for `locale`, substituting `args` by index.
///
/// Arguments that are absent or [`MessageArg::Missing`] are rendered as
/// `{n}`.
///
/// # Errors
///
/// Returns a [`FormatError`] when the template does not parse, a style is
/// malformed, or an argument's kind does not fit its placeholder.
pub fn format_message(template: &str, locale: &LocaleTag, args: &[MessageArg]) -> FormatResult<String> {
    let symbols = LocaleSymbols::for_locale(locale);
    format_with(template, locale, &symbols, args)
}

fn format_with(
    template: &str,
    locale: &LocaleTag,
    symbols: &LocaleSymbols,
    args: &[MessageArg],
) -> FormatResult<String> {
    let parsed = Template::parse(template)?;
    let mut out = String::with_capacity(template.len() + 16);

    for segment in parsed.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(placeholder) => {
                match args.get(placeholder.index).unwrap_or(&MessageArg::Missing) {
                    MessageArg::Missing => {
                        out.push('{');
                        out.push_str(&placeholder.index.to_string());
                        out.push('}');
                    }
                    arg => out.push_str(&format_arg(placeholder, arg, locale, symbols, args)?),
                }
            }
        }
    }

    Ok(out)
}

fn format_arg(
    placeholder: &Placeholder,
    arg: &MessageArg,
    locale: &LocaleTag,
    symbols: &LocaleSymbols,
    args: &[MessageArg],
) -> FormatResult<String> {
    let style = placeholder.style.as_deref();
    let mismatch = |expected: &'static str| FormatError::ArgumentKind {
        index: placeholder.index,
        expected,
        found: arg.kind(),
    };

    match (placeholder.arg_type, arg) {
        (ArgType::Untyped | ArgType::String, MessageArg::Text(text)) => Ok(text.clone()),
        (ArgType::Untyped | ArgType::String, MessageArg::Number(number)) => {
            Ok(format_default(*number, symbols))
        }
        (ArgType::Untyped | ArgType::String, MessageArg::Date(date)) => format_date_time(date, locale),
        (ArgType::Number, MessageArg::Number(number)) => {
            Ok(format_number(*number, &NumberStyle::parse(style)?, symbols))
        }
        (ArgType::Number, _) => Err(mismatch("number")),
        (ArgType::Date, MessageArg::Date(date)) => {
            let field = if placeholder.format_type.as_deref() == Some("time") {
                DateField::Time
            } else {
                DateField::Date
            };
            format_date(date, field, &DateStyle::parse(style), locale)
        }
        (ArgType::Date, _) => Err(mismatch("date")),
        (ArgType::Choice, MessageArg::Number(number)) => {
            let choice = ChoicePattern::parse(style.unwrap_or_default())?;
            format_with(choice.select(number.as_f64()), locale, symbols, args)
        }
        (ArgType::Choice, _) => Err(mismatch("number")),
        (_, MessageArg::Missing) => Ok(format!("{{{}}}", placeholder.index)),
    }
}

/// Picks the template for `locale`: exact tag, then the first template of
/// the same language, then the main locale's.
#[must_use]
pub fn resolve_template<'t>(
    templates: &[(&'t str, &'t str)],
    main_locale: &str,
    locale: &LocaleTag,
) -> Option<&'t str> {
    let find = |predicate: &dyn Fn(&str) -> bool| {
        templates
            .iter()
            .find(|(tag, _)| predicate(tag))
            .map(|(_, template)| *template)
    };

    find(&|tag| tag == locale.as_str())
        .or_else(|| find(&|tag| tag.split('-').next() == Some(locale.language())))
        .or_else(|| find(&|tag| tag == main_locale))
}

/// Resolves and formats a message, never failing.
///
/// A template that cannot be formatted is logged and returned raw.
#[must_use]
pub fn render(
    templates: &[(&str, &str)],
    main_locale: &str,
    locale: &LocaleTag,
    args: &[MessageArg],
) -> String {
    let Some(template) = resolve_template(templates, main_locale, locale) else {
        warn!("No template available for locale {} (main locale {})", locale, main_locale);
        return String::new();
    };

    format_message(template, locale, args).unwrap_or_else(|e| {
        warn!("Failed to format message for locale {}: {}", locale, e);
        template.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::Number;
    use chrono::NaiveDate;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    fn fmt(template: &str, locale: &str, args: &[MessageArg]) -> String {
        format_message(template, &tag(locale), args).unwrap()
    }

    const TEMPLATES: &[(&str, &str)] = &[
        ("de-DE", "Hallo {0}"),
        ("en-GB", "Hello {0}"),
        ("fr-FR", "Bonjour {0}"),
    ];

    #[test]
    fn test_untyped_arguments_follow_their_kind() {
        assert_eq!(
            fmt("Hi {0}, you are {1} years old", "en-GB", &["Ann".into(), 42.into()]),
            "Hi Ann, you are 42 years old"
        );
        assert_eq!(fmt("{0}", "de-DE", &[1234.5.into()]), "1.234,5");
    }

    #[test]
    fn test_missing_arguments_render_as_placeholders() {
        assert_eq!(fmt("{0} and {1}", "en-GB", &["a".into()]), "a and {1}");
        assert_eq!(fmt("{2,number}", "en-GB", &[MessageArg::Missing]), "{2}");
    }

    #[test]
    fn test_quoting_is_resolved() {
        assert_eq!(fmt("It''s '{0}' {0}", "en-GB", &["x".into()]), "It's {0} x");
    }

    #[test]
    fn test_typed_placeholders() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            fmt("Valeur : {0,number,#,##0.00}", "fr-FR", &[1234.5.into()]),
            "Valeur : 1\u{202f}234,50"
        );
        assert_eq!(fmt("Am {0,date,long}", "de-DE", &[date.into()]), "Am 9. März 2024");
        assert_eq!(
            fmt("at {0,time,HH:mm}", "en-US", &[date.and_hms_opt(9, 30, 0).unwrap().into()]),
            "at 09:30"
        );
    }

    #[test]
    fn test_choice_is_formatted_recursively() {
        let template = "{0,choice,0#no files|1#one file|1<{0,number,integer} files}";
        assert_eq!(fmt(template, "en-US", &[0.into()]), "no files");
        assert_eq!(fmt(template, "en-US", &[1.into()]), "one file");
        assert_eq!(fmt(template, "en-US", &[1234.into()]), "1,234 files");
        assert_eq!(fmt("{0,choice,0#it''s none|1#some}", "en-US", &[0.into()]), "it's none");
    }

    #[test]
    fn test_kind_mismatch() {
        let err = format_message("{0,number}", &tag("en-GB"), &["x".into()]).unwrap_err();
        assert_eq!(
            err,
            FormatError::ArgumentKind {
                index: 0,
                expected: "number",
                found: "text"
            }
        );
        assert!(format_message("{0,date}", &tag("en-GB"), &[MessageArg::Number(Number::Int(1))]).is_err());
    }

    #[test]
    fn test_resolve_template() {
        assert_eq!(resolve_template(TEMPLATES, "en-GB", &tag("fr-FR")), Some("Bonjour {0}"));
        assert_eq!(resolve_template(TEMPLATES, "en-GB", &tag("fr-CA")), Some("Bonjour {0}"));
        assert_eq!(resolve_template(TEMPLATES, "en-GB", &tag("en-US")), Some("Hello {0}"));
        assert_eq!(resolve_template(TEMPLATES, "en-GB", &tag("ja-JP")), Some("Hello {0}"));
        assert_eq!(resolve_template(&[], "en-GB", &tag("ja-JP")), None);
    }

    #[test]
    fn test_render_falls_back_to_raw_template() {
        assert_eq!(render(TEMPLATES, "en-GB", &tag("de-DE"), &["Welt".into()]), "Hallo Welt");
        let broken = &[("en-GB", "Broken {0,number}")];
        assert_eq!(
            render(broken, "en-GB", &tag("en-GB"), &["text".into()]),
            "Broken {0,number}"
        );
    }
}
