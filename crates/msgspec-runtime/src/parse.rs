//! Reverse formatting: recovering arguments from a formatted message.
//!
//! Literal text must match exactly. Each placeholder takes the text up to
//! the next occurrence of the literal that follows it. A placeholder that
//! ends the template, or is followed only by a closing literal, takes the
//! rest of the input up to that literal. Typed placeholders are read back with
//! the locale's conventions; untyped and `string` placeholders yield text.

use crate::arg::{MessageArg, Number};
use crate::choice::ChoicePattern;
use crate::date::{parse_date, DateField, DateStyle};
use crate::error::{FormatError, FormatResult};
use crate::format::resolve_template;
use crate::number::{parse_number, NumberStyle};
use crate::symbols::LocaleSymbols;
use msgspec_core::{ArgType, LocaleTag, Placeholder, Segment, Template};
use tracing::debug;

/// Parses `text` against `template`, returning the arguments by index.
///
/// Indices the template never mentions are [`MessageArg::Missing`]. An index
/// that appears twice must read back the same value both times.
///
/// # Errors
///
/// Returns [`FormatError::Unparseable`] when `text` does not follow the
/// template, and the usual template or style errors for a malformed
/// template.
pub fn parse_message(template: &str, locale: &LocaleTag, text: &str) -> FormatResult<Vec<MessageArg>> {
    let symbols = LocaleSymbols::for_locale(locale);
    parse_with(template, locale, &symbols, text)
}

/// Resolves the template for `locale` like [`crate::render`] does, then
/// parses `text` against it.
///
/// # Errors
///
/// Returns [`FormatError::NoTemplate`] when no template is available, or
/// any error of [`parse_message`].
pub fn parse(
    templates: &[(&str, &str)],
    main_locale: &str,
    locale: &LocaleTag,
    text: &str,
) -> FormatResult<Vec<MessageArg>> {
    let template = resolve_template(templates, main_locale, locale)
        .ok_or_else(|| FormatError::NoTemplate(locale.to_string()))?;
    parse_message(template, locale, text)
        .inspect_err(|e| debug!("Failed to parse message for locale {}: {}", locale, e))
}

fn parse_with(
    template: &str,
    locale: &LocaleTag,
    symbols: &LocaleSymbols,
    text: &str,
) -> FormatResult<Vec<MessageArg>> {
    let parsed = Template::parse(template)?;
    let segments = parsed.segments();
    let mut args = Vec::new();
    let mut rest = text;

    for (position, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Literal(literal) => {
                rest = rest
                    .strip_prefix(literal.as_str())
                    .ok_or_else(|| FormatError::unparseable(text, format!("expected '{literal}'")))?;
            }
            Segment::Placeholder(placeholder) => {
                let end = match segments.get(position + 1) {
                    None => rest.len(),
                    Some(Segment::Literal(last)) if position + 2 == segments.len() => rest
                        .strip_suffix(last.as_str())
                        .map(str::len)
                        .ok_or_else(|| FormatError::unparseable(text, format!("expected '{last}'")))?,
                    Some(Segment::Literal(next)) => rest.find(next.as_str()).ok_or_else(|| {
                        FormatError::unparseable(text, format!("expected '{next}'"))
                    })?,
                    Some(Segment::Placeholder(next)) => {
                        return Err(FormatError::unparseable(
                            text,
                            format!(
                                "arguments {} and {} are not separated by text",
                                placeholder.index, next.index
                            ),
                        ));
                    }
                };
                let (captured, tail) = rest.split_at(end);
                rest = tail;
                read_placeholder(placeholder, captured, locale, symbols, text, &mut args)?;
            }
        }
    }

    if !rest.is_empty() {
        return Err(FormatError::unparseable(text, format!("unexpected trailing text '{rest}'")));
    }
    Ok(args)
}

fn read_placeholder(
    placeholder: &Placeholder,
    captured: &str,
    locale: &LocaleTag,
    symbols: &LocaleSymbols,
    text: &str,
    args: &mut Vec<MessageArg>,
) -> FormatResult<()> {
    let style = placeholder.style.as_deref();
    let value = match placeholder.arg_type {
        ArgType::Untyped | ArgType::String => MessageArg::Text(captured.to_string()),
        ArgType::Number => MessageArg::Number(parse_number(captured, &NumberStyle::parse(style)?, symbols)?),
        ArgType::Date => {
            let field = if placeholder.format_type.as_deref() == Some("time") {
                DateField::Time
            } else {
                DateField::Date
            };
            MessageArg::Date(parse_date(captured, field, &DateStyle::parse(style), locale)?)
        }
        ArgType::Choice => {
            let choice = ChoicePattern::parse(style.unwrap_or_default())?;
            return read_choice(placeholder.index, &choice, captured, locale, symbols, text, args);
        }
    };
    store(args, placeholder.index, value, text)
}

/// Picks the first alternative that `captured` matches.
///
/// When the alternative formats the choice argument itself, the value read
/// there wins over the alternative's limit.
fn read_choice(
    index: usize,
    choice: &ChoicePattern,
    captured: &str,
    locale: &LocaleTag,
    symbols: &LocaleSymbols,
    text: &str,
    args: &mut Vec<MessageArg>,
) -> FormatResult<()> {
    for (limit, alternative) in choice.alternatives() {
        let Ok(nested) = parse_with(alternative, locale, symbols, captured) else {
            continue;
        };
        let mut value = MessageArg::Number(limit_value(limit));
        for (nested_index, arg) in nested.into_iter().enumerate() {
            match arg {
                MessageArg::Missing => {}
                MessageArg::Number(_) if nested_index == index => value = arg,
                other => store(args, nested_index, other, text)?,
            }
        }
        return store(args, index, value, text);
    }
    Err(FormatError::unparseable(
        text,
        format!("'{captured}' matches no choice of argument {index}"),
    ))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn limit_value(limit: f64) -> Number {
    if limit.is_finite() && limit.fract() == 0.0 && limit.abs() < (1_i64 << 53) as f64 {
        Number::Int(limit as i64)
    } else {
        Number::Float(limit)
    }
}

fn store(args: &mut Vec<MessageArg>, index: usize, value: MessageArg, text: &str) -> FormatResult<()> {
    if args.len() <= index {
        args.resize(index + 1, MessageArg::Missing);
    }
    if args[index] == MessageArg::Missing {
        args[index] = value;
    } else if args[index] != value {
        return Err(FormatError::unparseable(
            text,
            format!("argument {index} reads as two different values"),
        ));
    }
    Ok(())
}
