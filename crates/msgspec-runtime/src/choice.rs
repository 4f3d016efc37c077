//! Choice subpatterns: `0#no files|1#one file|1<{0,number,integer} files`.
//!
//! Each alternative is a limit, a relation and a text. `#` (or `≤`) selects
//! the text when the value is at least the limit, `<` when it is strictly
//! greater. Limits must be ascending.

use crate::error::{FormatError, FormatResult};

#[derive(Debug, Clone, PartialEq)]
struct Alternative {
    limit: f64,
    strict: bool,
    text: String,
}

/// A parsed choice subpattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoicePattern {
    alternatives: Vec<Alternative>,
}

impl ChoicePattern {
    /// Parses a choice subpattern.
    ///
    /// `|` inside quotes or inside nested braces does not split alternatives.
    /// Texts are kept verbatim so that they can be formatted again.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::ChoicePattern`] when an alternative has no
    /// relation or an unparseable limit, or when limits are not ascending.
    pub fn parse(pattern: &str) -> FormatResult<Self> {
        let invalid = || FormatError::ChoicePattern(pattern.to_string());
        let mut alternatives: Vec<Alternative> = Vec::new();

        for part in split_alternatives(pattern) {
            let (position, relation) = part
                .char_indices()
                .find(|(_, c)| matches!(c, '#' | '<' | '\u{2264}'))
                .ok_or_else(invalid)?;
            let limit = parse_limit(part[..position].trim()).ok_or_else(invalid)?;
            let strict = relation == '<';
            if let Some(previous) = alternatives.last() {
                let ascending = limit > previous.limit || (limit == previous.limit && strict && !previous.strict);
                if !ascending {
                    return Err(invalid());
                }
            }
            alternatives.push(Alternative {
                limit,
                strict,
                text: part[position + relation.len_utf8()..].to_string(),
            });
        }

        if alternatives.is_empty() {
            return Err(invalid());
        }
        Ok(Self { alternatives })
    }

    /// Text selected for `value`: the last alternative whose limit is met,
    /// or the first one when none is.
    #[must_use]
    pub fn select(&self, value: f64) -> &str {
        let mut selected = 0;
        for (i, alternative) in self.alternatives.iter().enumerate() {
            let met = if alternative.strict {
                value > alternative.limit
            } else {
                value >= alternative.limit
            };
            if !met {
                break;
            }
            selected = i;
        }
        self.alternatives
            .get(selected)
            .map_or("", |alternative| alternative.text.as_str())
    }

    /// Limits and texts in pattern order.
    pub fn alternatives(&self) -> impl Iterator<Item = (f64, &str)> {
        self.alternatives
            .iter()
            .map(|alternative| (alternative.limit, alternative.text.as_str()))
    }
}

fn parse_limit(text: &str) -> Option<f64> {
    match text {
        "\u{221e}" | "+\u{221e}" => Some(f64::INFINITY),
        "-\u{221e}" => Some(f64::NEG_INFINITY),
        _ => text.parse::<f64>().ok().filter(|limit| !limit.is_nan()),
    }
}

fn split_alternatives(pattern: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut start = 0;

    for (i, c) in pattern.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '{' if !in_quote => depth += 1,
            '}' if !in_quote => depth = depth.saturating_sub(1),
            '|' if !in_quote && depth == 0 => {
                parts.push(&pattern[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&pattern[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let choice = ChoicePattern::parse("0#no files|1#one file|1<many files").unwrap();
        assert_eq!(choice.select(-1.0), "no files");
        assert_eq!(choice.select(0.0), "no files");
        assert_eq!(choice.select(1.0), "one file");
        assert_eq!(choice.select(1.5), "many files");
        assert_eq!(choice.select(f64::NAN), "no files");
    }

    #[test]
    fn test_infinity_and_less_equal() {
        let choice = ChoicePattern::parse("-\u{221e}\u{2264}negative|0#zero|0<positive").unwrap();
        assert_eq!(choice.select(-5.0), "negative");
        assert_eq!(choice.select(0.0), "zero");
        assert_eq!(choice.select(0.1), "positive");
    }

    #[test]
    fn test_nested_and_quoted_separators() {
        let choice = ChoicePattern::parse("0#'a|b'|1#{0,choice,0#x|1#y}").unwrap();
        assert_eq!(choice.select(0.0), "'a|b'");
        assert_eq!(choice.select(3.0), "{0,choice,0#x|1#y}");
    }

    #[test]
    fn test_alternatives_keep_pattern_order() {
        let choice = ChoicePattern::parse("0#none|1<{0} some").unwrap();
        let alternatives: Vec<_> = choice.alternatives().collect();
        assert_eq!(alternatives, vec![(0.0, "none"), (1.0, "{0} some")]);
    }

    #[test]
    fn test_invalid_patterns() {
        for pattern in ["", "abc", "x#text", "2#two|1#one", "1#a|1#b"] {
            assert!(
                ChoicePattern::parse(pattern).is_err(),
                "pattern {pattern:?} should be rejected"
            );
        }
    }
}
