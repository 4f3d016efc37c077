//! Placeholder grammar of message templates and the argument signatures
//! derived from it.
//!
//! A template is literal text with positional placeholders:
//!
//! ```text
//! {index}  {index,type}  {index,type,style}
//! ```
//!
//! A single quote starts or ends a quoted span in which braces are literal;
//! two consecutive quotes are one literal quote anywhere in the text.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Highest placeholder index accepted by the parser.
pub const MAX_ARGUMENT_INDEX: usize = 255;

/// Semantic type of a positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArgType {
    /// Declared without a type; compatible with every concrete type.
    Untyped,
    /// Textual value. Also fills indices a template never declares.
    String,
    /// Numeric value (`number`).
    Number,
    /// Date or time value (`date`, `time`).
    Date,
    /// Numeric value selecting a choice alternative (`choice`).
    Choice,
}

impl ArgType {
    /// Maps a placeholder type keyword onto a type.
    ///
    /// Keywords are trimmed and case-insensitive; an empty keyword is
    /// [`ArgType::Untyped`]. Returns `None` for unknown keywords.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "" => Some(Self::Untyped),
            "number" => Some(Self::Number),
            "date" | "time" => Some(Self::Date),
            "choice" => Some(Self::Choice),
            _ => None,
        }
    }

    /// Whether this is anything other than [`ArgType::Untyped`].
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        !matches!(self, Self::Untyped)
    }

    /// Upper-case name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Untyped => "UNTYPED",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Choice => "CHOICE",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One positional argument of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Zero-based position.
    pub index: usize,
    /// Semantic type.
    pub arg_type: ArgType,
}

/// A parsed top-level placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Argument index.
    pub index: usize,
    /// Normalized type keyword (`number`, `date`, `time`, `choice`).
    pub format_type: Option<String>,
    /// Raw style or subpattern, when non-blank.
    pub style: Option<String>,
    /// Type derived from the keyword.
    pub arg_type: ArgType,
}

/// A token of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text with quoting already resolved.
    Literal(String),
    /// A top-level placeholder.
    Placeholder(Placeholder),
}

/// Errors raised while parsing a template or deriving its signature.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` without its closing `}`
    #[error("unterminated placeholder starting at position {position}")]
    UnterminatedPlaceholder {
        /// Character offset of the opening brace.
        position: usize,
    },

    /// A quoted span that is never closed
    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote {
        /// Character offset of the opening quote.
        position: usize,
    },

    /// The index part is not a non-negative integer
    #[error("invalid argument index '{index}' at position {position}")]
    InvalidIndex {
        /// The offending index text.
        index: String,
        /// Character offset of the placeholder.
        position: usize,
    },

    /// The index exceeds [`MAX_ARGUMENT_INDEX`]
    #[error("argument index {index} exceeds the maximum of {max}")]
    IndexOutOfRange {
        /// The declared index.
        index: usize,
        /// The accepted maximum.
        max: usize,
    },

    /// The type keyword is not one of `number`, `date`, `time`, `choice`
    #[error("unknown format type '{keyword}' for argument {index}")]
    UnknownFormatType {
        /// The offending keyword.
        keyword: String,
        /// Argument index it was attached to.
        index: usize,
    },

    /// The same index is declared with two different concrete types
    #[error("argument {index} is declared as both {first} and {second}")]
    AmbiguousType {
        /// Argument index.
        index: usize,
        /// First concrete type seen.
        first: ArgType,
        /// Conflicting concrete type.
        second: ArgType,
    },
}

/// Ordered argument types required by a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageSignature {
    args: Vec<ArgType>,
}

impl MessageSignature {
    /// Builds a signature from types in index order.
    pub fn from_types(types: impl IntoIterator<Item = ArgType>) -> Self {
        Self {
            args: types.into_iter().collect(),
        }
    }

    /// Number of arguments (`max(index) + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether the template takes no argument.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Type at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ArgType> {
        self.args.get(index).copied()
    }

    /// Types in index order.
    #[must_use]
    pub fn types(&self) -> &[ArgType] {
        &self.args
    }

    /// Arguments in index order.
    pub fn iter(&self) -> impl Iterator<Item = ArgumentSpec> + '_ {
        self.args
            .iter()
            .enumerate()
            .map(|(index, &arg_type)| ArgumentSpec { index, arg_type })
    }

    /// Replaces an untyped entry with a concrete type.
    ///
    /// Returns `true` when the entry changed. Concrete entries are never
    /// overwritten.
    pub fn refine(&mut self, index: usize, arg_type: ArgType) -> bool {
        match self.args.get_mut(index) {
            Some(slot) if *slot == ArgType::Untyped && arg_type.is_concrete() => {
                *slot = arg_type;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("]")
    }
}

/// A template split into literal and placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a raw template.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for unterminated placeholders or quotes,
    /// malformed or out-of-range indices and unknown type keywords.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let chars: Vec<char> = source.chars().collect();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut quote_start = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                if chars.get(i + 1) == Some(&'\'') {
                    literal.push('\'');
                    i += 2;
                    continue;
                }
                quote_start = match quote_start {
                    Some(_) => None,
                    None => Some(i),
                };
                i += 1;
            } else if c == '{' && quote_start.is_none() {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let (placeholder, next) = parse_placeholder(&chars, i)?;
                segments.push(Segment::Placeholder(placeholder));
                i = next;
            } else {
                literal.push(c);
                i += 1;
            }
        }

        if let Some(position) = quote_start {
            return Err(TemplateError::UnterminatedQuote { position });
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The raw template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Segments in template order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Top-level placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
    }

    /// Derives the argument signature.
    ///
    /// Repeated indices merge: an untyped declaration takes the type of a
    /// typed one. Undeclared indices below the maximum become
    /// [`ArgType::String`].
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::AmbiguousType`] when an index is declared with
    /// two different concrete types.
    pub fn signature(&self) -> Result<MessageSignature, TemplateError> {
        let mut slots: Vec<Option<ArgType>> = Vec::new();

        for placeholder in self.placeholders() {
            let index = placeholder.index;
            if index >= slots.len() {
                slots.resize(index + 1, None);
            }
            let declared = placeholder.arg_type;
            slots[index] = match slots[index] {
                None | Some(ArgType::Untyped) => Some(declared),
                Some(existing) if declared == ArgType::Untyped || declared == existing => {
                    Some(existing)
                }
                Some(existing) => {
                    return Err(TemplateError::AmbiguousType {
                        index,
                        first: existing,
                        second: declared,
                    })
                }
            };
        }

        Ok(MessageSignature::from_types(
            slots.into_iter().map(|slot| slot.unwrap_or(ArgType::String)),
        ))
    }
}

/// Parses a template and derives its signature in one step.
///
/// # Errors
///
/// Returns the first [`TemplateError`] found by [`Template::parse`] or
/// [`Template::signature`].
pub fn parse_signature(template: &str) -> Result<MessageSignature, TemplateError> {
    Template::parse(template)?.signature()
}

/// Parses the placeholder whose `{` is at `start`.
///
/// Returns the placeholder and the offset just past its closing brace.
fn parse_placeholder(chars: &[char], start: usize) -> Result<(Placeholder, usize), TemplateError> {
    let mut parts = [String::new(), String::new(), String::new()];
    let mut part = 0;
    let mut depth = 0usize;
    let mut quote_start = None;
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i];
        i += 1;

        if quote_start.is_some() {
            parts[part].push(c);
            if c == '\'' {
                quote_start = None;
            }
            continue;
        }

        match c {
            ',' if part < 2 => part += 1,
            '{' => {
                depth += 1;
                parts[part].push(c);
            }
            '}' if depth == 0 => {
                let [index, keyword, style] = parts;
                let placeholder = build_placeholder(
                    &index,
                    (part >= 1).then_some(keyword),
                    (part >= 2).then_some(style),
                    start,
                )?;
                return Ok((placeholder, i));
            }
            '}' => {
                depth -= 1;
                parts[part].push(c);
            }
            '\'' => {
                quote_start = Some(i - 1);
                parts[part].push(c);
            }
            _ => parts[part].push(c),
        }
    }

    match quote_start {
        Some(position) => Err(TemplateError::UnterminatedQuote { position }),
        None => Err(TemplateError::UnterminatedPlaceholder { position: start }),
    }
}

fn build_placeholder(
    index: &str,
    keyword: Option<String>,
    style: Option<String>,
    position: usize,
) -> Result<Placeholder, TemplateError> {
    let index_text = index.trim();
    if index_text.is_empty() || !index_text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TemplateError::InvalidIndex {
            index: index_text.to_string(),
            position,
        });
    }
    let index = index_text
        .parse::<usize>()
        .ok()
        .filter(|i| *i <= MAX_ARGUMENT_INDEX)
        .ok_or_else(|| TemplateError::IndexOutOfRange {
            index: index_text.parse::<usize>().unwrap_or(usize::MAX),
            max: MAX_ARGUMENT_INDEX,
        })?;

    let keyword = keyword
        .map(|k| k.trim().to_ascii_lowercase())
        .filter(|k| !k.is_empty());
    let Some(keyword) = keyword else {
        return Ok(Placeholder {
            index,
            format_type: None,
            style: None,
            arg_type: ArgType::Untyped,
        });
    };

    let arg_type = ArgType::from_keyword(&keyword).ok_or_else(|| TemplateError::UnknownFormatType {
        keyword: keyword.clone(),
        index,
    })?;

    Ok(Placeholder {
        index,
        format_type: Some(keyword),
        style: style.filter(|s| !s.trim().is_empty()),
        arg_type,
    })
}
