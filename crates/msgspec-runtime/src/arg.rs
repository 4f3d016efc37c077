//! Argument values passed to message templates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// A numeric argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Exact integer.
    Int(i64),
    /// Floating point value.
    Float(f64),
}

impl Number {
    /// Value as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! number_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $ty) -> Self {
                    i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
                }
            }
        )*
    };
}

number_from_wide_int!(u64, usize, isize);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A date/time argument, stored as local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeValue(NaiveDateTime);

impl DateTimeValue {
    /// Wraps a wall-clock date and time.
    #[must_use]
    pub const fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// The wrapped value.
    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for DateTimeValue {
    fn from(value: NaiveDate) -> Self {
        Self(value.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateTimeValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.naive_local())
    }
}

/// A positional argument of a message.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MessageArg {
    /// Not supplied; the placeholder is rendered as `{n}`.
    #[default]
    Missing,
    /// Text, inserted as is.
    Text(String),
    /// A number, formatted with the locale's conventions.
    Number(Number),
    /// A date/time, formatted with the locale's conventions.
    Date(DateTimeValue),
}

impl MessageArg {
    /// Short name of the value kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Date(_) => "date",
        }
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Number> for MessageArg {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<DateTimeValue> for MessageArg {
    fn from(value: DateTimeValue) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for MessageArg {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.into())
    }
}

impl From<NaiveDateTime> for MessageArg {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value.into())
    }
}

macro_rules! arg_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MessageArg {
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

arg_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);
