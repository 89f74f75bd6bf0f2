//! Runtime value types for answer comparison.
//!
//! [`Answer`] is the primitive value a respondent gave to a question, as it
//! arrives from the submissions API: text, a number, or some other JSON shape
//! the engine keeps but never compares. [`Number`] and [`Timestamp`] are the
//! normalized forms that numeric and date comparisons run on.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Primitive answer value, owned by its question.
///
/// # Example
///
/// ```
/// use formsift_filter::{Answer, Number};
///
/// let answer: Answer = serde_json::from_str("30").unwrap();
/// assert_eq!(answer, Answer::Number(Number::I64(30)));
///
/// let answer: Answer = serde_json::from_str("\"30\"").unwrap();
/// assert_eq!(answer.as_str(), Some("30"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Numeric answer.
    Number(Number),
    /// Textual answer (includes ISO-8601 date strings).
    Text(String),
    /// Any other JSON shape (lists, objects, booleans).
    Other(serde_json::Value),
}

impl Answer {
    /// Extracts the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the answer as a number: numbers as-is, text through
    /// [`Number::parse`].
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(s) => Number::parse(s),
            Answer::Other(_) => None,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Number(n) => write!(f, "{}", n),
            Answer::Text(s) => write!(f, "{}", s),
            Answer::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

impl From<Number> for Answer {
    fn from(n: Number) -> Self {
        Answer::Number(n)
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Answer::Number(Number::from(n))
    }
}

impl From<i32> for Answer {
    fn from(n: i32) -> Self {
        Answer::Number(Number::from(n))
    }
}

impl From<u64> for Answer {
    fn from(n: u64) -> Self {
        Answer::Number(Number::from(n))
    }
}

impl From<f64> for Answer {
    fn from(n: f64) -> Self {
        Answer::Number(Number::from(n))
    }
}

/// A numeric answer or clause operand.
///
/// Integers stay exact (`I64`, or `U64` past `i64::MAX`); anything with a
/// fraction or exponent is `F64`. Any two integers compare exactly; a pair
/// involving `F64` compares through `f64`, so `I64(30)` equals `F64(30.0)`.
/// `NaN` is unordered and unequal to everything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Parses a decimal literal, ignoring surrounding whitespace.
    ///
    /// Integers are kept exact; anything else goes through `f64`.
    /// Non-finite results (`NaN`, `inf`) are not numbers for filtering.
    ///
    /// ```
    /// use formsift_filter::Number;
    ///
    /// assert_eq!(Number::parse(" 31 "), Some(Number::I64(31)));
    /// assert_eq!(Number::parse("2.5"), Some(Number::F64(2.5)));
    /// assert_eq!(Number::parse("31 years"), None);
    /// assert_eq!(Number::parse("NaN"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Number> {
        let literal = input.trim();
        if literal.is_empty() {
            return None;
        }
        literal
            .parse::<i64>()
            .map(Number::I64)
            .or_else(|_| literal.parse::<u64>().map(Number::U64))
            .ok()
            .or_else(|| {
                literal
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Number::F64)
            })
    }

    /// Widens to `f64`; large integers may lose precision.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Orders two numbers, `None` when either side is `NaN`.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(lhs), Number::I64(rhs)) => Some(lhs.cmp(&rhs)),
            (Number::U64(lhs), Number::U64(rhs)) => Some(lhs.cmp(&rhs)),
            (Number::I64(lhs), Number::U64(rhs)) => Some(signed_cmp_unsigned(lhs, rhs)),
            (Number::U64(lhs), Number::I64(rhs)) => {
                Some(signed_cmp_unsigned(rhs, lhs).reverse())
            }
            (lhs, rhs) => lhs.to_f64().partial_cmp(&rhs.to_f64()),
        }
    }
}

fn signed_cmp_unsigned(lhs: i64, rhs: u64) -> Ordering {
    match u64::try_from(lhs) {
        Ok(lhs) => lhs.cmp(&rhs),
        Err(_) => Ordering::Less,
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(*other), Some(Ordering::Equal))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($($source:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(i32 => I64 as i64, i64 => I64 as i64, u64 => U64 as u64, f64 => F64 as f64);

/// A UTC instant in milliseconds, the common form every date answer and
/// date operand is normalized to before comparison.
///
/// Two differently written strings for the same moment compare equal:
///
/// ```
/// use formsift_filter::Timestamp;
///
/// let midnight = Timestamp::parse("2024-01-01").unwrap();
/// let explicit = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
/// assert_eq!(midnight, explicit);
/// assert!(midnight < Timestamp::parse("2024-01-01T00:00:00.001Z").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Milliseconds since the Unix epoch.
    pub fn millis(self) -> i64 {
        self.0
    }

    /// Parses a date or date-time string into a UTC instant.
    ///
    /// Accepted forms, tried in order:
    /// 1. RFC 3339 with an offset: `2024-01-01T10:00:00Z`, `2024-01-01T12:00:00+02:00`
    /// 2. Date-time without offset, read as UTC: `2024-01-01T10:00:00`,
    ///    `2024-01-01T10:00:00.250`, `2024-01-01 10:00:00`, `2024-01-01T10:00`
    /// 3. Date only, at midnight UTC: `2024-01-01`
    /// 4. RFC 2822: `Mon, 01 Jan 2024 00:00:00 +0000`
    ///
    /// Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Timestamp> {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(Timestamp(dt.timestamp_millis()));
        }

        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Some(Timestamp(dt.and_utc().timestamp_millis()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Timestamp(midnight.and_utc().timestamp_millis()));
        }

        DateTime::parse_from_rfc2822(input)
            .ok()
            .map(|dt| Timestamp(dt.timestamp_millis()))
    }
}

const NAIVE_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
