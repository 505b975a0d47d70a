//! Sort keys read from records.
//!
//! A [`Seekable`](crate::Seekable) record hands the sorter a [`Value`] per
//! field. Anything absent, null or unparseable is [`Value::None`], which the
//! sorter always places last.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Result, SeekerError};

/// A field's sort key, borrowing text from the record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Number(Number),
    Timestamp(Timestamp),
    Bool(bool),
    /// Absent, null, malformed or unknown field.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// `Value::Timestamp`, or `Value::None` when absent.
    pub fn timestamp_or_none(ts: Option<Timestamp>) -> Self {
        ts.map_or(Value::None, Value::Timestamp)
    }

    /// `Value::Number`, or `Value::None` when absent.
    ///
    /// ```
    /// use sift_seeker::{Number, Value};
    ///
    /// assert_eq!(Value::number_or_none(Some(3_i64)), Value::Number(Number::I64(3)));
    /// assert_eq!(Value::number_or_none(None::<u32>), Value::None);
    /// ```
    pub fn number_or_none<N: Into<Number>>(n: Option<N>) -> Self {
        n.map_or(Value::None, |n| Value::Number(n.into()))
    }
}

/// A numeric sort key.
///
/// Integers compare exactly; anything involving a float is compared as
/// `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// `None` if either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        use Number::*;
        match (self, other) {
            (I64(a), I64(b)) => Some(a.cmp(&b)),
            (U64(a), U64(b)) => Some(a.cmp(&b)),
            (I64(a), U64(b)) => Some(u64::try_from(a).map_or(Ordering::Less, |a| a.cmp(&b))),
            (U64(a), I64(b)) => Some(u64::try_from(b).map_or(Ordering::Greater, |b| a.cmp(&b))),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// An absolute instant, in milliseconds since the Unix epoch.
///
/// Records usually carry dates as API strings; [`Timestamp::parse`] turns
/// them into instants so differently formatted dates still order correctly.
///
/// ```
/// use sift_seeker::Timestamp;
///
/// let jan = Timestamp::parse("2024-01-01").unwrap();
/// let feb = Timestamp::parse("2024-02-01T00:00:00Z").unwrap();
/// assert!(jan < feb);
/// assert!(Timestamp::parse("last tuesday").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

/// Date-times without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parses RFC 3339, a naive date-time, or a bare `YYYY-MM-DD` date
    /// (midnight UTC). Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let s = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp(dt.timestamp_millis()));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            });

        naive
            .map(|dt| Timestamp(dt.and_utc().timestamp_millis()))
            .ok_or_else(|| SeekerError::InvalidTimestamp(raw.to_string()))
    }
}
