//! Traits connecting application records and enums to the engine.
//!
//! - [`Seekable`] exposes named field values for sorting.
//! - [`Searchable`] lists the text-bearing fields for free-text search.
//! - [`Choice`] describes a closed, string-coded set of values (filter
//!   values, filter keys, sort fields). It is usually derived with
//!   `#[derive(Choice)]` from `sift-macros`.

use std::fmt::Debug;

use crate::error::{Result, SeekerError};
use crate::value::Value;

/// Records whose sort keys can be read by field name.
///
/// ```
/// use sift_seeker::{Seekable, Timestamp, Value};
///
/// struct Invoice {
///     issued: String,
///     lines: Option<u32>,
/// }
///
/// impl Seekable for Invoice {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "issued" => Value::timestamp_or_none(Timestamp::parse(&self.issued).ok()),
///             "lines" => Value::number_or_none(self.lines),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let draft = Invoice { issued: "soon".into(), lines: None };
/// assert!(draft.seeker_field_value("issued").is_none());
/// ```
pub trait Seekable {
    /// The sort key for `field`.
    ///
    /// Unknown fields, absent values and malformed data all read as
    /// [`Value::None`].
    fn seeker_field_value(&self, field: &str) -> Value<'_>;
}

/// A text-bearing field offered to the free-text matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField<'a> {
    /// Plain text, matched case-insensitively.
    Text(Option<&'a str>),
    /// Phone number, matched on the raw value and on its digits only.
    Phone(Option<&'a str>),
}

/// Trait for records that take part in free-text search.
pub trait Searchable {
    /// The text-bearing fields, in a fixed order.
    ///
    /// Absent fields are passed as `None` and behave as empty strings.
    fn search_fields(&self) -> Vec<SearchField<'_>>;
}

/// A closed set of values with stable string codes.
///
/// Codes are what the query string carries, so they must be unique within
/// a type. `from_code` is an exact, case-sensitive lookup.
///
/// ```
/// use sift_seeker::Choice;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Cycle {
///     Monthly,
///     Yearly,
/// }
///
/// impl Choice for Cycle {
///     const KIND: &'static str = "cycle";
///     const ALL: &'static [Self] = &[Cycle::Monthly, Cycle::Yearly];
///
///     fn code(self) -> &'static str {
///         match self {
///             Cycle::Monthly => "monthly",
///             Cycle::Yearly => "yearly",
///         }
///     }
/// }
///
/// assert_eq!(Cycle::from_code("yearly"), Some(Cycle::Yearly));
/// assert_eq!(Cycle::from_code("Yearly"), None);
/// ```
pub trait Choice: Copy + Eq + Debug + 'static {
    /// Human-readable name of the set, used in error messages.
    const KIND: &'static str;

    /// Every member of the set, in display order.
    const ALL: &'static [Self];

    /// The stable string code of this member.
    fn code(self) -> &'static str;

    /// Looks up a member by its code.
    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.code() == code)
    }
}

impl Choice for bool {
    const KIND: &'static str = "boolean";
    const ALL: &'static [Self] = &[true, false];

    fn code(self) -> &'static str {
        if self {
            "true"
        } else {
            "false"
        }
    }
}

/// Strictly parses a code, reporting unknown values as an error.
///
/// The query engine never calls this; it is for callers that want to
/// reject bad input instead of falling back to a default.
pub fn parse_choice<T: Choice>(code: &str) -> Result<T> {
    T::from_code(code).ok_or_else(|| SeekerError::UnknownChoice {
        kind: T::KIND,
        code: code.to_string(),
    })
}
