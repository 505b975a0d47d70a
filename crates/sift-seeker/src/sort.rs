//! Sort specification and record ordering.
//!
//! [`SortSpec`] names one field and a [`Dir`]; [`Sorter`] turns it into a
//! total order over records and sorts stably.
//!
//! Ordering rules:
//!
//! - two present values of the same kind compare naturally, and `Desc`
//!   reverses that result;
//! - [`Value::None`] (absent field, malformed timestamp, NaN) sorts after
//!   every present value in both directions;
//! - a field the record doesn't know reads as `None` on both sides, so an
//!   unknown sort field leaves the input order unchanged.

use std::cmp::Ordering;

use crate::traits::{Choice, Seekable};
use crate::value::{Number, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    Asc,
    /// Descending order (largest first). Newest-first is the usual default
    /// for list views.
    #[default]
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// The opposite direction.
    pub fn toggle(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }
}

impl Choice for Dir {
    const KIND: &'static str = "sort direction";
    const ALL: &'static [Self] = &[Dir::Asc, Dir::Desc];

    fn code(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A field to sort by and the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortSpec<F> {
    pub field: F,
    pub dir: Dir,
}

impl<F: Choice> SortSpec<F> {
    pub fn new(field: F, dir: Dir) -> Self {
        SortSpec { field, dir }
    }

    pub fn asc(field: F) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    pub fn desc(field: F) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// The spec after a click on `field`'s column header.
    ///
    /// Clicking the current field flips the direction; clicking another
    /// field selects it with the default direction.
    pub fn toggled(self, field: F) -> Self {
        if self.field == field {
            SortSpec::new(field, self.dir.toggle())
        } else {
            SortSpec::new(field, Dir::default())
        }
    }

    /// A [`Sorter`] for this spec.
    pub fn sorter(self) -> Sorter {
        Sorter::by_name(self.field.code(), self.dir)
    }
}

/// Orders records by one named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorter {
    field: String,
    dir: Dir,
}

impl Sorter {
    /// Creates a sorter for an arbitrary field name.
    ///
    /// Names the records don't recognize produce an always-equal order.
    pub fn by_name(field: impl Into<String>, dir: Dir) -> Self {
        Sorter {
            field: field.into(),
            dir,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Compares two records by this sorter's field and direction.
    pub fn compare<R: Seekable>(&self, a: &R, b: &R) -> Ordering {
        compare_keys(
            &a.seeker_field_value(&self.field),
            &b.seeker_field_value(&self.field),
            self.dir,
        )
    }

    /// Returns a comparator closure over records.
    pub fn comparator<'s, R: Seekable + 's>(&'s self) -> impl Fn(&R, &R) -> Ordering + 's {
        move |a, b| self.compare(a, b)
    }

    /// Stable-sorts references to records in place.
    ///
    /// Each record's key is read once, not once per comparison; this
    /// matters for keys that parse a timestamp string.
    pub fn sort<'a, R: Seekable>(&self, records: &mut Vec<&'a R>) {
        let mut keyed: Vec<(Value<'a>, &'a R)> = records
            .drain(..)
            .map(|record| (record.seeker_field_value(&self.field), record))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, self.dir));

        records.extend(keyed.into_iter().map(|(_, record)| record));
    }
}

/// Compares two present values of the same kind.
///
/// Returns `None` for a kind mismatch, a NaN, or a `None` value.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total order over sort keys, applying `dir` to present values only.
pub fn compare_keys(a: &Value<'_>, b: &Value<'_>, dir: Dir) -> Ordering {
    match (is_missing(a), is_missing(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match compare_values(a, b) {
            Some(ordering) => dir.apply(ordering),
            // Mixed kinds: rank by kind so the order stays total.
            None => dir.apply(kind_rank(a).cmp(&kind_rank(b))),
        },
    }
}

fn is_missing(value: &Value<'_>) -> bool {
    match value {
        Value::None => true,
        Value::Number(Number::F64(n)) => n.is_nan(),
        _ => false,
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::String(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Bool(_) => 3,
        Value::None => 4,
    }
}
