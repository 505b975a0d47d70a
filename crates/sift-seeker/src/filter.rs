//! Filter dimensions and the predicates that apply them.
//!
//! A list view has a fixed number of filter dimensions. Each one holds a
//! [`FilterValue`]: either `Unset` (matches everything) or one member of a
//! closed [`Choice`] set. A [`FilterSet`] is the struct holding all of a
//! view's dimensions, and a [`PredicateSet`] maps each dimension's key to the
//! test it applies to a record.
//!
//! Absence policy, applied uniformly by the helper constructors:
//!
//! - an `Unset` dimension passes every record;
//! - an absent optional flag on the record reads as `false`;
//! - an absent optional code on the record matches no concrete value.

use std::fmt::{self, Debug};

use crate::traits::Choice;

/// The selected value of one filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterValue<T> {
    /// No selection; the dimension does not narrow results.
    Unset,
    /// Exactly this member is selected.
    Is(T),
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        FilterValue::Unset
    }
}

impl<T: Choice> FilterValue<T> {
    /// Parses a raw code, failing open.
    ///
    /// Unknown codes and the empty string give `Unset`.
    pub fn parse(raw: &str) -> Self {
        match T::from_code(raw) {
            Some(value) => FilterValue::Is(value),
            None => FilterValue::Unset,
        }
    }

    /// The code of the selected member, `None` when unset.
    pub fn code(self) -> Option<&'static str> {
        self.get().map(Choice::code)
    }

    /// The selected member, if any.
    pub fn get(self) -> Option<T> {
        match self {
            FilterValue::Unset => None,
            FilterValue::Is(value) => Some(value),
        }
    }

    /// Returns `true` if nothing is selected.
    pub fn is_unset(self) -> bool {
        matches!(self, FilterValue::Unset)
    }

    /// Runs `test` against the selected member; `Unset` always admits.
    pub fn admits(self, test: impl FnOnce(T) -> bool) -> bool {
        match self {
            FilterValue::Unset => true,
            FilterValue::Is(value) => test(value),
        }
    }
}

impl<T> From<T> for FilterValue<T> {
    fn from(value: T) -> Self {
        FilterValue::Is(value)
    }
}

/// The full set of filter dimensions for one list view.
///
/// Implementors are plain structs with one [`FilterValue`] field per key.
/// Every key in `Key::ALL` must be readable and assignable, so the set is
/// never partial.
pub trait FilterSet: Default + Clone + PartialEq + Debug + 'static {
    /// The closed set of dimension names; their codes double as
    /// query-string parameter names.
    type Key: Choice;

    /// The code selected for `key`, `None` when unset.
    fn code(&self, key: Self::Key) -> Option<&'static str>;

    /// Assigns `key` from a raw code, failing open to `Unset`.
    fn assign(&mut self, key: Self::Key, raw: &str);

    /// Keys with a concrete selection, in `Key::ALL` order.
    fn active(&self) -> Vec<Self::Key> {
        Self::Key::ALL
            .iter()
            .copied()
            .filter(|key| self.code(*key).is_some())
            .collect()
    }

    /// Returns `true` if every dimension is unset.
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

type Test<R, S> = Box<dyn Fn(&R, &S) -> bool + Send + Sync>;

/// The test applied for one filter dimension.
pub struct Predicate<R, S: FilterSet> {
    key: S::Key,
    test: Test<R, S>,
}

impl<R: 'static, S: FilterSet> Predicate<R, S> {
    /// Creates a predicate from a selector and a typed test.
    ///
    /// `test` only runs when the dimension holds a concrete value.
    pub fn new<T, Sel, F>(key: S::Key, select: Sel, test: F) -> Self
    where
        T: Choice,
        Sel: Fn(&S) -> FilterValue<T> + Send + Sync + 'static,
        F: Fn(&R, T) -> bool + Send + Sync + 'static,
    {
        Predicate {
            key,
            test: Box::new(move |record: &R, filters: &S| {
                select(filters).admits(|value| test(record, value))
            }),
        }
    }

    /// Exact match of a string-coded record field against the selection.
    ///
    /// An absent field matches no concrete value.
    pub fn code_eq<T, Sel, F>(key: S::Key, select: Sel, field: F) -> Self
    where
        T: Choice,
        Sel: Fn(&S) -> FilterValue<T> + Send + Sync + 'static,
        F: Fn(&R) -> Option<&str> + Send + Sync + 'static,
    {
        Self::new(key, select, move |record, value: T| {
            field(record) == Some(value.code())
        })
    }

    /// Presence/truthiness of an optional record flag.
    ///
    /// An absent flag (or absent parent object) reads as `false`.
    pub fn flag<Sel, F>(key: S::Key, select: Sel, field: F) -> Self
    where
        Sel: Fn(&S) -> FilterValue<bool> + Send + Sync + 'static,
        F: Fn(&R) -> Option<bool> + Send + Sync + 'static,
    {
        Self::new(key, select, move |record, wanted: bool| {
            field(record).unwrap_or(false) == wanted
        })
    }
}

impl<R, S: FilterSet> Predicate<R, S> {
    /// The dimension this predicate applies.
    pub fn key(&self) -> S::Key {
        self.key
    }

    /// Evaluates the predicate.
    pub fn matches(&self, record: &R, filters: &S) -> bool {
        (self.test)(record, filters)
    }
}

impl<R, S: FilterSet> Debug for Predicate<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// One predicate per filter dimension, combined with logical AND.
pub struct PredicateSet<R, S: FilterSet> {
    predicates: Vec<Predicate<R, S>>,
}

impl<R, S: FilterSet> Default for PredicateSet<R, S> {
    fn default() -> Self {
        PredicateSet {
            predicates: Vec::new(),
        }
    }
}

impl<R, S: FilterSet> PredicateSet<R, S> {
    /// Creates an empty set (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate, replacing any earlier one for the same key.
    pub fn with(mut self, predicate: Predicate<R, S>) -> Self {
        self.predicates.retain(|p| p.key != predicate.key);
        self.predicates.push(predicate);
        self
    }

    /// Returns `true` if every predicate passes.
    pub fn matches(&self, record: &R, filters: &S) -> bool {
        self.predicates.iter().all(|p| p.matches(record, filters))
    }

    /// The keys that have a predicate.
    pub fn keys(&self) -> Vec<S::Key> {
        self.predicates.iter().map(Predicate::key).collect()
    }

    /// Keys declared by the filter set that have no predicate.
    pub fn missing_keys(&self) -> Vec<S::Key> {
        S::Key::ALL
            .iter()
            .copied()
            .filter(|key| self.predicates.iter().all(|p| p.key != *key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<R, S: FilterSet> Debug for PredicateSet<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.predicates).finish()
    }
}
