//! The complete, serializable description of a list view's selection.

use crate::filter::FilterSet;
use crate::sort::SortSpec;
use crate::traits::Choice;

/// Search text, filter selections and sort order for one list view.
///
/// `QueryState` is a value: every setter returns a new state and leaves the
/// receiver untouched, so a host can keep the previous state for undo or
/// diffing. Every filter dimension is always present (unset by default).
///
/// ```
/// use sift_seeker::{Choice, Dir, FilterSet, FilterValue, QueryState, SortSpec};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Key { Active }
///
/// impl Choice for Key {
///     const KIND: &'static str = "filter";
///     const ALL: &'static [Self] = &[Key::Active];
///     fn code(self) -> &'static str { "active" }
/// }
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Filters { active: FilterValue<bool> }
///
/// impl FilterSet for Filters {
///     type Key = Key;
///     fn code(&self, _: Key) -> Option<&'static str> { self.active.code() }
///     fn assign(&mut self, _: Key, raw: &str) { self.active = FilterValue::parse(raw) }
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// enum Field { #[default] Joined }
///
/// impl Choice for Field {
///     const KIND: &'static str = "sort field";
///     const ALL: &'static [Self] = &[Field::Joined];
///     fn code(self) -> &'static str { "joined" }
/// }
///
/// let state: QueryState<Filters, Field> = QueryState::default();
/// let next = state
///     .set_search("dana")
///     .set_filter(Key::Active, "true")
///     .set_sort(Field::Joined);
///
/// assert_eq!(next.search, "dana");
/// assert_eq!(next.filters.active, FilterValue::Is(true));
/// assert_eq!(next.sort, SortSpec::new(Field::Joined, Dir::Asc));
/// assert!(next.reset().is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState<S, F> {
    /// Free-text query, as typed.
    pub search: String,
    /// One selection per filter dimension.
    pub filters: S,
    /// Current sort order.
    pub sort: SortSpec<F>,
}

impl<S: FilterSet, F: Choice + Default> QueryState<S, F> {
    /// Returns `true` if this is the canonical default state.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// A state with new search text.
    pub fn set_search(&self, text: impl Into<String>) -> Self {
        QueryState {
            search: text.into(),
            ..self.clone()
        }
    }

    /// A state with one filter dimension set from a raw code.
    ///
    /// Unknown codes (and `""`) clear the dimension.
    pub fn set_filter(&self, key: S::Key, raw: &str) -> Self {
        let mut filters = self.filters.clone();
        filters.assign(key, raw);
        QueryState {
            filters,
            ..self.clone()
        }
    }

    /// A state with one filter dimension cleared.
    pub fn clear_filter(&self, key: S::Key) -> Self {
        self.set_filter(key, "")
    }

    /// A state sorted by `field`, flipping direction if it is already the
    /// sort field.
    pub fn set_sort(&self, field: F) -> Self {
        QueryState {
            sort: self.sort.toggled(field),
            ..self.clone()
        }
    }

    /// Like [`set_sort`](Self::set_sort) for a raw field code.
    ///
    /// Unknown codes return an unchanged copy.
    pub fn set_sort_by_code(&self, code: &str) -> Self {
        match F::from_code(code) {
            Some(field) => self.set_sort(field),
            None => self.clone(),
        }
    }

    /// A state with an explicit sort spec.
    pub fn with_sort(&self, sort: SortSpec<F>) -> Self {
        QueryState {
            sort,
            ..self.clone()
        }
    }

    /// The canonical default state.
    pub fn reset(&self) -> Self {
        Self::default()
    }
}
