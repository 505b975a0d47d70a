//! Query execution.
//!
//! [`QueryEngine::apply`] turns a record snapshot and a [`QueryState`] into
//! the ordered view, in a fixed pipeline:
//!
//! 1. keep records matching the free-text query;
//! 2. keep records passing every filter predicate;
//! 3. stable-sort by the state's sort spec.
//!
//! The engine holds no mutable state, never touches its input, and can be
//! shared across threads when the schema's predicates allow it.

use tracing::trace;

use crate::filter::{FilterSet, PredicateSet};
use crate::state::QueryState;
use crate::text::TextMatcher;
use crate::traits::{Choice, Searchable, Seekable};

/// Binds the types of one list view together.
pub trait Schema: 'static {
    /// The records the view lists.
    type Record: Seekable + Searchable + 'static;
    /// The view's filter dimensions.
    type Filters: FilterSet;
    /// The fields the view can sort by; `Default` is the initial sort field.
    type SortField: Choice + Default;

    /// One predicate per filter dimension.
    fn predicates() -> PredicateSet<Self::Record, Self::Filters>;
}

/// The query state type of a schema.
pub type StateOf<S> = QueryState<<S as Schema>::Filters, <S as Schema>::SortField>;

/// Applies query states to record snapshots for one schema.
pub struct QueryEngine<S: Schema> {
    predicates: PredicateSet<S::Record, S::Filters>,
}

impl<S: Schema> Default for QueryEngine<S> {
    fn default() -> Self {
        QueryEngine {
            predicates: S::predicates(),
        }
    }
}

impl<S: Schema> std::fmt::Debug for QueryEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("predicates", &self.predicates)
            .finish()
    }
}

impl<S: Schema> QueryEngine<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predicates(&self) -> &PredicateSet<S::Record, S::Filters> {
        &self.predicates
    }

    /// Returns `true` if a record passes the search text and every filter.
    pub fn matches(&self, record: &S::Record, state: &StateOf<S>) -> bool {
        TextMatcher::new(&state.search).matches(record)
            && self.predicates.matches(record, &state.filters)
    }

    /// Filters and orders a snapshot.
    ///
    /// Returns references into `records` in display order; the input slice
    /// keeps its own order.
    pub fn apply<'a>(&self, records: &'a [S::Record], state: &StateOf<S>) -> Vec<&'a S::Record> {
        let matcher = TextMatcher::new(&state.search);
        let mut rows: Vec<&'a S::Record> = records
            .iter()
            .filter(|record| matcher.matches(*record))
            .collect();
        let after_search = rows.len();

        rows.retain(|record| self.predicates.matches(record, &state.filters));
        let after_filters = rows.len();

        state.sort.sorter().sort(&mut rows);

        trace!(
            total = records.len(),
            after_search,
            after_filters,
            sort = state.sort.field.code(),
            dir = %state.sort.dir,
            "query applied"
        );
        rows
    }

    /// Like [`apply`](Self::apply), cloning the resulting records.
    pub fn apply_cloned(&self, records: &[S::Record], state: &StateOf<S>) -> Vec<S::Record>
    where
        S::Record: Clone,
    {
        self.apply(records, state).into_iter().cloned().collect()
    }

    /// Counts matching records without sorting.
    pub fn count(&self, records: &[S::Record], state: &StateOf<S>) -> usize {
        let matcher = TextMatcher::new(&state.search);
        records
            .iter()
            .filter(|record| matcher.matches(*record))
            .filter(|record| self.predicates.matches(record, &state.filters))
            .count()
    }
}
