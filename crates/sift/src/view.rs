//! Host-side list view state.
//!
//! [`ListView`] is what a presentation layer holds for one list: the
//! current [`QueryState`](crate::seeker::QueryState), the codec that keeps
//! it in the URL, and the engine that recomputes rows. Every mutation
//! replaces the state wholesale and hands back the new query string, so the
//! host only has to write it to the address bar and re-render.
//!
//! ```rust
//! use sift::users::{User, UserFilterKey, UserSortField, Users};
//! use sift::view::ListView;
//!
//! let mut view = ListView::<Users>::new();
//! view.load("?isVerified=true");
//!
//! assert_eq!(view.set_sort(UserSortField::CreatedAt), "isVerified=true&sortDirection=asc");
//! assert_eq!(view.set_filter(UserFilterKey::IsVerified, ""), "sortDirection=asc");
//! assert_eq!(view.reset(), "");
//!
//! let records: Vec<User> = Vec::new();
//! assert!(view.rows(&records).is_empty());
//! ```

use serde::Serialize;
use tracing::debug;

use crate::seeker::{Choice, FilterSet, QueryEngine, Schema, StateCodec, StateOf};

/// Filter key type of a schema.
pub type FilterKey<S> = <<S as Schema>::Filters as FilterSet>::Key;

/// Counts for a "showing X of Y" line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Records in the snapshot.
    pub total: usize,
    /// Records passing the search text and filters.
    pub shown: usize,
    /// Active filters as `key=value`, in key order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}

impl Summary {
    /// Applied filters summary, e.g. `status=active, isVerified=true`.
    pub fn filter_summary(&self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(", "))
        }
    }
}

/// The query state of one list view plus the machinery around it.
pub struct ListView<S: Schema> {
    state: StateOf<S>,
    codec: StateCodec<S::Filters, S::SortField>,
    engine: QueryEngine<S>,
}

impl<S: Schema> Default for ListView<S> {
    fn default() -> Self {
        Self::with_codec(StateCodec::new())
    }
}

impl<S: Schema> std::fmt::Debug for ListView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("state", &self.state)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl<S: Schema> ListView<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view whose codec uses custom parameter names.
    pub fn with_codec(codec: StateCodec<S::Filters, S::SortField>) -> Self {
        ListView {
            state: StateOf::<S>::default(),
            codec,
            engine: QueryEngine::new(),
        }
    }

    /// Replaces the state with one decoded from a query string.
    ///
    /// Malformed parameters fall back to their defaults.
    pub fn load(&mut self, query: &str) -> &StateOf<S> {
        self.state = self.codec.decode_query_string(query);
        debug!(query, "list view loaded");
        &self.state
    }

    pub fn state(&self) -> &StateOf<S> {
        &self.state
    }

    pub fn codec(&self) -> &StateCodec<S::Filters, S::SortField> {
        &self.codec
    }

    /// The shareable query string for the current state.
    pub fn query_string(&self) -> String {
        self.codec.encode_query_string(&self.state)
    }

    /// Replaces the whole state.
    pub fn replace(&mut self, state: StateOf<S>) -> String {
        self.state = state;
        let query = self.query_string();
        debug!(query = %query, "list view state changed");
        query
    }

    pub fn set_search(&mut self, text: &str) -> String {
        let next = self.state.set_search(text);
        self.replace(next)
    }

    pub fn set_filter(&mut self, key: FilterKey<S>, raw: &str) -> String {
        let next = self.state.set_filter(key, raw);
        self.replace(next)
    }

    /// Like [`set_filter`](Self::set_filter) with the key given by its code.
    ///
    /// Unknown keys leave the state unchanged.
    pub fn set_filter_by_name(&mut self, name: &str, raw: &str) -> String {
        match <FilterKey<S> as Choice>::from_code(name) {
            Some(key) => self.set_filter(key, raw),
            None => {
                debug!(key = name, "unknown filter key ignored");
                self.query_string()
            }
        }
    }

    /// Sorts by `field`, flipping direction when it already is the sort field.
    pub fn set_sort(&mut self, field: S::SortField) -> String {
        let next = self.state.set_sort(field);
        self.replace(next)
    }

    /// Like [`set_sort`](Self::set_sort) with the field given by its code.
    ///
    /// Unknown fields leave the state unchanged.
    pub fn set_sort_by_name(&mut self, raw: &str) -> String {
        let next = self.state.set_sort_by_code(raw);
        self.replace(next)
    }

    /// Restores every default; the query string becomes empty.
    pub fn reset(&mut self) -> String {
        let next = self.state.reset();
        self.replace(next)
    }

    /// Rows for the current state.
    pub fn rows<'a>(&self, records: &'a [S::Record]) -> Vec<&'a S::Record> {
        self.engine.apply(records, &self.state)
    }

    pub fn summary(&self, records: &[S::Record]) -> Summary {
        let filters = &self.state.filters;
        Summary {
            total: records.len(),
            shown: self.engine.count(records, &self.state),
            filters: filters
                .active()
                .into_iter()
                .filter_map(|key| {
                    filters
                        .code(key)
                        .map(|value| format!("{}={}", key.code(), value))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{Business, User, UserFilterKey, UserSortField, Users};

    fn user(id: u64, verified: Option<bool>, created_at: &str) -> User {
        User {
            id,
            business: verified.map(|v| Business {
                is_verified: Some(v),
                ..Business::default()
            }),
            created_at: Some(created_at.to_string()),
            ..User::default()
        }
    }

    #[test]
    fn mutations_return_query_strings() {
        let mut view = ListView::<Users>::new();
        assert_eq!(view.query_string(), "");
        assert_eq!(view.set_search("dana"), "q=dana");
        assert_eq!(
            view.set_filter(UserFilterKey::Status, "active"),
            "q=dana&status=active"
        );
        assert_eq!(view.set_search(""), "status=active");
        assert_eq!(view.reset(), "");
        assert!(view.state().is_default());
    }

    #[test]
    fn sort_toggles_and_switches() {
        let mut view = ListView::<Users>::new();
        assert_eq!(
            view.set_sort(UserSortField::FutureAppointments),
            "sortField=futureAppointments"
        );
        assert_eq!(
            view.set_sort(UserSortField::FutureAppointments),
            "sortDirection=asc&sortField=futureAppointments"
        );
        assert_eq!(view.set_sort_by_name("createdAt"), "");
        assert_eq!(view.set_sort_by_name("email"), "");
    }

    #[test]
    fn unknown_filter_name_is_a_no_op() {
        let mut view = ListView::<Users>::new();
        view.load("isVerified=false");
        assert_eq!(view.set_filter_by_name("colour", "red"), "isVerified=false");
        assert_eq!(view.set_filter_by_name("isVerified", "true"), "isVerified=true");
    }

    #[test]
    fn rows_and_summary_share_the_pipeline() {
        let records = vec![
            user(1, Some(true), "2024-01-01"),
            user(2, None, "2024-03-01"),
            user(3, Some(true), "2024-02-01"),
        ];
        let mut view = ListView::<Users>::new();
        view.load("?isVerified=true");

        let ids: Vec<u64> = view.rows(&records).iter().map(|u| u.id).collect();
        assert_eq!(ids, [3, 1]);

        let summary = view.summary(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.shown, 2);
        assert_eq!(summary.filter_summary().as_deref(), Some("isVerified=true"));
    }

    #[test]
    fn summary_serializes_without_empty_filters() {
        let view = ListView::<Users>::new();
        let json = serde_json::to_value(view.summary(&[])).unwrap();
        assert_eq!(json, serde_json::json!({"total": 0, "shown": 0}));
    }
}
