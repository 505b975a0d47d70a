//! Seeker - search, filter and sort engine for list views.
//!
//! Seeker turns an in-memory snapshot of records and a [`QueryState`] into
//! the ordered rows a list view shows, and keeps that state in a flat,
//! URL-safe form so it survives reloads and can be shared as a link.
//!
//! - Free-text search: case-insensitive substring match over a record's
//!   text fields, with digit-aware phone matching
//! - Filter dimensions: each either unset or one member of a closed set,
//!   combined with AND
//! - Single-field sorting, stable, with absent values last
//! - Fail-open decoding: bad parameters reset one dimension, never error
//!
//! # Quick Start
//!
//! ```rust
//! use sift_seeker::{
//!     Choice, FilterSet, FilterValue, Predicate, PredicateSet, QueryEngine, Schema,
//!     SearchField, Searchable, Seekable, StateCodec, StateOf, Timestamp, Value,
//! };
//!
//! struct Member {
//!     name: String,
//!     joined: String,
//!     verified: Option<bool>,
//! }
//!
//! impl Seekable for Member {
//!     fn seeker_field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "joined" => Value::timestamp_or_none(Timestamp::parse(&self.joined).ok()),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! impl Searchable for Member {
//!     fn search_fields(&self) -> Vec<SearchField<'_>> {
//!         vec![SearchField::Text(Some(&self.name))]
//!     }
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Key { Verified }
//!
//! impl Choice for Key {
//!     const KIND: &'static str = "filter";
//!     const ALL: &'static [Self] = &[Key::Verified];
//!     fn code(self) -> &'static str { "verified" }
//! }
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Filters { verified: FilterValue<bool> }
//!
//! impl FilterSet for Filters {
//!     type Key = Key;
//!     fn code(&self, _: Key) -> Option<&'static str> { self.verified.code() }
//!     fn assign(&mut self, _: Key, raw: &str) { self.verified = FilterValue::parse(raw) }
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
//! enum Field { #[default] Joined }
//!
//! impl Choice for Field {
//!     const KIND: &'static str = "sort field";
//!     const ALL: &'static [Self] = &[Field::Joined];
//!     fn code(self) -> &'static str { "joined" }
//! }
//!
//! struct Members;
//!
//! impl Schema for Members {
//!     type Record = Member;
//!     type Filters = Filters;
//!     type SortField = Field;
//!
//!     fn predicates() -> PredicateSet<Member, Filters> {
//!         PredicateSet::new().with(Predicate::flag(
//!             Key::Verified,
//!             |f: &Filters| f.verified,
//!             |m: &Member| m.verified,
//!         ))
//!     }
//! }
//!
//! let members = vec![
//!     Member { name: "Dana".into(), joined: "2024-01-01".into(), verified: Some(true) },
//!     Member { name: "Noa".into(), joined: "2024-03-01".into(), verified: None },
//!     Member { name: "Avi".into(), joined: "2024-02-01".into(), verified: Some(true) },
//! ];
//!
//! let codec: StateCodec<Filters, Field> = StateCodec::new();
//! let state: StateOf<Members> = codec.decode_query_string("?verified=true&sortDirection=asc");
//!
//! let rows = QueryEngine::<Members>::new().apply(&members, &state);
//! let names: Vec<&str> = rows.iter().map(|m| m.name.as_str()).collect();
//! assert_eq!(names, ["Dana", "Avi"]);
//! assert_eq!(codec.encode_query_string(&state), "sortDirection=asc&verified=true");
//! ```
//!
//! # Absence Policy
//!
//! Missing data never raises. It resolves to the most permissive reading:
//!
//! | Situation | Reading |
//! |-----------|---------|
//! | Missing or invalid query parameter | that field's default |
//! | Unset filter dimension | passes every record |
//! | Absent optional flag on a record | `false` |
//! | Absent text field | empty string |
//! | Absent or malformed sort key | sorts last |
//! | Unknown sort field | input order kept |

mod codec;
mod engine;
mod error;
mod filter;
mod sort;
mod state;
mod text;
mod traits;
mod value;

#[cfg(test)]
mod fixtures;

// Re-export public API
pub use codec::{parse_query_string, to_query_string, CodecKeys, Params, StateCodec};
pub use engine::{QueryEngine, Schema, StateOf};
pub use error::{Result, SeekerError};
pub use filter::{FilterSet, FilterValue, Predicate, PredicateSet};
pub use sort::{compare_keys, compare_values, Dir, SortSpec, Sorter};
pub use state::QueryState;
pub use text::TextMatcher;
pub use traits::{parse_choice, Choice, SearchField, Searchable, Seekable};
pub use value::{Number, Timestamp, Value};
