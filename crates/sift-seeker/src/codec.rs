//! Mapping between [`QueryState`] and flat string parameters.
//!
//! The parameters are what a URL query string carries, so a view's state
//! survives reloads and can be shared as a link.
//!
//! - Decoding never fails. A missing, malformed or out-of-set value falls
//!   back to that field's default and the rest of the state is kept.
//! - Encoding omits every field equal to its default, so the default state
//!   encodes to nothing.
//! - `decode(encode(s)) == s` for every state the setters can produce.

use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;

use tracing::debug;
use url::form_urlencoded;

use crate::error::{Result, SeekerError};
use crate::filter::FilterSet;
use crate::sort::{Dir, SortSpec};
use crate::state::QueryState;
use crate::traits::Choice;

/// Flat parameter map, ordered by key so encodings are stable.
pub type Params = BTreeMap<String, String>;

/// Parameter names for the non-filter parts of the state.
///
/// Filter dimensions use their key's [`Choice::code`] as parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecKeys {
    pub search: String,
    pub sort_field: String,
    pub sort_direction: String,
}

impl Default for CodecKeys {
    fn default() -> Self {
        CodecKeys {
            search: "q".to_string(),
            sort_field: "sortField".to_string(),
            sort_direction: "sortDirection".to_string(),
        }
    }
}

/// Encodes and decodes [`QueryState`] for one list view.
#[derive(Debug, Clone)]
pub struct StateCodec<S, F> {
    keys: CodecKeys,
    _state: PhantomData<fn() -> (S, F)>,
}

impl CodecKeys {
    /// Checks that every parameter name is distinct, including the codes
    /// of the filter keys in `K`.
    ///
    /// Two parts of the state sharing a name would overwrite each other
    /// when encoded.
    pub fn check<K: Choice>(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        let names = [
            self.search.as_str(),
            self.sort_field.as_str(),
            self.sort_direction.as_str(),
        ];
        for name in names.into_iter().chain(K::ALL.iter().map(|key| key.code())) {
            if !seen.insert(name) {
                return Err(SeekerError::DuplicateParam(name.to_string()));
            }
        }
        Ok(())
    }
}

impl<S: FilterSet, F: Choice + Default> Default for StateCodec<S, F> {
    fn default() -> Self {
        StateCodec {
            keys: CodecKeys::default(),
            _state: PhantomData,
        }
    }
}

impl<S: FilterSet, F: Choice + Default> StateCodec<S, F> {
    /// A codec using the default parameter names.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec using custom parameter names.
    ///
    /// Fails with [`SeekerError::DuplicateParam`] when a name is used twice,
    /// either among `keys` or against a filter key's code.
    pub fn with_keys(keys: CodecKeys) -> Result<Self> {
        keys.check::<S::Key>()?;
        Ok(StateCodec {
            keys,
            _state: PhantomData,
        })
    }

    pub fn keys(&self) -> &CodecKeys {
        &self.keys
    }

    /// Builds a state from parameters, substituting defaults for anything
    /// missing or invalid.
    pub fn decode(&self, params: &Params) -> QueryState<S, F> {
        let search = params.get(&self.keys.search).cloned().unwrap_or_default();

        let mut filters = S::default();
        for key in S::Key::ALL.iter().copied() {
            if let Some(raw) = params.get(key.code()) {
                filters.assign(key, raw);
                if filters.code(key).is_none() && !raw.is_empty() {
                    debug!(param = key.code(), value = %raw, "ignoring unknown filter value");
                }
            }
        }

        let field = self
            .lookup::<F>(params, &self.keys.sort_field)
            .unwrap_or_default();
        let dir = self
            .lookup::<Dir>(params, &self.keys.sort_direction)
            .unwrap_or_default();

        QueryState {
            search,
            filters,
            sort: SortSpec { field, dir },
        }
    }

    /// Flattens a state into parameters, omitting default values.
    pub fn encode(&self, state: &QueryState<S, F>) -> Params {
        let mut params = Params::new();

        if !state.search.is_empty() {
            params.insert(self.keys.search.clone(), state.search.clone());
        }

        for key in S::Key::ALL.iter().copied() {
            if let Some(code) = state.filters.code(key) {
                params.insert(key.code().to_string(), code.to_string());
            }
        }

        if state.sort.field != F::default() {
            params.insert(
                self.keys.sort_field.clone(),
                state.sort.field.code().to_string(),
            );
        }
        if state.sort.dir != Dir::default() {
            params.insert(
                self.keys.sort_direction.clone(),
                state.sort.dir.code().to_string(),
            );
        }

        params
    }

    /// Decodes a URL query string (with or without the leading `?`).
    ///
    /// When a key repeats, the last occurrence wins.
    pub fn decode_query_string(&self, query: &str) -> QueryState<S, F> {
        self.decode(&parse_query_string(query))
    }

    /// Encodes a state as a URL query string without the leading `?`.
    pub fn encode_query_string(&self, state: &QueryState<S, F>) -> String {
        to_query_string(&self.encode(state))
    }

    fn lookup<T: Choice>(&self, params: &Params, name: &str) -> Option<T> {
        let raw = params.get(name)?;
        let parsed = T::from_code(raw);
        if parsed.is_none() {
            debug!(param = name, value = %raw, kind = T::KIND, "ignoring unknown value");
        }
        parsed
    }
}

/// Splits a URL query string into parameters.
pub fn parse_query_string(query: &str) -> Params {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Joins parameters into a URL query string.
pub fn to_query_string(params: &Params) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
