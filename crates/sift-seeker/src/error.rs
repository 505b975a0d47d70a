//! Strict-parsing errors.
//!
//! The engine itself fails open: the codec, predicates and sorter swallow
//! these errors and fall back to defaults. They surface only through the
//! strict helpers ([`parse_choice`](crate::parse_choice),
//! [`Timestamp::parse`](crate::Timestamp::parse)) and when building a
//! codec with custom parameter names.

use thiserror::Error;

/// Errors produced by the strict parsing helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekerError {
    /// A code that does not belong to the closed set of a [`Choice`](crate::Choice).
    #[error("unknown {kind} code: '{code}'")]
    UnknownChoice { kind: &'static str, code: String },

    /// A timestamp string in none of the accepted formats.
    #[error("invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// Two parts of the query state mapped to the same parameter name.
    #[error("query parameter '{0}' is used twice")]
    DuplicateParam(String),
}

pub type Result<T> = std::result::Result<T, SeekerError>;
