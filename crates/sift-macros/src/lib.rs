//! Proc macros for Sift.
//!
//! # Derive Macros
//!
//! - [`Choice`] - Generate `sift_seeker::Choice` for string-coded enums
//!
//! Generated code refers to `::sift_seeker`, so the deriving crate must
//! depend on `sift-seeker` (the `sift` facade does).

mod attrs;
mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Choice` trait for enums of unit variants.
///
/// Each variant gets a stable string code, which is what query strings
/// carry and what filter predicates compare against record fields.
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `rename_all = "..."` | Code style: `snake_case` (default), `camelCase`, `kebab-case`, `lowercase` |
/// | `kind = "..."` | Label used in error messages (default: the enum name in lowercase words) |
///
/// # Variant Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `rename = "..."` | Use an explicit code for this variant |
///
/// # Example
///
/// ```ignore
/// use sift_macros::Choice;
/// use sift_seeker::Choice as _;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Choice)]
/// enum SubscriptionStatus {
///     Active,
///     PastDue,
///     #[choice(rename = "cancelled")]
///     Canceled,
/// }
///
/// assert_eq!(SubscriptionStatus::PastDue.code(), "past_due");
/// assert_eq!(SubscriptionStatus::from_code("cancelled"), Some(SubscriptionStatus::Canceled));
/// assert_eq!(SubscriptionStatus::KIND, "subscription status");
/// ```
///
/// # Compile-Time Errors
///
/// - Applied to a struct or union
/// - An enum with no variants, or a variant carrying data
/// - Two variants resolving to the same code
/// - Unknown `rename_all` rule or attribute
#[proc_macro_derive(Choice, attributes(choice))]
pub fn choice_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::choice_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
