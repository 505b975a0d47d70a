//! # Sift - list-view queries for the admin dashboard
//!
//! Sift computes what a dashboard list shows: it takes a snapshot of
//! records plus the current search text, filter selections and sort order,
//! and returns the ordered rows. The selection lives in a flat query string
//! so a view survives reloads and can be shared as a link.
//!
//! - [`seeker`]: the generic engine (re-export of `sift-seeker`)
//! - [`Choice`]: derive macro for string-coded enums (re-export of `sift-macros`)
//! - [`users`], [`affiliates`]: the dashboard's list schemas
//! - [`view`]: host-side [`ListView`](view::ListView)
//!
//! ## Quick Start
//!
//! ```rust
//! use sift::users::{User, UserFilterKey, Users};
//! use sift::view::ListView;
//!
//! let records: Vec<User> = serde_json::from_str(r#"[
//!     {"id": 1, "first_name": "Dana", "phone": "0501234567", "created_at": "2024-01-01"},
//!     {"id": 2, "first_name": "Noa", "phone": "0529999999", "created_at": "2024-03-01"}
//! ]"#).unwrap();
//!
//! let mut view = ListView::<Users>::new();
//! let query = view.set_search("050");
//! assert_eq!(query, "q=050");
//!
//! let names: Vec<String> = view.rows(&records).iter().map(|u| u.full_name()).collect();
//! assert_eq!(names, ["Dana"]);
//!
//! view.set_filter(UserFilterKey::HasPaymentToken, "true");
//! assert_eq!(view.summary(&records).shown, 0);
//! ```

pub use sift_macros::Choice;
pub use sift_seeker as seeker;
pub use sift_seeker::Choice;

pub mod affiliates;
pub mod users;
pub mod view;
