//! Library half of the `sift` demo binary, split out so the command flow
//! can be driven from tests.

pub mod app;
pub mod cli;
pub mod config;

pub use app::{load_records, run, Request, TableRow};
pub use cli::{Cli, Format};
pub use config::{Config, KeysConfig, ViewKind};
