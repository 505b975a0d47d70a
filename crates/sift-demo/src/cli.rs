//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ViewKind;

/// Query a JSON snapshot of dashboard records.
///
/// Applies a shareable query string (plus any search, filter and sort
/// flags on top of it) and prints the resulting rows followed by the
/// query string that reproduces the view.
#[derive(Debug, Parser)]
#[command(name = "sift", version)]
pub struct Cli {
    /// JSON file holding an array of records
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// List view the records belong to
    #[arg(long, value_enum)]
    pub view: Option<ViewKind>,

    /// Query string to start from, e.g. "?status=active&sortDirection=asc"
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Free-text search, replacing the query's
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter as KEY=VALUE; an empty VALUE clears it (repeatable)
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,

    /// Sort field; repeating the current field flips the direction (repeatable)
    #[arg(long = "sort", value_name = "FIELD")]
    pub sorts: Vec<String>,

    /// YAML config file
    #[arg(long, env = "SIFT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Log debug events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
