//! Loads the snapshot, applies the query and prints the view.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sift::affiliates::{Affiliate, Affiliates};
use sift::seeker::{Choice, CodecKeys, FilterSet, Schema, StateCodec};
use sift::users::{User, Users};
use sift::view::{FilterKey, ListView, Summary};
use tracing::{info, warn};
use unicode_width::UnicodeWidthStr;

use crate::cli::{Cli, Format};
use crate::config::{Config, ViewKind};

/// A record that can be printed as a table row.
pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

impl TableRow for User {
    fn cells(&self) -> Vec<String> {
        let status = self.subscription().and_then(|s| s.status.as_deref());
        vec![
            self.id.to_string(),
            or_dash(Some(self.full_name().as_str())),
            or_dash(self.email.as_deref()),
            or_dash(status),
            self.future_appointments_count
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            or_dash(self.created_at.as_deref()),
        ]
    }
}

impl TableRow for Affiliate {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(self.name.as_deref()),
            or_dash(self.referral_code.as_deref()),
            self.referrals_count
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            or_dash(self.created_at.as_deref()),
        ]
    }
}

/// Mutations requested on the command line, applied after the query string.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub query: String,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sorts: Vec<String>,
}

impl Request {
    pub fn apply<S: Schema>(&self, view: &mut ListView<S>) {
        view.load(&self.query);
        if let Some(search) = &self.search {
            view.set_search(search);
        }
        for (key, value) in &self.filters {
            let Some(filter) = <FilterKey<S> as Choice>::from_code(key) else {
                warn!(key = %key, "unknown filter key ignored");
                continue;
            };
            view.set_filter(filter, value);
            if !value.is_empty() && view.state().filters.code(filter).is_none() {
                warn!(key = %key, value = %value, "unknown filter value, filter cleared");
            }
        }
        for field in &self.sorts {
            if S::SortField::from_code(field).is_none() {
                warn!(field = %field, "unknown sort field ignored");
            }
            view.set_sort_by_name(field);
        }
    }
}

#[derive(Serialize)]
struct Report<'a, R> {
    query: &'a str,
    summary: &'a Summary,
    rows: &'a [&'a R],
}

/// Reads a JSON array of records.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading data file {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("parsing {} as a JSON array of records", path.display()))
}

/// Runs the demo for parsed arguments, writing the view to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let data = cli
        .data
        .clone()
        .or_else(|| config.data.clone())
        .context("no data file: pass --data or set `data` in the config")?;

    let request = Request {
        query: cli
            .query
            .clone()
            .or_else(|| config.default_query.clone())
            .unwrap_or_default(),
        search: cli.search.clone(),
        filters: cli.filters.clone(),
        sorts: cli.sorts.clone(),
    };
    let keys = config.keys.codec_keys();

    match cli.view.or(config.view).unwrap_or_default() {
        ViewKind::Users => show::<Users>(&data, &request, keys, cli.format, out),
        ViewKind::Affiliates => show::<Affiliates>(&data, &request, keys, cli.format, out),
    }
}

fn show<S: Schema>(
    data: &Path,
    request: &Request,
    keys: CodecKeys,
    format: Format,
    out: &mut dyn Write,
) -> Result<()>
where
    S::Record: DeserializeOwned + Serialize + TableRow,
{
    let records: Vec<S::Record> = load_records(data)?;
    let codec = StateCodec::with_keys(keys).context("invalid `keys` in config")?;
    let mut view = ListView::<S>::with_codec(codec);
    request.apply(&mut view);

    let rows = view.rows(&records);
    let summary = view.summary(&records);
    let query = view.query_string();
    info!(total = summary.total, shown = summary.shown, query = %query, "view computed");

    match format {
        Format::Json => {
            let report = Report {
                query: &query,
                summary: &summary,
                rows: &rows,
            };
            serde_json::to_writer_pretty(&mut *out, &report).context("writing JSON output")?;
            writeln!(out)?;
        }
        Format::Text => {
            let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells()).collect();
            out.write_all(format_table(&cells).as_bytes())?;

            let mut footer = format!("showing {} of {}", summary.shown, summary.total);
            if let Some(filters) = summary.filter_summary() {
                footer.push_str(&format!(" (filtered by: {})", filters));
            }
            writeln!(out, "{}", footer)?;
            if query.is_empty() {
                writeln!(out, "query: (default)")?;
            } else {
                writeln!(out, "query: ?{}", query)?;
            }
        }
    }
    Ok(())
}

/// Left-aligns cells into columns separated by two spaces.
///
/// Widths are terminal columns, so wide characters keep columns aligned.
fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut table = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            let pad = widths[i].saturating_sub(cell.width());
            line.extend(std::iter::repeat(' ').take(pad));
        }
        table.push_str(line.trim_end());
        table.push('\n');
    }
    table
}
