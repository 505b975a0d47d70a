//! Integration tests for the demo command flow.
//!
//! All tests run serially because `SIFT_CONFIG` is read during parsing.

use std::path::PathBuf;

use clap::Parser;
use serial_test::serial;
use sift_demo::{run, Cli};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn output(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("sift").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn first_cells(text: &str) -> Vec<String> {
    text.lines()
        .take_while(|line| !line.starts_with("showing"))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Text output
// =============================================================================

#[test]
#[serial]
fn default_view_is_newest_first() {
    let users = data("users.json");
    let text = output(&["--data", users.to_str().unwrap()]).unwrap();

    assert_eq!(first_cells(&text), ["2", "3", "1", "4"]);
    assert!(text.contains("showing 4 of 4\n"));
    assert!(text.ends_with("query: (default)\n"));
}

#[test]
#[serial]
fn filters_and_search_narrow_the_view() {
    let users = data("users.json");
    let text = output(&[
        "--data",
        users.to_str().unwrap(),
        "--filter",
        "hasPaymentToken=true",
    ])
    .unwrap();
    assert_eq!(first_cells(&text), ["1"]);
    assert!(text.contains("showing 1 of 4 (filtered by: hasPaymentToken=true)"));
    assert!(text.contains("query: ?hasPaymentToken=true"));

    let text = output(&["--data", users.to_str().unwrap(), "--search", "54 777"]).unwrap();
    assert_eq!(first_cells(&text), ["3"]);
}

#[test]
#[serial]
fn sort_flags_toggle_like_the_ui() {
    let users = data("users.json");
    let text = output(&[
        "--data",
        users.to_str().unwrap(),
        "--sort",
        "futureAppointments",
        "--sort",
        "futureAppointments",
    ])
    .unwrap();

    // Ascending by appointments; Eli has no count and stays last.
    assert_eq!(first_cells(&text), ["3", "2", "1", "4"]);
    assert!(text.contains("query: ?sortDirection=asc&sortField=futureAppointments"));
}

#[test]
#[serial]
fn tampered_query_falls_back_per_field() {
    let users = data("users.json");
    let text = output(&[
        "--data",
        users.to_str().unwrap(),
        "--query",
        "?status=active&sortDirection=sideways&isVerified=maybe",
    ])
    .unwrap();
    assert_eq!(first_cells(&text), ["1"]);
    assert!(text.contains("query: ?status=active\n"));
}

// =============================================================================
// JSON output
// =============================================================================

#[test]
#[serial]
fn json_report() {
    let affiliates = data("affiliates.json");
    let text = output(&[
        "--data",
        affiliates.to_str().unwrap(),
        "--view",
        "affiliates",
        "--filter",
        "status=inactive",
        "--format",
        "json",
    ])
    .unwrap();

    let report: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["query"], "status=inactive");
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["shown"], 2);
    let ids: Vec<u64> = report["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_u64().unwrap())
        .collect();
    // Newest first: Lior joined in 2024, Omer in 2023.
    assert_eq!(ids, [13, 12]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
#[serial]
fn config_supplies_view_query_and_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("sift.yaml");
    std::fs::write(
        &config,
        format!(
            "data: {}\nview: affiliates\ndefault_query: by=referrals\nkeys:\n  sort_field: by\n",
            data("affiliates.json").display()
        ),
    )
    .unwrap();

    let text = output(&["--config", config.to_str().unwrap()]).unwrap();
    assert_eq!(first_cells(&text), ["12", "11", "13"]);
    assert!(text.contains("query: ?by=referrals"));

    // Flags win over the config.
    let text = output(&["--config", config.to_str().unwrap(), "--query", ""]).unwrap();
    assert_eq!(first_cells(&text), ["13", "11", "12"]);
}

#[test]
#[serial]
fn colliding_parameter_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("sift.yaml");
    std::fs::write(
        &config,
        format!(
            "data: {}\nkeys:\n  search: status\n",
            data("users.json").display()
        ),
    )
    .unwrap();

    let err = output(&["--config", config.to_str().unwrap()]).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("invalid `keys` in config"), "{message}");
    assert!(message.contains("query parameter 'status' is used twice"), "{message}");
}

#[test]
#[serial]
fn relative_data_path_is_resolved_from_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(data("users.json"), dir.path().join("snapshot.json")).unwrap();
    let config = dir.path().join("sift.yaml");
    std::fs::write(&config, "data: snapshot.json\n").unwrap();

    let text = output(&["--config", config.to_str().unwrap()]).unwrap();
    assert!(text.contains("showing 4 of 4"));
}

#[test]
#[serial]
fn config_path_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("env.yaml");
    std::fs::write(
        &config,
        format!("data: {}\n", data("users.json").display()),
    )
    .unwrap();

    std::env::set_var("SIFT_CONFIG", &config);
    let cli = Cli::try_parse_from(["sift"]);
    let text = output(&[]);
    std::env::remove_var("SIFT_CONFIG");

    assert_eq!(cli.unwrap().config, Some(config));
    assert!(text.unwrap().contains("showing 4 of 4"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
#[serial]
fn missing_data_is_an_error() {
    let err = output(&[]).unwrap_err();
    assert!(err.to_string().contains("no data file"));

    let err = output(&["--data", "/nonexistent/users.json"]).unwrap_err();
    assert!(format!("{:#}", err).contains("reading data file"));
}

#[test]
#[serial]
fn invalid_inputs_report_context() {
    let dir = tempfile::tempdir().unwrap();
    let bad_json = dir.path().join("bad.json");
    std::fs::write(&bad_json, "{\"id\": 1}").unwrap();
    let err = output(&["--data", bad_json.to_str().unwrap()]).unwrap_err();
    assert!(format!("{:#}", err).contains("as a JSON array of records"));

    let bad_yaml = dir.path().join("bad.yaml");
    std::fs::write(&bad_yaml, "view: [users\n").unwrap();
    let err = output(&["--config", bad_yaml.to_str().unwrap()]).unwrap_err();
    assert!(format!("{:#}", err).contains("loading config"));
}
