//! YAML configuration for the demo.
//!
//! ```yaml
//! data: snapshots/users.json
//! view: users
//! default_query: "status=active&sortDirection=asc"
//! keys:
//!   search: search
//!   sort_field: by
//!   sort_direction: order
//! ```
//!
//! Every field is optional. Command-line flags take precedence. A relative
//! `data` path is resolved against the config file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use sift::seeker::CodecKeys;
use tracing::{debug, warn};

/// Which list view to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Users,
    Affiliates,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON snapshot of records.
    pub data: Option<PathBuf>,
    pub view: Option<ViewKind>,
    /// Query string used when none is given on the command line.
    pub default_query: Option<String>,
    pub keys: KeysConfig,
}

/// Overrides for the codec's parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

impl KeysConfig {
    pub fn codec_keys(&self) -> CodecKeys {
        let defaults = CodecKeys::default();
        CodecKeys {
            search: self.search.clone().unwrap_or(defaults.search),
            sort_field: self.sort_field.clone().unwrap_or(defaults.sort_field),
            sort_direction: self.sort_direction.clone().unwrap_or(defaults.sort_direction),
        }
    }
}

impl Config {
    /// Parses a YAML document. An empty document is the default config.
    pub fn from_yaml(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(source).context("invalid config YAML")
    }

    /// Loads the config at `path`, if any.
    ///
    /// A missing file yields the default config; an unreadable or invalid
    /// one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config =
            Self::from_yaml(&source).with_context(|| format!("loading config {}", path.display()))?;
        if let (Some(data), Some(dir)) = (config.data.as_mut(), path.parent()) {
            if data.is_relative() {
                *data = dir.join(&*data);
            }
        }
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
