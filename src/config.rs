//! TOML configuration parsing.
//!
//! Configuration is owned by the host: the engine reads it on every refresh
//! and never caches it, so a settings change only needs a follow-up
//! [`refresh`](crate::engine::View::refresh) call to take effect.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::pattern::DatePattern;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    pub store: StoreConfig,
}

/// Settings the refresh engine reads each call: the date token template and
/// the sort direction.
#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
    #[serde(default)]
    pub sort: SortDirection,
}

impl ViewConfig {
    pub fn new(date_pattern: impl Into<String>, sort: SortDirection) -> Self {
        Self {
            date_pattern: date_pattern.into(),
            sort,
        }
    }

    /// Compile the configured template. Never fails; an unusable template
    /// yields a pattern that matches nothing.
    pub fn pattern(&self) -> DatePattern {
        DatePattern::compile(&self.date_pattern)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            date_pattern: default_date_pattern(),
            sort: SortDirection::default(),
        }
    }
}

fn default_date_pattern() -> String {
    "YYYY-MM-DD".to_string()
}

/// Chronological ordering of the aggregated view.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    /// Latest note first. The default, matching how a journal is read.
    #[default]
    Descending,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "md".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
