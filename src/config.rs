// Run settings. Everything has a default matching the original analysis, and
// an optional JSON file can override any subset of keys.
use crate::error::{AnalysisError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_ENV: &str = "MOVIE_STATS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "movie_stats.json";

static DEFAULT_YEARS: Lazy<Vec<String>> =
    Lazy::new(|| (2015..=2021).map(|y: i32| y.to_string()).collect());

/// How column positions are taken from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// Every expected column name must be present in the header.
    Strict,
    /// Missing names fall back to the fixed position of the original export.
    Positional,
}

/// How the distinct-category cap is applied while tallying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Admission {
    /// Admit new categories while `admitted <= cap`, i.e. `cap + 1` keys.
    Legacy,
    /// Admit exactly `cap` keys.
    Exact,
}

impl Admission {
    pub fn admits(self, admitted: usize, cap: usize) -> bool {
        match self {
            Admission::Legacy => admitted <= cap,
            Admission::Exact => admitted < cap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub schema_mode: SchemaMode,
    pub top_languages: usize,
    pub admission: Admission,
    pub year_window: Vec<String>,
    /// Vertical gap between a bar top and its percentage label.
    pub annotation_lift: f64,
    /// Absolute label heights for specific languages.
    pub annotation_overrides: IndexMap<String, f64>,
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from("netflix-data-vf.csv"),
            output_dir: PathBuf::from("."),
            schema_mode: SchemaMode::Strict,
            top_languages: 15,
            admission: Admission::Legacy,
            year_window: DEFAULT_YEARS.clone(),
            annotation_lift: 50.0,
            annotation_overrides: IndexMap::new(),
            preview_rows: 5,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// `$MOVIE_STATS_CONFIG` if set, else `movie_stats.json` when it exists,
    /// else the defaults.
    pub fn load() -> Result<Config> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            info!("Loading config from {} (${})", path, CONFIG_ENV);
            return Config::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            info!("Loading config from {}", local.display());
            return Config::from_file(local);
        }
        debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.year_window.is_empty() {
            return Err(AnalysisError::Config("year_window must not be empty".into()));
        }
        if self.top_languages == 0 {
            return Err(AnalysisError::Config("top_languages must be at least 1".into()));
        }
        Ok(())
    }
}
