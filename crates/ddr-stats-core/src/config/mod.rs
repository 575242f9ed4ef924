//! Persisted run settings
//!
//! Settings from the previous run are loaded as defaults, adjusted by the
//! caller, saved back, and then turned into a [`ComparisonQuery`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::{PlayFilter, TimeWindow};
use crate::stats::ChartMode;
use crate::store::Grade;

/// Settings for ddr-stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path to the play database
    pub db_path: String,
    /// First player (id or name)
    pub last_f1: String,
    /// Optional second player (id or name); empty means none
    pub last_f2: String,
    /// Plot only the average line
    pub avg_only: bool,
    /// Ignore `start`/`end`
    pub all_time: bool,
    /// First day of the window
    pub start: Option<NaiveDate>,
    /// Last day of the window
    pub end: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: String::new(),
            last_f1: String::new(),
            last_f2: String::new(),
            avg_only: false,
            all_time: true,
            start: None,
            end: None,
        }
    }
}

/// Fully specified comparison request
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonQuery {
    pub db_path: PathBuf,
    /// One or two player identifiers, in chart order
    pub tokens: Vec<String>,
    pub filter: PlayFilter,
    pub chart_mode: ChartMode,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ddr-stats").join("config.json"))
    }

    /// Load settings from disk, falling back to defaults if not found
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Could not read settings");
                }
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed settings");
            Self::default()
        })
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Other(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Player identifiers to compare: the first always, the second if set
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.last_f1.clone()];
        if !self.last_f2.is_empty() {
            tokens.push(self.last_f2.clone());
        }
        tokens
    }

    /// Date window these settings select
    pub fn window(&self) -> TimeWindow {
        TimeWindow::from_bounds(self.all_time, self.start, self.end)
    }

    /// Turn settings into a query; a database must have been selected
    pub fn query(&self) -> Result<ComparisonQuery> {
        if self.db_path.is_empty() {
            return Err(Error::NoStoreSelected);
        }

        Ok(ComparisonQuery {
            db_path: PathBuf::from(&self.db_path),
            tokens: self.tokens(),
            filter: PlayFilter {
                exclude_grade: Grade::FAILED,
                window: self.window(),
            },
            chart_mode: ChartMode::from_avg_only(self.avg_only),
        })
    }
}
