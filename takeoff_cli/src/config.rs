//! Configuration for the takeoff CLI
//!
//! Config stored at: <config dir>/takeoff/config.json (e.g. ~/.config/takeoff/config.json)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use takeoff_core::{CalcError, CalcResult};
use tracing::debug;

use crate::cli::OutputFormat;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Print the per-category steel breakdown in table output
    #[serde(default = "default_true")]
    pub show_breakdown: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            show_breakdown: true,
        }
    }
}

impl Config {
    /// Get the default config file path, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("takeoff").join("config.json"))
    }

    /// Load config from an explicit path, or from the default path if it exists.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> CalcResult<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    fn load_from(path: &Path) -> CalcResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read config", path.display().to_string(), e.to_string()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CalcError::serialization(format!("invalid config {}: {e}", path.display())))?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
