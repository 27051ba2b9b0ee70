//! # Config Module
//!
//! Scanner configuration, loaded from JSON.
//!
//! ## Lookup Order
//! 1. `--config <file>` on the command line (must exist)
//! 2. `<config dir>/image-scanner/config.json` if present
//! 3. Built-in defaults: default heuristic, no inference backends
//!
//! ## Example
//! ```json
//! {
//!   "heuristic": { "missing_threshold": 3 },
//!   "text_recognition": { "program": "tesseract", "args": ["{path}", "stdout"] },
//!   "scan": { "include_hidden": false }
//! }
//! ```

use crate::core::authenticity::HeuristicConfig;
use crate::core::inference::CommandModel;
use crate::core::scanner::ScanConfig;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the scanner can be configured with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Authenticity heuristic parameters
    pub heuristic: HeuristicConfig,
    /// Text-recognition backend; skipped when absent
    pub text_recognition: Option<CommandModel>,
    /// Caption-generation backend; skipped when absent
    pub captioning: Option<CommandModel>,
    /// File discovery options
    pub scan: ScanConfig,
}

impl ScannerConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("image-scanner").join("config.json"))
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Load an explicit file, else the default file if it exists, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "Loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.heuristic.validate()?;
        Ok(config)
    }
}
