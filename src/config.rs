//! Run configuration.
//!
//! Paths come from built-in defaults, optionally replaced by a TOML file and
//! then by command-line overrides. Every key in the file is optional:
//!
//! ```toml
//! [filter]
//! input_path = "dynamic_cities.json"
//! output_path = "dynamic_cities_clean.json"
//!
//! [index]
//! input_path = "dynamic_cities.json"
//! output_path = "cities-data.json"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CleanError;

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cityclean.toml";

pub const DEFAULT_INPUT_PATH: &str = "dynamic_cities.json";
pub const DEFAULT_OUTPUT_PATH: &str = "dynamic_cities_clean.json";
pub const DEFAULT_INDEX_OUTPUT_PATH: &str = "cities-data.json";

/// Whole-file configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    pub filter: FilterConfig,
    pub index: IndexConfig,
}

/// Paths for the ZCTA filter pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Paths for the per-state index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_INDEX_OUTPUT_PATH),
        }
    }
}

impl CleanConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CleanError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CleanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| CleanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else `cityclean.toml` from the working
    /// directory when it exists, else the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, CleanError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            log::debug!("Using config file {}", fallback.display());
            return Self::from_file(fallback);
        }

        Ok(Self::default())
    }
}

impl FilterConfig {
    /// Replace whichever paths were given on the command line.
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input_path = input;
        }
        if let Some(output) = output {
            self.output_path = output;
        }
        self
    }
}

impl IndexConfig {
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input_path = input;
        }
        if let Some(output) = output {
            self.output_path = output;
        }
        self
    }
}
