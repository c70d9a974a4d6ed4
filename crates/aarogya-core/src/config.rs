//! Configuration loading.
//!
//! Reads aarogya.toml from the current directory, or the path in the
//! AAROGYA_CONFIG env var. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "AAROGYA_CONFIG";

/// Config file used when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "aarogya.toml";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// JSON rule set replacing the built-in rules
    pub rules_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionsConfig {
    /// File path (relative to `data_dir`) or http(s) URL of the table
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Keep the last loaded table instead of refetching per query
    #[serde(default)]
    pub cache: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source() -> String { "symptomTestData.json".to_string() }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_timeout_secs() -> u64 { 10 }

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            data_dir: default_data_dir(),
            cache: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_store")]
    pub store_path: PathBuf,
}

fn default_theme_store() -> PathBuf { PathBuf::from(".aarogya-theme") }

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store_path: default_theme_store(),
        }
    }
}

/// User-facing strings shown at the presentation boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagesConfig {
    #[serde(default = "default_empty_input")]
    pub empty_input: String,
    #[serde(default = "default_no_suggestions")]
    pub no_suggestions: String,
    #[serde(default = "default_fetch_error")]
    pub fetch_error: String,
}

fn default_empty_input() -> String { "Please enter a symptom first.".to_string() }
fn default_no_suggestions() -> String { "No test suggestions found for the entered symptom.".to_string() }
fn default_fetch_error() -> String { "Error fetching suggestions. Please try again later.".to_string() }

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            empty_input: default_empty_input(),
            no_suggestions: default_no_suggestions(),
            fetch_error: default_fetch_error(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "aarogya=info,warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from AAROGYA_CONFIG or aarogya.toml, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if !Path::new(&path).exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }
}
