use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub export: ExportDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Root of the Words of Power Vault (contains `alphabets/`).
    pub vault_path: String,
    /// Directory holding the destination alphabets, one sub-directory per handle.
    pub alphabets_dir: String,
    /// Tag prefix used to build destination alphabet ids (`<tag>:<handle>`).
    #[serde(default = "default_alphabet_tag")]
    pub alphabet_tag: String,
}

/// Default values for `vault export` options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExportDefaults {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default = "default_norm")]
    pub norm: bool,
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_score: default_max_score(),
            norm: default_norm(),
        }
    }
}

fn default_min_score() -> f64 {
    0.65
}

fn default_max_score() -> f64 {
    f64::INFINITY
}

fn default_norm() -> bool {
    true
}

pub(crate) fn default_alphabet_tag() -> String {
    "user".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values that take precedence over the config file and the environment,
/// usually coming from command line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub profile: Option<String>,
    pub vault_path: Option<PathBuf>,
    pub alphabets_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub active_profile: String,
    /// Config file the values were read from, `None` when running on defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub vault_path: PathBuf,
    pub alphabets_dir: PathBuf,
    pub alphabet_tag: String,
    pub export: ExportDefaults,
    pub logging: LoggingConfig,
}
