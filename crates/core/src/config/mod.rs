//! Configuration loading.
//!
//! Values are layered: built-in defaults, then the TOML config file, then
//! `WOPLAB_*` environment variables, then explicit overrides.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, settings_files};
pub use types::{ConfigOverrides, ExportDefaults, LoggingConfig, ResolvedConfig};
