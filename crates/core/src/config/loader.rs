use crate::config::types::{
    ConfigFile, ConfigOverrides, ExportDefaults, LoggingConfig, Profile, ResolvedConfig,
    default_alphabet_tag,
};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::{data_dir, home_dir};
use thiserror::Error;

pub const CONFIG_FILE: &str = "woplab.toml";
pub const SITE_CONFIG_PATH: &str = "/etc/xdg/woplab/woplab.toml";

pub const ENV_PROFILE: &str = "WOPLAB_PROFILE";
pub const ENV_VAULT_PATH: &str = "WOPLAB_VAULT_PATH";
pub const ENV_ALPHABETS_DIR: &str = "WOPLAB_ALPHABETS_DIR";
pub const ENV_LOG_LEVEL: &str = "WOPLAB_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, layering defaults < file < environment < overrides.
    pub fn load(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<ResolvedConfig, ConfigError> {
        Self::load_with_env(config_path, overrides, |key| env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
        env_var: F,
    ) -> Result<ResolvedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.display().to_string()));
                }
                Some(p.to_path_buf())
            }
            None => settings_files().into_iter().find(|p| p.is_file()),
        };

        let profile_request = overrides.profile.clone().or_else(|| env_var(ENV_PROFILE));

        let mut resolved = match path {
            Some(path) => {
                let cf = read_config_file(&path)?;
                let active = profile_request
                    .or(cf.profile.clone())
                    .unwrap_or_else(|| "default".to_string());

                let prof = cf
                    .profiles
                    .get(&active)
                    .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

                let mut rc = Self::resolve_profile(&active, prof, &cf.export, &cf.logging)?;
                rc.source = Some(path);
                rc
            }
            None => {
                let active = profile_request.unwrap_or_else(|| "default".to_string());
                if active != "default" {
                    return Err(ConfigError::ProfileNotFound(active));
                }
                Self::builtin_defaults()
            }
        };

        if let Some(v) = env_var(ENV_VAULT_PATH) {
            resolved.vault_path = expand_path(&v)?;
        }
        if let Some(v) = env_var(ENV_ALPHABETS_DIR) {
            resolved.alphabets_dir = expand_path(&v)?;
        }
        if let Some(v) = env_var(ENV_LOG_LEVEL) {
            resolved.logging.level = v;
        }

        if let Some(ref v) = overrides.vault_path {
            resolved.vault_path = v.clone();
        }
        if let Some(ref v) = overrides.alphabets_dir {
            resolved.alphabets_dir = v.clone();
        }
        if let Some(ref v) = overrides.log_level {
            resolved.logging.level = v.clone();
        }

        tracing::debug!(
            profile = %resolved.active_profile,
            vault = %resolved.vault_path.display(),
            alphabets = %resolved.alphabets_dir.display(),
            "resolved config"
        );

        Ok(resolved)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        export: &ExportDefaults,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let vault_path = expand_path(&prof.vault_path)?;
        let sub = |s: &str| s.replace("{{vault_path}}", &vault_path.to_string_lossy());

        let alphabets_dir = expand_path(&sub(&prof.alphabets_dir))?;

        // Resolve log file path if present
        let logging = if let Some(ref file) = log_cfg.file {
            let expanded_file = expand_path(&sub(&file.to_string_lossy()))?;
            LoggingConfig {
                level: log_cfg.level.clone(),
                file_level: log_cfg.file_level.clone(),
                file: Some(expanded_file),
            }
        } else {
            log_cfg.clone()
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            source: None,
            vault_path,
            alphabets_dir,
            alphabet_tag: prof.alphabet_tag.clone(),
            export: export.clone(),
            logging,
        })
    }

    fn builtin_defaults() -> ResolvedConfig {
        let data = data_dir().unwrap_or_else(|| PathBuf::from("."));
        ResolvedConfig {
            active_profile: "default".to_string(),
            source: None,
            vault_path: data.join("wopvault"),
            alphabets_dir: data.join("texnomagic").join("abcs"),
            alphabet_tag: default_alphabet_tag(),
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let s = fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

    let cf: ConfigFile = toml::from_str(&s)
        .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

    if cf.version != 1 {
        return Err(ConfigError::BadVersion(cf.version));
    }
    if cf.profiles.is_empty() {
        return Err(ConfigError::NoProfiles);
    }
    Ok(cf)
}

/// Config files looked up in order when no explicit path is given:
/// working directory, user config dir, then the site-wide file.
pub fn settings_files() -> Vec<PathBuf> {
    vec![PathBuf::from(CONFIG_FILE), default_config_path(), PathBuf::from(SITE_CONFIG_PATH)]
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("woplab").join(CONFIG_FILE);
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("woplab").join(CONFIG_FILE)
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    const TOML: &str = r#"
version = 1
profile = "default"

[profiles.default]
vault_path = "/tmp/vault"
alphabets_dir = "{{vault_path}}/../abcs"

[export]
min_score = 0.5
"#;

    fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_file_values_resolved() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("woplab.toml");
        fs::write(&path, TOML).unwrap();

        let rc = ConfigLoader::load_with_env(
            Some(&path),
            &ConfigOverrides::default(),
            |_| None,
        )
        .unwrap();

        assert_eq!(rc.vault_path, PathBuf::from("/tmp/vault"));
        assert_eq!(rc.alphabets_dir, PathBuf::from("/tmp/vault/../abcs"));
        assert_eq!(rc.alphabet_tag, "user");
        assert_eq!(rc.export.min_score, 0.5);
        assert!(rc.export.max_score.is_infinite());
        assert!(rc.export.norm);
        assert_eq!(rc.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_env_beats_file_and_flag_beats_env() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("woplab.toml");
        fs::write(&path, TOML).unwrap();

        let env = env_map(&[
            (ENV_VAULT_PATH, "/env/vault"),
            (ENV_ALPHABETS_DIR, "/env/abcs"),
            (ENV_LOG_LEVEL, "debug"),
        ]);
        let overrides = ConfigOverrides {
            alphabets_dir: Some(PathBuf::from("/flag/abcs")),
            ..Default::default()
        };

        let rc = ConfigLoader::load_with_env(Some(&path), &overrides, |k| env.get(k).cloned())
                .unwrap();
        assert_eq!(rc.vault_path, PathBuf::from("/env/vault"));
        assert_eq!(rc.alphabets_dir, PathBuf::from("/flag/abcs"));
        assert_eq!(rc.logging.level, "debug");
    }

    #[test]
    fn test_env_profile_selection() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("woplab.toml");
        let toml = format!(
            "{TOML}\n[profiles.lab]\nvault_path = \"/lab\"\nalphabets_dir = \"/lab/abcs\"\nalphabet_tag = \"lab\"\n"
        );
        fs::write(&path, toml).unwrap();

        let env = env_map(&[(ENV_PROFILE, "lab")]);
        let rc = ConfigLoader::load_with_env(
            Some(&path),
            &ConfigOverrides::default(),
            |k| env.get(k).cloned(),
        )
        .unwrap();
        assert_eq!(rc.active_profile, "lab");
        assert_eq!(rc.alphabet_tag, "lab");
    }

    #[test]
    fn test_builtin_defaults() {
        let defaults = ConfigLoader::builtin_defaults();
        assert_eq!(defaults.active_profile, "default");
        assert!(defaults.vault_path.ends_with("wopvault"));
        assert_eq!(defaults.export, ExportDefaults::default());
    }

    #[test]
    fn test_settings_files_order() {
        let files = settings_files();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0], PathBuf::from("woplab.toml"));
        assert!(files[1].ends_with("woplab/woplab.toml"));
        assert_eq!(files[2], PathBuf::from("/etc/xdg/woplab/woplab.toml"));
    }
}
