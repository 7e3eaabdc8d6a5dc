//! Runtime settings
//!
//! Parsed from an optional `synthetic_home.yaml` in the working directory,
//! then overridden by `SYNTHETIC_HOME_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_document;

/// Name of the settings document looked up in the working directory
pub const SETTINGS_FILE: &str = "synthetic_home.yaml";

const ENV_DEVICE_TYPES: &str = "SYNTHETIC_HOME_DEVICE_TYPES";
const ENV_HOME_FILE: &str = "SYNTHETIC_HOME_FILE";
const ENV_LOG: &str = "SYNTHETIC_HOME_LOG";

/// Settings for a compiler run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory of device type templates
    #[serde(default = "default_device_types_path")]
    pub device_types_path: PathBuf,

    /// Home document to compile
    #[serde(default = "default_home_file")]
    pub home_file: PathBuf,

    /// Log filter directive (e.g., "info", "sh_model=debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_device_types_path() -> PathBuf {
    PathBuf::from("device_types")
}

fn default_home_file() -> PathBuf {
    PathBuf::from("home.yaml")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_types_path: default_device_types_path(),
            home_file: default_home_file(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from `dir`, falling back to defaults when no settings
    /// document exists, then apply environment overrides.
    pub fn load(dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = dir.as_ref().join(SETTINGS_FILE);
        let mut settings = if path.exists() {
            Self::from_yaml(&load_document(&path)?)?
        } else {
            debug!("No {} found, using default settings", SETTINGS_FILE);
            Self::default()
        };
        settings.apply_overrides(|var| std::env::var(var).ok());
        Ok(settings)
    }

    /// Parse settings from a YAML value; an empty document yields defaults
    pub fn from_yaml(yaml: &serde_yaml::Value) -> ConfigResult<Self> {
        if yaml.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(yaml.clone()).map_err(|e| ConfigError::InvalidValue {
            key: SETTINGS_FILE.to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply overrides from a variable lookup (the environment in production)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DEVICE_TYPES) {
            self.device_types_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_HOME_FILE) {
            self.home_file = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.device_types_path, PathBuf::from("device_types"));
        assert_eq!(settings.home_file, PathBuf::from("home.yaml"));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_parse_from_yaml() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            r#"
device_types_path: /etc/synthetic_home/device_types
home_file: houses/cottage.yaml
"#,
        )
        .unwrap();

        let settings = Settings::from_yaml(&yaml).unwrap();
        assert_eq!(
            settings.device_types_path,
            PathBuf::from("/etc/synthetic_home/device_types")
        );
        assert_eq!(settings.home_file, PathBuf::from("houses/cottage.yaml"));
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("home: cottage.yaml\n").unwrap();
        let result = Settings::from_yaml(&yaml);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("SYNTHETIC_HOME_FILE", "other.yaml"),
            ("SYNTHETIC_HOME_LOG", "debug"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_overrides(|var| env.get(var).map(|v| v.to_string()));
        assert_eq!(settings.home_file, PathBuf::from("other.yaml"));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.device_types_path, PathBuf::from("device_types"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "log_level: warn\n").unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.log_level, "warn");
    }
}
