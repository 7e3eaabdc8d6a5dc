//! Error types for document loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for document loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a YAML document
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document does not exist
    #[error("configuration file '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// Failed to read a file or directory
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML
    #[error("failed to parse YAML in {}: {source}", .path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A tag argument is not a usable path
    #[error("invalid include path '{path}': {reason}")]
    InvalidIncludePath { path: String, reason: String },

    /// Directory not found for !include_dir_named
    #[error("directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Circular include detected
    #[error("circular include detected: {}", .path.display())]
    CircularInclude { path: PathBuf },

    /// Environment variable not found
    #[error("environment variable '{var}' not set")]
    EnvVarNotFound { var: String },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
