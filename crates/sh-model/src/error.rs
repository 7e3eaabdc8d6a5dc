//! Error types for compiling a synthetic home

use sh_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while loading, validating or expanding a synthetic home.
///
/// Every error is fatal to the compilation that raised it.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A source document or directory does not exist
    #[error("configuration file '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The home document could not be decoded
    #[error("unable to parse home document {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// A device type template is malformed or missing a required field
    #[error("unable to decode device type {source_name}: {message}")]
    Schema {
        source_name: String,
        message: String,
    },

    /// A device type is stored under a name that does not match its identifier
    #[error("device type '{device_type}' name does not match '{source_name}'")]
    Naming {
        source_name: String,
        device_type: String,
    },

    /// Two templates declare the same identifier
    #[error("device type registry contains duplicate device type '{device_type}'")]
    DuplicateType { device_type: String },

    /// A device references a type missing from the merged registry
    #[error("device '{device}' has device type '{device_type}' not found in device type registry")]
    UnknownDeviceType { device: String, device_type: String },

    /// A device sets an attribute its type does not support
    #[error("device '{device}' has attribute '{attribute}' not supported by device type '{device_type}'")]
    UnsupportedAttribute {
        device: String,
        device_type: String,
        attribute: String,
    },

    /// No device types are available after merging
    #[error("device type registry is empty")]
    EmptyRegistry,

    /// A device selects a preset its type does not define
    #[error(
        "device '{device}' has restorable attributes key '{key}' not found in device type '{device_type}', expected one of: {}",
        .valid_keys.join(", ")
    )]
    UnknownPreset {
        device: String,
        device_type: String,
        key: String,
        valid_keys: Vec<String>,
    },

    /// A symbolic constant is malformed or unknown to the resolver
    #[error("unable to resolve symbol '{token}' (expected '{}'): {reason}", sh_core::SYMBOL_SHAPE)]
    SymbolResolution { token: String, reason: String },

    /// A device state selection names a device that is not in the home
    #[error("device '{device}' not found in area '{}'", .area.as_deref().unwrap_or("<services>"))]
    DeviceNotFound {
        area: Option<String>,
        device: String,
    },

    /// A model could not be rendered as YAML
    #[error("unable to render YAML: {0}")]
    Render(#[from] serde_yaml::Error),

    /// Any other document loading failure
    #[error(transparent)]
    Config(ConfigError),
}

impl From<ConfigError> for ModelError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } | ConfigError::DirectoryNotFound { path } => {
                ModelError::NotFound { path }
            }
            ConfigError::ParseYaml { path, source } => ModelError::Parse {
                source_name: path.display().to_string(),
                message: source.to_string(),
            },
            other => ModelError::Config(other),
        }
    }
}
