//! YAML document loading for Synthetic Home
//!
//! Device type templates and home documents are YAML. Documents are loaded
//! through [`DocumentLoader`], which understands a few custom tags so that a
//! large home can be split across files:
//!
//! - `!include path` - Include another YAML document
//! - `!include_dir_named dir` - Include all YAML documents in a directory as a
//!   mapping keyed by file stem
//! - `!env_var VAR` - Substitute an environment variable
//!
//! # Example
//!
//! ```ignore
//! use sh_config::{load_document, Settings};
//!
//! let settings = Settings::load(".")?;
//! let home = load_document(&settings.home_file)?;
//! ```

mod error;
mod loader;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_document, load_document_str, yaml_files, DocumentLoader};
pub use settings::{Settings, SETTINGS_FILE};

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
