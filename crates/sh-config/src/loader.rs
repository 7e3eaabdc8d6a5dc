//! YAML document loader with custom tag support

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Loads YAML documents, expanding `!include`, `!include_dir_named` and
/// `!env_var` tags.
///
/// Relative tag paths are resolved against the directory of the document
/// that contains the tag.
pub struct DocumentLoader {
    /// Base directory for documents given by relative path
    base_dir: PathBuf,
    /// Documents currently being expanded, innermost last
    include_stack: Vec<PathBuf>,
}

impl DocumentLoader {
    /// Create a loader resolving relative paths against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            include_stack: Vec::new(),
        }
    }

    /// Load and expand a YAML document from disk
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve_path(path.as_ref());
        debug!("Loading YAML document: {:?}", path);

        if self.include_stack.contains(&path) {
            return Err(ConfigError::CircularInclude { path });
        }

        let content = read_document(&path)?;

        self.include_stack.push(path.clone());
        let result = self.load_str(&content, &path);
        self.include_stack.pop();

        result
    }

    /// Load and expand a YAML document from a string
    pub fn load_str(&mut self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.expand(value, source_path)
    }

    fn expand(&mut self, value: Value, source_path: &Path) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.expand_tagged(*tagged, source_path),
            Value::Mapping(map) => {
                let mut result = Mapping::with_capacity(map.len());
                for (k, v) in map {
                    result.insert(k, self.expand(v, source_path)?);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => seq
                .into_iter()
                .map(|v| self.expand(v, source_path))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            other => Ok(other),
        }
    }

    fn expand_tagged(&mut self, tagged: TaggedValue, source_path: &Path) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!("Expanding tag '{}' with value {:?}", tag, tagged.value);

        match tag.as_str() {
            "!include" => {
                let path = self.tag_path(&tag, &tagged.value, source_path)?;
                debug!("Including document: {:?}", path);
                self.load_file(&path)
            }
            "!include_dir_named" => {
                let dir = self.tag_path(&tag, &tagged.value, source_path)?;
                self.include_dir_named(&dir)
            }
            "!env_var" => env_var(&tagged.value),
            _ => {
                // Unknown tags are kept so that decoding reports them in context
                let value = self.expand(tagged.value, source_path)?;
                Ok(Value::Tagged(Box::new(TaggedValue {
                    tag: tagged.tag,
                    value,
                })))
            }
        }
    }

    /// Include all YAML documents in a directory as a mapping keyed by file stem
    fn include_dir_named(&mut self, dir: &Path) -> ConfigResult<Value> {
        debug!("Including directory as named mapping: {:?}", dir);

        let mut result = Mapping::new();
        for file in yaml_files(dir)? {
            let name = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let content = self.load_file(&file)?;
            result.insert(Value::String(name), content);
        }

        Ok(Value::Mapping(result))
    }

    /// Interpret a tag argument as a path relative to the containing document
    fn tag_path(&self, tag: &str, value: &Value, source_path: &Path) -> ConfigResult<PathBuf> {
        let Value::String(path) = value else {
            return Err(ConfigError::InvalidIncludePath {
                path: format!("{tag} {value:?}"),
                reason: "path must be a string".to_string(),
            });
        };

        let path = Path::new(path);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let base_dir = source_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&self.base_dir);
        Ok(base_dir.join(path))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

fn env_var(value: &Value) -> ConfigResult<Value> {
    let Value::String(var) = value else {
        return Err(ConfigError::InvalidValue {
            key: "!env_var".to_string(),
            reason: "environment variable name must be a string".to_string(),
        });
    };

    let env_value =
        std::env::var(var).map_err(|_| ConfigError::EnvVarNotFound { var: var.clone() })?;
    debug!("Substituted env var: {}", var);
    Ok(Value::String(env_value))
}

fn read_document(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// List the YAML documents (`.yaml`/`.yml`) in a directory, sorted by name
pub fn yaml_files(dir: &Path) -> ConfigResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConfigError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| ConfigError::ReadFile {
            path: dir.to_path_buf(),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Load a YAML document from disk, resolving tags relative to its directory
pub fn load_document(path: impl AsRef<Path>) -> ConfigResult<Value> {
    DocumentLoader::new(".").load_file(path)
}

/// Load a YAML document from a string; `source_name` is used in errors and
/// relative tag paths resolve against the current directory
pub fn load_document_str(content: &str, source_name: &str) -> ConfigResult<Value> {
    DocumentLoader::new(".").load_str(content, Path::new(source_name))
}
