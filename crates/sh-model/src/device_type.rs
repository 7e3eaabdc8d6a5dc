//! Device types and the device type registry
//!
//! A device type is a reusable template describing which entities a category
//! of device exposes and which attributes a device of that type may set.
//! Templates live one per YAML document in a catalog directory, and the
//! document's file stem must match its `device_type` identifier.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sh_config::{load_document, yaml_files, ConfigError};
use sh_core::Platform;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{ModelError, ModelResult};
use crate::Attributes;

/// How a device type classifies one of its supported attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Configuration of the device, e.g. a model name or feature flags
    Static,
    /// Part of the device's current state; replaced wholesale by presets
    State,
}

/// One supported attribute of an entity template.
///
/// Either a bare attribute name, shared by the device and the entity, or an
/// `entity_key=device_key` alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeSpec {
    Direct(String),
    Alias {
        entity_key: String,
        device_key: String,
    },
}

impl AttributeSpec {
    /// The attribute name on the device
    pub fn device_key(&self) -> &str {
        match self {
            AttributeSpec::Direct(name) => name,
            AttributeSpec::Alias { device_key, .. } => device_key,
        }
    }

    /// The attribute name on the resolved entity
    pub fn entity_key(&self) -> &str {
        match self {
            AttributeSpec::Direct(name) => name,
            AttributeSpec::Alias { entity_key, .. } => entity_key,
        }
    }
}

impl FromStr for AttributeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid supported attribute '{s}', expected 'name' or 'entity_name=device_name'");
        match s.split_once('=') {
            None if !s.is_empty() => Ok(AttributeSpec::Direct(s.to_string())),
            None => Err(invalid()),
            Some((entity_key, device_key))
                if !entity_key.is_empty() && !device_key.is_empty() && !device_key.contains('=') =>
            {
                Ok(AttributeSpec::Alias {
                    entity_key: entity_key.to_string(),
                    device_key: device_key.to_string(),
                })
            }
            Some(_) => Err(invalid()),
        }
    }
}

impl fmt::Display for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeSpec::Direct(name) => f.write_str(name),
            AttributeSpec::Alias {
                entity_key,
                device_key,
            } => write!(f, "{entity_key}={device_key}"),
        }
    }
}

/// Template for one entity created for every device of a type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "EntityTemplateDocument")]
pub struct EntityTemplate {
    /// The entity's role within its platform, e.g. "battery" or "hvac"
    pub key: String,
    /// Attributes copied from the device onto the entity, in order
    pub supported_attributes: Vec<AttributeSpec>,
}

/// Templates are written either as a bare key or as a full mapping
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityTemplateDocument {
    Key(String),
    Full {
        key: String,
        #[serde(default)]
        supported_attributes: Vec<String>,
    },
}

impl TryFrom<EntityTemplateDocument> for EntityTemplate {
    type Error = String;

    fn try_from(doc: EntityTemplateDocument) -> Result<Self, Self::Error> {
        match doc {
            EntityTemplateDocument::Key(key) => Ok(Self {
                key,
                supported_attributes: Vec::new(),
            }),
            EntityTemplateDocument::Full {
                key,
                supported_attributes,
            } => Ok(Self {
                key,
                supported_attributes: supported_attributes
                    .iter()
                    .map(|s| s.parse())
                    .collect::<Result<_, _>>()?,
            }),
        }
    }
}

/// A named preset of state attribute values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestorableAttributeSet {
    /// Preset name, e.g. "motion-detected"
    pub key: String,
    /// Attribute values applied when the preset is selected
    #[serde(default)]
    pub attributes: Attributes,
}

/// A device type template
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "DeviceTypeDocument")]
pub struct DeviceType {
    /// The identifier for the device type, e.g. "smart-lock"
    pub device_type: String,

    /// Human readable description
    pub desc: String,

    /// Entity templates by platform, in document order
    pub entities: IndexMap<Platform, Vec<EntityTemplate>>,

    /// Every supported attribute with its classification
    attributes: IndexMap<String, AttributeKind>,

    /// Presets selectable by devices of this type
    pub restorable_attributes: Vec<RestorableAttributeSet>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceTypeDocument {
    device_type: String,
    desc: String,
    #[serde(default)]
    entities: IndexMap<Platform, Vec<EntityTemplate>>,
    #[serde(default)]
    supported_attributes: Vec<String>,
    #[serde(default)]
    supported_state_attributes: Vec<String>,
    #[serde(default)]
    restorable_attributes: Vec<RestorableAttributeSet>,
}

impl TryFrom<DeviceTypeDocument> for DeviceType {
    type Error = String;

    fn try_from(doc: DeviceTypeDocument) -> Result<Self, Self::Error> {
        let mut attributes: IndexMap<String, AttributeKind> = doc
            .supported_attributes
            .into_iter()
            .map(|name| (name, AttributeKind::Static))
            .collect();
        // A name listed in both is a state attribute
        for name in doc.supported_state_attributes {
            attributes.insert(name, AttributeKind::State);
        }

        for (platform, templates) in &doc.entities {
            for template in templates {
                for spec in &template.supported_attributes {
                    if !attributes.contains_key(spec.device_key()) {
                        return Err(format!(
                            "entity '{}.{}' references attribute '{}' which is not a supported attribute",
                            platform,
                            template.key,
                            spec.device_key()
                        ));
                    }
                }
            }
        }

        let mut preset_keys = Vec::with_capacity(doc.restorable_attributes.len());
        for preset in &doc.restorable_attributes {
            if preset_keys.contains(&preset.key.as_str()) {
                return Err(format!(
                    "duplicate restorable attributes key '{}'",
                    preset.key
                ));
            }
            preset_keys.push(preset.key.as_str());
            if let Some(name) = preset.attributes.keys().find(|k| !attributes.contains_key(*k)) {
                return Err(format!(
                    "restorable attributes '{}' sets attribute '{}' which is not a supported attribute",
                    preset.key, name
                ));
            }
        }

        Ok(Self {
            device_type: doc.device_type,
            desc: doc.desc,
            entities: doc.entities,
            attributes,
            restorable_attributes: doc.restorable_attributes,
        })
    }
}

impl DeviceType {
    /// Decode a device type from a YAML value
    pub fn from_value(value: serde_yaml::Value, source_name: &str) -> ModelResult<Self> {
        serde_yaml::from_value(value).map_err(|e| ModelError::Schema {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Decode a device type from YAML text
    pub fn from_yaml_str(content: &str, source_name: &str) -> ModelResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ModelError::Schema {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Classification of an attribute, `None` if unsupported
    pub fn attribute_kind(&self, name: &str) -> Option<AttributeKind> {
        self.attributes.get(name).copied()
    }

    /// Whether a device of this type may set the attribute
    pub fn supports(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Names of all supported attributes, static and state, in document order
    pub fn supported_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Names of the state attributes
    pub fn state_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, kind)| **kind == AttributeKind::State)
            .map(|(name, _)| name.as_str())
    }

    /// Look up a preset by key
    pub fn restorable_attributes(&self, key: &str) -> Option<&RestorableAttributeSet> {
        self.restorable_attributes.iter().find(|r| r.key == key)
    }

    /// Keys of every preset, in document order
    pub fn restorable_keys(&self) -> Vec<String> {
        self.restorable_attributes
            .iter()
            .map(|r| r.key.clone())
            .collect()
    }

    /// Every entity template with its platform, in document order
    pub fn entity_templates(&self) -> impl Iterator<Item = (Platform, &EntityTemplate)> {
        self.entities
            .iter()
            .flat_map(|(platform, templates)| templates.iter().map(move |t| (*platform, t)))
    }
}

/// Registry of device types keyed by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceTypeRegistry {
    device_types: IndexMap<String, DeviceType>,
}

impl DeviceTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device type, rejecting duplicate identifiers
    pub fn insert(&mut self, device_type: DeviceType) -> ModelResult<()> {
        if self.device_types.contains_key(&device_type.device_type) {
            return Err(ModelError::DuplicateType {
                device_type: device_type.device_type,
            });
        }
        self.device_types
            .insert(device_type.device_type.clone(), device_type);
        Ok(())
    }

    pub fn get(&self, device_type: &str) -> Option<&DeviceType> {
        self.device_types.get(device_type)
    }

    pub fn contains(&self, device_type: &str) -> bool {
        self.device_types.contains_key(device_type)
    }

    pub fn len(&self) -> usize {
        self.device_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.device_types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceType> {
        self.device_types.values()
    }

    /// Build a new registry with `local` layered over this one.
    ///
    /// Entries in `local` replace entries with the same identifier; neither
    /// input is modified.
    pub fn overlay(&self, local: &DeviceTypeRegistry) -> DeviceTypeRegistry {
        let mut device_types = self.device_types.clone();
        for (id, device_type) in &local.device_types {
            if device_types.contains_key(id) {
                debug!("Home overrides device type '{}'", id);
            }
            device_types.insert(id.clone(), device_type.clone());
        }
        DeviceTypeRegistry { device_types }
    }
}

impl FromIterator<DeviceType> for DeviceTypeRegistry {
    /// Collects device types, later entries replacing earlier ones
    fn from_iter<I: IntoIterator<Item = DeviceType>>(iter: I) -> Self {
        Self {
            device_types: iter
                .into_iter()
                .map(|dt| (dt.device_type.clone(), dt))
                .collect(),
        }
    }
}

/// Load every device type template in a directory
pub fn load_registry(path: impl AsRef<Path>) -> ModelResult<DeviceTypeRegistry> {
    let dir = path.as_ref();
    debug!("Loading device type registry from {:?}", dir);

    let mut registry = DeviceTypeRegistry::new();
    for file in yaml_files(dir)? {
        let device_type = read_device_type(&file)?;
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem != device_type.device_type {
            return Err(ModelError::Naming {
                source_name: file.display().to_string(),
                device_type: device_type.device_type,
            });
        }
        registry.insert(device_type)?;
    }

    info!("Loaded {} device types from {:?}", registry.len(), dir);
    Ok(registry)
}

fn read_device_type(file: &Path) -> ModelResult<DeviceType> {
    debug!("Loading {:?}", file);
    let source_name = file.display().to_string();
    let value = load_document(file).map_err(|e| match e {
        ConfigError::ParseYaml { source, .. } => ModelError::Schema {
            source_name: source_name.clone(),
            message: source.to_string(),
        },
        other => other.into(),
    })?;
    DeviceType::from_value(value, &source_name)
}
