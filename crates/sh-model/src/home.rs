//! Home document model
//!
//! A home is a set of areas, each holding a list of devices, plus area-less
//! service devices such as a weather feed. Parsing is purely structural:
//! device types and attribute names are checked later by [`crate::compile`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sh_config::{load_document, load_document_str};
use std::path::Path;
use tracing::debug;

use crate::device_type::{DeviceType, DeviceTypeRegistry};
use crate::error::{ModelError, ModelResult};
use crate::Attributes;

/// Name used in errors for device types declared inline in a home document
const INLINE_REGISTRY: &str = "device_type_registry";

/// Device model information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceInfo {
    /// The model name of the device e.g. 'Learning Thermostat'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// The manufacturer of the device e.g. 'Nest'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,

    /// The firmware version string of the device e.g. '1.0.2'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,
}

/// A synthetic device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    pub name: String,

    /// Identifier of the device type in the registry
    pub device_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,

    /// Raw attribute values as declared, in document order
    #[serde(default)]
    pub attributes: Attributes,

    /// Presets to apply, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restorable_attribute_keys: Vec<String>,
}

impl Device {
    pub fn new(name: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
            device_info: None,
            attributes: Attributes::new(),
            restorable_attribute_keys: Vec::new(),
        }
    }
}

/// Data about a synthetic home
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Home {
    /// Devices by area, in document order
    pub device_entities: IndexMap<String, Vec<Device>>,

    /// Devices not located in any area
    pub services: Vec<Device>,

    /// Device types declared by the home itself
    pub device_type_registry: Option<DeviceTypeRegistry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct HomeDocument {
    #[serde(default)]
    device_entities: IndexMap<String, Vec<Device>>,
    #[serde(default)]
    services: Vec<Device>,
    #[serde(default)]
    device_type_registry: Option<RegistryDocument>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryDocument {
    #[serde(default)]
    device_types: IndexMap<String, serde_yaml::Value>,
}

impl Home {
    /// Decode a home from an already loaded YAML value
    pub fn from_value(value: serde_yaml::Value, source_name: &str) -> ModelResult<Self> {
        let doc: HomeDocument = serde_yaml::from_value(value).map_err(|e| ModelError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

        let device_type_registry = doc
            .device_type_registry
            .map(|registry| inline_registry(registry.device_types))
            .transpose()?;

        Ok(Self {
            device_entities: doc.device_entities,
            services: doc.services,
            device_type_registry,
        })
    }

    /// Area names in document order
    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.device_entities.keys().map(String::as_str)
    }

    /// Every device with its area, areas first then services
    pub fn devices(&self) -> impl Iterator<Item = (Option<&str>, &Device)> {
        self.device_entities
            .iter()
            .flat_map(|(area, devices)| devices.iter().map(move |d| (Some(area.as_str()), d)))
            .chain(self.services.iter().map(|d| (None, d)))
    }

    /// Consume the home, yielding every device with its owned area name
    pub fn into_devices(self) -> impl Iterator<Item = (Option<String>, Device)> {
        self.device_entities
            .into_iter()
            .flat_map(|(area, devices)| {
                devices
                    .into_iter()
                    .map(move |d| (Some(area.clone()), d))
            })
            .chain(self.services.into_iter().map(|d| (None, d)))
    }

    /// Find a device by area and name; `None` as the area searches services
    pub fn find_device_mut(&mut self, area: Option<&str>, name: &str) -> Option<&mut Device> {
        let devices = match area {
            Some(area) => self.device_entities.get_mut(area)?,
            None => &mut self.services,
        };
        devices.iter_mut().find(|d| d.name == name)
    }
}

fn inline_registry(
    device_types: IndexMap<String, serde_yaml::Value>,
) -> ModelResult<DeviceTypeRegistry> {
    let mut registry = DeviceTypeRegistry::new();
    for (id, body) in device_types {
        let device_type = DeviceType::from_value(body, INLINE_REGISTRY)?;
        if device_type.device_type != id {
            return Err(ModelError::Naming {
                source_name: format!("{INLINE_REGISTRY}.device_types.{id}"),
                device_type: device_type.device_type,
            });
        }
        registry.insert(device_type)?;
    }
    debug!("Home declares {} device types", registry.len());
    Ok(registry)
}

/// Load a home document from disk
pub fn load_home(path: impl AsRef<Path>) -> ModelResult<Home> {
    let path = path.as_ref();
    debug!("Loading home from {:?}", path);
    let value = load_document(path)?;
    Home::from_value(value, &path.display().to_string())
}

/// Parse a home document from text
pub fn parse_home(content: &str, source_name: &str) -> ModelResult<Home> {
    let value = load_document_str(content, source_name)?;
    Home::from_value(value, source_name)
}
