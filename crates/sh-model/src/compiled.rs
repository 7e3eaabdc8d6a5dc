//! The compiler's output

use serde::Serialize;
use sha2::{Digest, Sha256};
use sh_core::SymbolResolver;
use tracing::{debug, info};

use crate::compile::merge_and_validate;
use crate::device_type::DeviceTypeRegistry;
use crate::error::{ModelError, ModelResult};
use crate::expand::{expand, ResolvedEntity};
use crate::home::{Device, Home};
use crate::resolve::resolve;

/// Deterministic identifier for a device, stable across recompilation.
///
/// The digest covers a presence marker for the area followed by each name
/// with a length prefix, so no two `(area, name)` pairs share an input.
/// Service devices have no area and never collide with an area named `""`.
pub fn device_unique_id(area_name: Option<&str>, device_name: &str) -> String {
    let mut hasher = Sha256::new();
    match area_name {
        Some(area) => {
            hasher.update([1u8]);
            hash_part(&mut hasher, area);
        }
        None => hasher.update([0u8]),
    }
    hash_part(&mut hasher, device_name);
    hex::encode(hasher.finalize())
}

fn hash_part(hasher: &mut Sha256, part: &str) {
    hasher.update((part.len() as u64).to_be_bytes());
    hasher.update(part.as_bytes());
}

/// A device with its expanded entities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledDevice {
    pub unique_id: String,
    pub device: Device,
    pub area_name: Option<String>,
    pub entities: Vec<ResolvedEntity>,
}

impl CompiledDevice {
    /// Unique id of one of this device's entities
    pub fn entity_unique_id(&self, entity: &ResolvedEntity) -> String {
        format!("{}-{}", self.unique_id, entity.key)
    }

    /// Find an entity by key
    pub fn entity(&self, key: &str) -> Option<&ResolvedEntity> {
        self.entities.iter().find(|e| e.key == key)
    }
}

/// A fully compiled home
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledHome {
    /// Area names in document order
    pub areas: Vec<String>,
    /// Devices in document order, areas first then services
    pub devices: Vec<CompiledDevice>,
}

impl CompiledHome {
    /// Run the whole pipeline: merge and validate, apply presets, expand.
    ///
    /// Fails on the first error without producing partial output.
    pub fn build(
        home: Home,
        catalog: &DeviceTypeRegistry,
        resolver: &dyn SymbolResolver,
    ) -> ModelResult<Self> {
        let registry = merge_and_validate(&home, catalog)?;
        let areas: Vec<String> = home.areas().map(str::to_string).collect();

        let mut devices = Vec::new();
        for (area_name, mut device) in home.into_devices() {
            let device_type = registry.get(&device.device_type).ok_or_else(|| {
                ModelError::UnknownDeviceType {
                    device: device.name.clone(),
                    device_type: device.device_type.clone(),
                }
            })?;
            resolve(&mut device, device_type)?;
            let entities = expand(&device, device_type, resolver)?;
            debug!(
                "Compiled '{}' with {} entities",
                device.name,
                entities.len()
            );

            devices.push(CompiledDevice {
                unique_id: device_unique_id(area_name.as_deref(), &device.name),
                device,
                area_name,
                entities,
            });
        }

        info!(
            "Compiled {} devices in {} areas",
            devices.len(),
            areas.len()
        );
        Ok(Self { areas, devices })
    }

    /// Find a compiled device by area and name
    pub fn device(&self, area_name: Option<&str>, name: &str) -> Option<&CompiledDevice> {
        self.devices
            .iter()
            .find(|d| d.area_name.as_deref() == area_name && d.device.name == name)
    }

    /// Total number of entities across all devices
    pub fn entity_count(&self) -> usize {
        self.devices.iter().map(|d| d.entities.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_unique_id() {
        let id = device_unique_id(Some("Kitchen"), "Light");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id, device_unique_id(Some("Kitchen"), "Light"));
        assert_ne!(id, device_unique_id(Some("Bedroom"), "Light"));
        assert_ne!(id, device_unique_id(Some("Kitchen"), "Lamp"));
    }

    #[test]
    fn test_device_unique_id_matches_digest() {
        let mut input = vec![1u8];
        input.extend_from_slice(&7u64.to_be_bytes());
        input.extend_from_slice(b"Kitchen");
        input.extend_from_slice(&5u64.to_be_bytes());
        input.extend_from_slice(b"Light");
        let expected = hex::encode(Sha256::digest(&input));
        assert_eq!(device_unique_id(Some("Kitchen"), "Light"), expected);

        let mut input = vec![0u8];
        input.extend_from_slice(&7u64.to_be_bytes());
        input.extend_from_slice(b"Weather");
        let expected = hex::encode(Sha256::digest(&input));
        assert_eq!(device_unique_id(None, "Weather"), expected);
    }

    #[test]
    fn test_device_unique_id_separator_in_names() {
        assert_ne!(
            device_unique_id(Some("Guest-Bedroom"), "Lamp"),
            device_unique_id(Some("Guest"), "Bedroom-Lamp")
        );
        assert_ne!(
            device_unique_id(Some("Hall"), "-Lamp"),
            device_unique_id(Some("Hall-"), "Lamp")
        );
    }

    #[test]
    fn test_device_unique_id_service_differs_from_empty_area() {
        assert_ne!(device_unique_id(None, "Weather"), device_unique_id(Some(""), "Weather"));
    }
}
