//! Runtime preset selections
//!
//! The control surface for snapping devices into a named state at runtime.
//! Selections are recorded here and applied to a freshly parsed [`Home`]
//! before each recompilation; a home is never patched incrementally.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::home::Home;

type DeviceKey = (Option<String>, String);

/// Preset selections by `(area, device name)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStateStore {
    selections: IndexMap<DeviceKey, String>,
}

impl DeviceStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a preset for a device, replacing any earlier selection.
    ///
    /// `area` is `None` for service devices.
    pub fn set(&mut self, area: Option<&str>, device: &str, preset_key: &str) {
        debug!(
            "Selecting preset '{}' for '{}' in {:?}",
            preset_key, device, area
        );
        self.selections.insert(
            (area.map(str::to_string), device.to_string()),
            preset_key.to_string(),
        );
    }

    /// Drop the selection for one device, returning the preset it had
    pub fn remove(&mut self, area: Option<&str>, device: &str) -> Option<String> {
        self.selections
            .shift_remove(&(area.map(str::to_string), device.to_string()))
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn get(&self, area: Option<&str>, device: &str) -> Option<&str> {
        self.selections
            .get(&(area.map(str::to_string), device.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Replace the selected presets of every recorded device in `home`.
    ///
    /// Preset keys are not checked here; an unknown key is reported when the
    /// home is compiled.
    pub fn apply(&self, home: &mut Home) -> ModelResult<()> {
        for ((area, name), preset_key) in &self.selections {
            let device = home.find_device_mut(area.as_deref(), name).ok_or_else(|| {
                ModelError::DeviceNotFound {
                    area: area.clone(),
                    device: name.clone(),
                }
            })?;
            device.restorable_attribute_keys = vec![preset_key.clone()];
        }
        Ok(())
    }
}
