//! Restorable attribute presets

use tracing::trace;

use crate::device_type::DeviceType;
use crate::error::{ModelError, ModelResult};
use crate::home::Device;

/// Apply the device's selected presets to its attributes.
///
/// When at least one preset is selected, every state attribute of the type
/// is removed from the device before the presets are overlaid in selection
/// order, so a preset always replaces the previous state instead of merging
/// with it. A device with no selected presets is left untouched.
pub fn resolve(device: &mut Device, device_type: &DeviceType) -> ModelResult<()> {
    if device.restorable_attribute_keys.is_empty() {
        return Ok(());
    }

    // Look up every preset first so a bad key leaves the device unchanged
    let presets = device
        .restorable_attribute_keys
        .iter()
        .map(|key| {
            device_type
                .restorable_attributes(key)
                .ok_or_else(|| ModelError::UnknownPreset {
                    device: device.name.clone(),
                    device_type: device_type.device_type.clone(),
                    key: key.clone(),
                    valid_keys: device_type.restorable_keys(),
                })
        })
        .collect::<ModelResult<Vec<_>>>()?;

    for name in device_type.state_attributes() {
        device.attributes.shift_remove(name);
    }
    for preset in presets {
        trace!("Applying preset '{}' to '{}'", preset.key, device.name);
        for (key, value) in &preset.attributes {
            device.attributes.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}
