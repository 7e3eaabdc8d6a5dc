//! Registry merge and home validation

use tracing::{debug, info};

use crate::device_type::DeviceTypeRegistry;
use crate::error::{ModelError, ModelResult};
use crate::home::{Device, Home};

/// Merge the home's own device types over `catalog` and validate every device.
///
/// On success the home's registry is replaced by the merged registry. The
/// catalog is left untouched so it can be reused for other homes.
pub fn compile(mut home: Home, catalog: &DeviceTypeRegistry) -> ModelResult<Home> {
    let registry = merge_and_validate(&home, catalog)?;
    home.device_type_registry = Some(registry);
    Ok(home)
}

/// Build the merged registry for a home and validate its devices against it
pub(crate) fn merge_and_validate(
    home: &Home,
    catalog: &DeviceTypeRegistry,
) -> ModelResult<DeviceTypeRegistry> {
    let registry = match &home.device_type_registry {
        Some(local) => catalog.overlay(local),
        None => catalog.clone(),
    };
    if registry.is_empty() {
        return Err(ModelError::EmptyRegistry);
    }

    let mut count = 0;
    for (area, device) in home.devices() {
        debug!("Validating device '{}' in {:?}", device.name, area);
        validate_device(device, &registry)?;
        count += 1;
    }

    info!(
        "Validated {} devices against {} device types",
        count,
        registry.len()
    );
    Ok(registry)
}

fn validate_device(device: &Device, registry: &DeviceTypeRegistry) -> ModelResult<()> {
    let device_type =
        registry
            .get(&device.device_type)
            .ok_or_else(|| ModelError::UnknownDeviceType {
                device: device.name.clone(),
                device_type: device.device_type.clone(),
            })?;

    if let Some(attribute) = device
        .attributes
        .keys()
        .find(|key| !device_type.supports(key))
    {
        return Err(ModelError::UnsupportedAttribute {
            device: device.name.clone(),
            device_type: device.device_type.clone(),
            attribute: attribute.clone(),
        });
    }
    Ok(())
}
