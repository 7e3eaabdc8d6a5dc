//! Device type catalog dump

use serde::Serialize;

use crate::device_type::DeviceTypeRegistry;
use crate::error::ModelResult;

#[derive(Serialize)]
struct DumpEntry<'a> {
    device_type: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    desc: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    supported_attributes: Vec<&'a str>,
}

/// Render a registry as a YAML list sorted by device type.
///
/// Each entry has the type identifier, its description and every supported
/// attribute (static and state) sorted by name; empty fields are omitted.
pub fn dump_registry(registry: &DeviceTypeRegistry) -> ModelResult<String> {
    let mut entries: Vec<DumpEntry> = registry
        .iter()
        .map(|device_type| {
            let mut supported_attributes: Vec<&str> = device_type.supported_attributes().collect();
            supported_attributes.sort_unstable();
            DumpEntry {
                device_type: &device_type.device_type,
                desc: &device_type.desc,
                supported_attributes,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.device_type.cmp(b.device_type));

    Ok(format!("---\n{}", serde_yaml::to_string(&entries)?))
}
