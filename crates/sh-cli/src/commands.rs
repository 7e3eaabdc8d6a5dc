//! Command implementations
//!
//! Each command returns its output instead of printing it so it can be
//! exercised without a terminal.

use anyhow::{Context, Result};
use sh_config::Settings;
use sh_core::SymbolTable;
use sh_model::{
    dump_registry, load_home, load_registry, CompiledHome, DeviceStateStore, DeviceTypeRegistry,
};
use std::path::Path;
use tracing::info;

use crate::args::{Args, PresetSelection};

/// Effective inputs for a run: settings with command line overrides applied
pub fn apply_args(mut settings: Settings, args: &Args) -> Settings {
    if let Some(path) = &args.home_file {
        settings.home_file = path.clone();
    }
    if let Some(path) = &args.device_types {
        settings.device_types_path = path.clone();
    }
    settings
}

fn load_catalog(path: &Path) -> Result<DeviceTypeRegistry> {
    load_registry(path).with_context(|| format!("Failed to load device types from {:?}", path))
}

fn build(settings: &Settings, presets: &[PresetSelection]) -> Result<CompiledHome> {
    let catalog = load_catalog(&settings.device_types_path)?;
    let mut home = load_home(&settings.home_file)
        .with_context(|| format!("Failed to load home from {:?}", settings.home_file))?;

    let mut store = DeviceStateStore::new();
    for preset in presets {
        store.set(preset.area.as_deref(), &preset.device, &preset.key);
    }
    store.apply(&mut home)?;

    let compiled = CompiledHome::build(home, &catalog, &SymbolTable::home_assistant())
        .with_context(|| format!("Failed to compile {:?}", settings.home_file))?;
    Ok(compiled)
}

/// Compile the home and render it as pretty JSON
pub fn compile(settings: &Settings, presets: &[PresetSelection]) -> Result<String> {
    let compiled = build(settings, presets)?;
    Ok(serde_json::to_string_pretty(&compiled)?)
}

/// Compile the home and summarize it
pub fn check(settings: &Settings, presets: &[PresetSelection]) -> Result<String> {
    let compiled = build(settings, presets)?;
    info!("{:?} is valid", settings.home_file);
    Ok(format!(
        "OK: {} devices with {} entities in {} areas",
        compiled.devices.len(),
        compiled.entity_count(),
        compiled.areas.len()
    ))
}

/// Render the device type catalog as YAML
pub fn dump(settings: &Settings) -> Result<String> {
    let catalog = load_catalog(&settings.device_types_path)?;
    Ok(dump_registry(&catalog)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Command;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Settings) {
        let dir = TempDir::new().unwrap();
        let types = dir.path().join("device_types");
        fs::create_dir(&types).unwrap();
        fs::write(
            types.join("camera.yaml"),
            r#"
device_type: camera
desc: A camera
entities:
  binary_sensor:
    - key: motion
      supported_attributes: [is_on=motion]
supported_state_attributes: [motion]
restorable_attributes:
  - key: idle
    attributes:
      motion: false
  - key: motion-detected
    attributes:
      motion: true
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("home.yaml"),
            "device_entities:\n  Porch:\n    - name: Camera\n      device_type: camera\n",
        )
        .unwrap();

        let settings = Settings {
            device_types_path: types,
            home_file: dir.path().join("home.yaml"),
            ..Settings::default()
        };
        (dir, settings)
    }

    #[test]
    fn test_apply_args() {
        let args = Args {
            command: Command::Check,
            home_file: Some(PathBuf::from("other.yaml")),
            device_types: None,
            presets: Vec::new(),
        };
        let settings = apply_args(Settings::default(), &args);
        assert_eq!(settings.home_file, PathBuf::from("other.yaml"));
        assert_eq!(settings.device_types_path, PathBuf::from("device_types"));
    }

    #[test]
    fn test_check() {
        let (_dir, settings) = workspace();
        let output = check(&settings, &[]).unwrap();
        assert_eq!(output, "OK: 1 devices with 1 entities in 1 areas");
    }

    #[test]
    fn test_compile_with_preset() {
        let (_dir, settings) = workspace();
        let presets = vec![PresetSelection {
            area: Some("Porch".to_string()),
            device: "Camera".to_string(),
            key: "motion-detected".to_string(),
        }];
        let output = compile(&settings, &presets).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value["devices"][0]["entities"][0]["attributes"]["is_on"],
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_compile_unknown_preset_fails() {
        let (_dir, settings) = workspace();
        let presets = vec![PresetSelection {
            area: Some("Porch".to_string()),
            device: "Camera".to_string(),
            key: "asleep".to_string(),
        }];
        let err = compile(&settings, &presets).unwrap_err();
        assert!(format!("{err:#}").contains("idle, motion-detected"));
    }

    #[test]
    fn test_missing_home() {
        let (dir, mut settings) = workspace();
        settings.home_file = dir.path().join("missing.yaml");
        assert!(check(&settings, &[]).is_err());
    }

    #[test]
    fn test_dump() {
        let (_dir, settings) = workspace();
        let output = dump(&settings).unwrap();
        assert!(output.starts_with("---\n"));
        assert!(output.contains("device_type: camera"));
    }
}
