//! End-to-end compilation tests against the YAML fixtures in `tests/fixtures`

use serde_json::json;
use sh_core::{Platform, SymbolTable};
use sh_model::{
    device_unique_id, load_home, load_registry, parse_home, CompiledHome, DeviceStateStore,
    DeviceTypeRegistry, ModelError,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn catalog() -> DeviceTypeRegistry {
    load_registry(fixture("device_types")).unwrap()
}

fn build(home_file: &str) -> CompiledHome {
    let home = load_home(fixture(home_file)).unwrap();
    CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_motion_sensor_without_attributes() {
    let compiled = build("homes/scenarios.yaml");
    let motion = compiled.device(Some("Hallway"), "Motion").unwrap();

    let entities: Vec<(Platform, &str)> = motion
        .entities
        .iter()
        .map(|e| (e.platform, e.key.as_str()))
        .collect();
    assert_eq!(
        entities,
        vec![
            (Platform::BinarySensor, "motion"),
            (Platform::BinarySensor, "battery"),
        ]
    );
    assert!(motion.entities.iter().all(|e| e.attributes.is_empty()));
}

#[test]
fn test_camera_preset_clears_unselected_state() {
    let compiled = build("homes/scenarios.yaml");
    let camera = compiled.device(Some("Porch"), "Doorbell Camera").unwrap();

    assert_eq!(
        serde_json::to_value(&camera.device.attributes).unwrap(),
        json!({"motion": true})
    );
    let entity = camera.entity("camera").unwrap();
    assert_eq!(entity.get("motion"), Some(&json!(true)));
    assert_eq!(entity.get("person"), None);
}

#[test]
fn test_unknown_preset_lists_valid_keys() {
    let home = parse_home(
        "device_entities:\n  Porch:\n    - name: Camera\n      device_type: camera\n      restorable_attribute_keys: [sleeping]\n",
        "home.yaml",
    )
    .unwrap();

    let err = CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap_err();
    match &err {
        ModelError::UnknownPreset {
            device,
            key,
            valid_keys,
            ..
        } => {
            assert_eq!(device, "Camera");
            assert_eq!(key, "sleeping");
            assert_eq!(valid_keys, &vec!["idle", "motion-detected"]);
        }
        other => panic!("expected unknown preset, got {other:?}"),
    }
    assert!(err.to_string().contains("idle, motion-detected"));
}

// ============================================================================
// Attribute handling
// ============================================================================

#[test]
fn test_alias_and_symbols() {
    let compiled = build("homes/scenarios.yaml");
    let lamp = compiled.device(Some("Living Room"), "Lamp").unwrap();
    let light = lamp.entity("light").unwrap();

    assert_eq!(light.platform, Platform::Light);
    assert_eq!(light.get("brightness"), Some(&json!(200)));
    assert_eq!(light.get("level"), None);
    assert_eq!(light.get("color_modes"), Some(&json!(["brightness"])));
    // TRANSITION | FLASH
    assert_eq!(light.get("supported_features"), Some(&json!(40)));
}

#[test]
fn test_alias_omitted_when_absent() {
    let home = parse_home(
        "device_entities:\n  Den:\n    - name: Lamp\n      device_type: smart-light\n",
        "home.yaml",
    )
    .unwrap();
    let compiled =
        CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap();
    let light = compiled.devices[0].entity("light").unwrap();
    assert!(light.attributes.is_empty());
}

#[test]
fn test_preset_overlay_precedence() {
    let compiled = build("homes/local-types.yaml");
    let stepper = compiled.device(Some("Study"), "Stepper").unwrap();
    let state = stepper.entity("state").unwrap();

    assert_eq!(
        serde_json::to_value(&state.attributes).unwrap(),
        json!({"a": 1, "b": 3, "name": "desk"})
    );
    let keys: Vec<&String> = state.attributes.keys().collect();
    assert_eq!(keys, vec!["a", "b", "name"]);
}

#[test]
fn test_unsupported_attribute_names_device_and_key() {
    let home = parse_home(
        "device_entities:\n  Hallway:\n    - name: Motion\n      device_type: motion-sensor\n      attributes:\n        color: red\n",
        "home.yaml",
    )
    .unwrap();

    let err = CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::UnsupportedAttribute { ref device, ref attribute, .. }
            if device == "Motion" && attribute == "color"
    ));
}

#[test]
fn test_unknown_symbol_fails_compilation() {
    let home = parse_home(
        "device_entities:\n  Den:\n    - name: Lamp\n      device_type: smart-light\n      attributes:\n        color_modes: [light.ColorMode.PLAID]\n",
        "home.yaml",
    )
    .unwrap();

    let err = CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::SymbolResolution { ref token, .. } if token == "light.ColorMode.PLAID"
    ));
}

#[test]
fn test_dotted_plain_strings_are_kept() {
    let home = parse_home(
        r#"
device_type_registry:
  device_types:
    speaker:
      device_type: speaker
      desc: A speaker
      entities:
        media_player:
          - key: speaker
            supported_attributes: [media_title, device_class]
      supported_attributes: [device_class]
      supported_state_attributes: [media_title]
device_entities:
  Den:
    - name: Speaker
      device_type: speaker
      attributes:
        media_title: Mr.Brightside.mp3
        device_class: media_player.MediaPlayerDeviceClass.SPEAKER
"#,
        "home.yaml",
    )
    .unwrap();

    let compiled = CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap();
    let speaker = compiled.device(Some("Den"), "Speaker").unwrap();
    let entity = speaker.entity("speaker").unwrap();
    assert_eq!(entity.get("media_title"), Some(&json!("Mr.Brightside.mp3")));
    assert_eq!(entity.get("device_class"), Some(&json!("speaker")));
}

#[test]
fn test_malformed_member_fails_compilation() {
    let home = parse_home(
        "device_entities:\n  Den:\n    - name: Lamp\n      device_type: smart-light\n      attributes:\n        supported_features: cover.CoverEntityFeature.open\n",
        "home.yaml",
    )
    .unwrap();

    let err = CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::SymbolResolution { ref token, .. } if token == "cover.CoverEntityFeature.open"
    ));
}

// ============================================================================
// Registry merge
// ============================================================================

#[test]
fn test_home_local_type_wins() {
    let catalog = catalog();
    let home = load_home(fixture("homes/local-types.yaml")).unwrap();
    let compiled = CompiledHome::build(home, &catalog, &SymbolTable::home_assistant()).unwrap();

    let motion = compiled.device(Some("Hallway"), "Motion").unwrap();
    let keys: Vec<&str> = motion.entities.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["occupancy"]);

    // The shared catalog keeps its own definition
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get("motion-sensor").unwrap().desc, "A motion sensor");
    assert!(!catalog.contains("stepper"));
}

// ============================================================================
// Output shape
// ============================================================================

#[test]
fn test_device_order_and_areas() {
    let compiled = build("homes/local-types.yaml");
    assert_eq!(compiled.areas, vec!["Hallway", "Study"]);

    let devices: Vec<(Option<&str>, &str)> = compiled
        .devices
        .iter()
        .map(|d| (d.area_name.as_deref(), d.device.name.as_str()))
        .collect();
    assert_eq!(
        devices,
        vec![
            (Some("Hallway"), "Motion"),
            (Some("Study"), "Stepper"),
            (None, "Stepper Service"),
        ]
    );
}

#[test]
fn test_unique_ids() {
    let compiled = build("homes/local-types.yaml");
    let service = compiled.device(None, "Stepper Service").unwrap();
    assert_eq!(service.unique_id, device_unique_id(None, "Stepper Service"));

    let stepper = compiled.device(Some("Study"), "Stepper").unwrap();
    assert_eq!(stepper.unique_id, device_unique_id(Some("Study"), "Stepper"));
    assert_eq!(
        stepper.entity_unique_id(&stepper.entities[0]),
        format!("{}-state", stepper.unique_id)
    );
}

#[test]
fn test_recompilation_is_identical() {
    let first = build("homes/scenarios.yaml");
    let second = build("homes/scenarios.yaml");
    assert_eq!(first, second);
    assert_eq!(first.entity_count(), 4);
}

#[test]
fn test_compiled_home_serializes() {
    let compiled = build("homes/scenarios.yaml");
    let value = serde_json::to_value(&compiled).unwrap();
    assert_eq!(value["areas"], json!(["Hallway", "Porch", "Living Room"]));
    assert_eq!(value["devices"][0]["entities"][0]["platform"], json!("binary_sensor"));
}

// ============================================================================
// Runtime state changes
// ============================================================================

#[test]
fn test_state_store_recompile() {
    let mut store = DeviceStateStore::new();
    store.set(Some("Porch"), "Doorbell Camera", "idle");

    let mut home = load_home(fixture("homes/scenarios.yaml")).unwrap();
    store.apply(&mut home).unwrap();
    let compiled =
        CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap();

    let camera = compiled.device(Some("Porch"), "Doorbell Camera").unwrap();
    assert_eq!(
        serde_json::to_value(&camera.entity("camera").unwrap().attributes).unwrap(),
        json!({"motion": false, "person": false})
    );
}

#[test]
fn test_state_store_unknown_preset_fails_on_compile() {
    let mut store = DeviceStateStore::new();
    store.set(Some("Porch"), "Doorbell Camera", "asleep");

    let mut home = load_home(fixture("homes/scenarios.yaml")).unwrap();
    store.apply(&mut home).unwrap();
    let err = CompiledHome::build(home, &catalog(), &SymbolTable::home_assistant()).unwrap_err();
    assert!(matches!(err, ModelError::UnknownPreset { .. }));
}
