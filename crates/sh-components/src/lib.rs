//! Animated entity simulators
//!
//! Small tick-driven state machines seeded from the entities of a
//! [`CompiledHome`]: a positionable cover and a media player. The caller owns
//! the clock and calls `tick` as often as it likes.

mod cover;
mod error;
mod media_player;

pub use cover::{CoverSimulator, CoverState, COVER_STEP};
pub use error::{ComponentError, ComponentResult};
pub use media_player::{MediaPlayerSimulator, MediaPlayerState, PLAYLIST, VOLUME_STEP};

use indexmap::IndexMap;
use sh_core::Platform;
use sh_model::{Attributes, CompiledHome, ResolvedEntity};
use tracing::{debug, info};

/// A simulated entity
#[derive(Debug, Clone, PartialEq)]
pub enum Simulator {
    Cover(CoverSimulator),
    MediaPlayer(MediaPlayerSimulator),
}

impl Simulator {
    /// Build a simulator for an entity, `None` for platforms without one
    pub fn for_entity(entity: &ResolvedEntity) -> Option<ComponentResult<Self>> {
        match entity.platform {
            Platform::Cover => Some(CoverSimulator::from_entity(entity).map(Simulator::Cover)),
            Platform::MediaPlayer => {
                Some(MediaPlayerSimulator::from_entity(entity).map(Simulator::MediaPlayer))
            }
            _ => None,
        }
    }

    /// Advance time by one step; returns whether anything changed
    pub fn tick(&mut self) -> bool {
        match self {
            Simulator::Cover(cover) => cover.tick(),
            // Playback has no time-driven state
            Simulator::MediaPlayer(_) => false,
        }
    }

    pub fn attributes(&self) -> Attributes {
        match self {
            Simulator::Cover(cover) => cover.attributes(),
            Simulator::MediaPlayer(player) => player.attributes(),
        }
    }
}

/// Create simulators for every animated entity in a home, keyed by entity
/// unique id in compilation order
pub fn simulators(home: &CompiledHome) -> ComponentResult<IndexMap<String, Simulator>> {
    let mut simulators = IndexMap::new();
    for device in &home.devices {
        for entity in &device.entities {
            if let Some(simulator) = Simulator::for_entity(entity) {
                let unique_id = device.entity_unique_id(entity);
                debug!("Simulating {} entity {}", entity.platform, unique_id);
                simulators.insert(unique_id, simulator?);
            }
        }
    }
    info!("Created {} simulators", simulators.len());
    Ok(simulators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sh_core::SymbolTable;
    use sh_model::{parse_home, DeviceType, DeviceTypeRegistry};

    fn compiled_home() -> CompiledHome {
        let catalog: DeviceTypeRegistry = [
            DeviceType::from_yaml_str(
                r#"
device_type: smart-blinds
desc: Blinds
entities:
  cover:
    - key: blinds
      supported_attributes: [current_position=position]
supported_state_attributes: [position]
"#,
                "smart-blinds.yaml",
            )
            .unwrap(),
            DeviceType::from_yaml_str(
                r#"
device_type: speaker
desc: Speaker
entities:
  media_player:
    - key: speaker
      supported_attributes: [state]
  sensor:
    - signal
supported_state_attributes: [state]
"#,
                "speaker.yaml",
            )
            .unwrap(),
        ]
        .into_iter()
        .collect();
        let home = parse_home(
            r#"
device_entities:
  Office:
    - name: Blinds
      device_type: smart-blinds
      attributes:
        position: 20
    - name: Speaker
      device_type: speaker
      attributes:
        state: media_player.MediaPlayerState.PAUSED
"#,
            "home.yaml",
        )
        .unwrap();
        CompiledHome::build(home, &catalog, &SymbolTable::home_assistant()).unwrap()
    }

    #[test]
    fn test_simulators_for_home() {
        let home = compiled_home();
        let mut simulators = simulators(&home).unwrap();
        assert_eq!(simulators.len(), 2);

        let blinds = &home.devices[0];
        let blinds_id = blinds.entity_unique_id(&blinds.entities[0]);
        let Some(Simulator::Cover(cover)) = simulators.get_mut(&blinds_id) else {
            panic!("expected a cover simulator for {blinds_id}");
        };
        assert_eq!(cover.position(), 20);
        cover.close();

        let speaker = &home.devices[1];
        let speaker_id = speaker.entity_unique_id(&speaker.entities[0]);
        assert!(matches!(
            simulators.get(&speaker_id),
            Some(Simulator::MediaPlayer(player)) if player.state() == MediaPlayerState::Paused
        ));
    }

    #[test]
    fn test_simulators_for_dashed_names() {
        let catalog: DeviceTypeRegistry = [DeviceType::from_yaml_str(
            r#"
device_type: smart-blinds
desc: Blinds
entities:
  cover:
    - key: blinds
      supported_attributes: [current_position=position]
supported_state_attributes: [position]
"#,
            "smart-blinds.yaml",
        )
        .unwrap()]
        .into_iter()
        .collect();
        let home = parse_home(
            r#"
device_entities:
  Guest-Bedroom:
    - name: Lamp
      device_type: smart-blinds
  Guest:
    - name: Bedroom-Lamp
      device_type: smart-blinds
"#,
            "home.yaml",
        )
        .unwrap();
        let home = CompiledHome::build(home, &catalog, &SymbolTable::home_assistant()).unwrap();

        let simulators = simulators(&home).unwrap();
        assert_eq!(simulators.len(), 2);
    }

    #[test]
    fn test_tick_all() {
        let home = compiled_home();
        let mut simulators = simulators(&home).unwrap();
        for simulator in simulators.values_mut() {
            if let Simulator::Cover(cover) = simulator {
                cover.open();
            }
        }

        let mut ticks = 0;
        while simulators.values_mut().fold(false, |moved, s| s.tick() || moved) {
            ticks += 1;
        }
        assert_eq!(ticks, 8);

        let attributes = simulators[0].attributes();
        assert_eq!(attributes["current_position"], serde_json::json!(100));
        assert_eq!(attributes["state"], serde_json::json!("open"));
    }
}
