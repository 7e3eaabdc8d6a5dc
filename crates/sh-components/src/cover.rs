//! Positionable cover
//!
//! Position runs from 0 (closed) to 100 (open). A move sets a target and each
//! [`CoverSimulator::tick`] advances the position by a fixed step until the
//! target is reached.

use serde::Serialize;
use serde_json::json;
use sh_core::{Platform, ATTR_SUPPORTED_FEATURES};
use sh_model::{Attributes, ResolvedEntity};
use tracing::trace;

use crate::error::{ComponentError, ComponentResult};

/// Position change per tick
pub const COVER_STEP: u8 = 10;

const ATTR_CURRENT_POSITION: &str = "current_position";
const ATTR_DEVICE_CLASS: &str = "device_class";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverState {
    Opening,
    Closing,
    Open,
    Closed,
}

impl CoverState {
    fn at_rest(position: u8) -> Self {
        if position == 0 {
            CoverState::Closed
        } else {
            CoverState::Open
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverSimulator {
    position: u8,
    target: Option<u8>,
    state: CoverState,
    step: u8,
    device_class: Option<String>,
    supported_features: u64,
}

impl CoverSimulator {
    /// A stationary cover at `position`, clamped to 100
    pub fn new(position: u8) -> Self {
        let position = position.min(100);
        Self {
            position,
            target: None,
            state: CoverState::at_rest(position),
            step: COVER_STEP,
            device_class: None,
            supported_features: 0,
        }
    }

    /// Use a different step per tick; a zero step is raised to one
    pub fn with_step(mut self, step: u8) -> Self {
        self.step = step.max(1);
        self
    }

    /// Seed a cover from a compiled `cover` entity
    pub fn from_entity(entity: &ResolvedEntity) -> ComponentResult<Self> {
        if entity.platform != Platform::Cover {
            return Err(ComponentError::WrongPlatform {
                expected: Platform::Cover,
                actual: entity.platform,
            });
        }

        let position = match entity.get(ATTR_CURRENT_POSITION) {
            None => 0,
            Some(value) => value
                .as_u64()
                .filter(|p| *p <= 100)
                .ok_or_else(|| {
                    ComponentError::invalid(ATTR_CURRENT_POSITION, "expected an integer from 0 to 100")
                })? as u8,
        };
        let device_class = match entity.get(ATTR_DEVICE_CLASS) {
            None => None,
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or_else(|| ComponentError::invalid(ATTR_DEVICE_CLASS, "expected a string"))?
                    .to_string(),
            ),
        };
        let supported_features = match entity.get(ATTR_SUPPORTED_FEATURES) {
            None => 0,
            Some(value) => value.as_u64().ok_or_else(|| {
                ComponentError::invalid(ATTR_SUPPORTED_FEATURES, "expected an integer")
            })?,
        };

        let mut cover = Self::new(position);
        cover.device_class = device_class;
        cover.supported_features = supported_features;
        Ok(cover)
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn target(&self) -> Option<u8> {
        self.target
    }

    pub fn state(&self) -> CoverState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == CoverState::Closed
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    pub fn device_class(&self) -> Option<&str> {
        self.device_class.as_deref()
    }

    pub fn supported_features(&self) -> u64 {
        self.supported_features
    }

    pub fn open(&mut self) {
        self.set_position(100);
    }

    pub fn close(&mut self) {
        self.set_position(0);
    }

    /// Start moving toward `position`, clamped to 100
    pub fn set_position(&mut self, position: u8) {
        let position = position.min(100);
        if position == self.position {
            self.stop();
            return;
        }
        self.target = Some(position);
        self.state = if position > self.position {
            CoverState::Opening
        } else {
            CoverState::Closing
        };
    }

    /// Halt wherever the cover is
    pub fn stop(&mut self) {
        self.target = None;
        self.state = CoverState::at_rest(self.position);
    }

    /// Advance one step toward the target; returns whether the cover moved
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        self.position = if self.position < target {
            self.position.saturating_add(self.step).min(target)
        } else {
            self.position.saturating_sub(self.step).max(target)
        };
        trace!("Cover moved to {} (target {})", self.position, target);

        if self.position == target {
            self.stop();
        }
        true
    }

    /// Current state as entity attributes
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("state".to_string(), json!(self.state));
        attributes.insert(ATTR_CURRENT_POSITION.to_string(), json!(self.position));
        if let Some(device_class) = &self.device_class {
            attributes.insert(ATTR_DEVICE_CLASS.to_string(), json!(device_class));
        }
        attributes.insert(
            ATTR_SUPPORTED_FEATURES.to_string(),
            json!(self.supported_features),
        );
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover_entity(attributes: serde_json::Value) -> ResolvedEntity {
        ResolvedEntity {
            platform: Platform::Cover,
            key: "blinds".to_string(),
            attributes: serde_json::from_value(attributes).unwrap(),
        }
    }

    #[test]
    fn test_new_cover_state() {
        assert_eq!(CoverSimulator::new(0).state(), CoverState::Closed);
        assert_eq!(CoverSimulator::new(30).state(), CoverState::Open);
        assert_eq!(CoverSimulator::new(250).position(), 100);
    }

    #[test]
    fn test_open_in_steps() {
        let mut cover = CoverSimulator::new(0);
        cover.open();
        assert_eq!(cover.state(), CoverState::Opening);

        for expected in (10..100).step_by(10) {
            assert!(cover.tick());
            assert_eq!(cover.position(), expected as u8);
            assert_eq!(cover.state(), CoverState::Opening);
        }
        assert!(cover.tick());
        assert_eq!(cover.position(), 100);
        assert_eq!(cover.state(), CoverState::Open);
        assert!(!cover.is_moving());
        assert!(!cover.tick());
    }

    #[test]
    fn test_close_stops_exactly_at_zero() {
        let mut cover = CoverSimulator::new(25);
        cover.close();
        assert_eq!(cover.state(), CoverState::Closing);
        cover.tick();
        cover.tick();
        assert_eq!(cover.position(), 5);
        cover.tick();
        assert_eq!(cover.position(), 0);
        assert!(cover.is_closed());
    }

    #[test]
    fn test_set_position_clamps_to_target() {
        let mut cover = CoverSimulator::new(0);
        cover.set_position(35);
        while cover.tick() {}
        assert_eq!(cover.position(), 35);
        assert_eq!(cover.state(), CoverState::Open);

        cover.set_position(32);
        assert_eq!(cover.state(), CoverState::Closing);
        cover.tick();
        assert_eq!(cover.position(), 32);
        assert_eq!(cover.state(), CoverState::Open);
    }

    #[test]
    fn test_stop_midway() {
        let mut cover = CoverSimulator::new(100);
        cover.close();
        cover.tick();
        cover.stop();
        assert_eq!(cover.position(), 90);
        assert_eq!(cover.state(), CoverState::Open);
        assert!(!cover.tick());
    }

    #[test]
    fn test_custom_step() {
        let mut cover = CoverSimulator::new(0).with_step(40);
        cover.open();
        cover.tick();
        cover.tick();
        assert_eq!(cover.position(), 80);
        cover.tick();
        assert_eq!(cover.position(), 100);
    }

    #[test]
    fn test_from_entity() {
        let cover = CoverSimulator::from_entity(&cover_entity(json!({
            "current_position": 50,
            "device_class": "blind",
            "supported_features": 7,
        })))
        .unwrap();
        assert_eq!(cover.position(), 50);
        assert_eq!(cover.device_class(), Some("blind"));
        assert_eq!(cover.supported_features(), 7);

        let attributes = cover.attributes();
        assert_eq!(attributes["state"], json!("open"));
        assert_eq!(attributes["current_position"], json!(50));
    }

    #[test]
    fn test_from_entity_defaults_closed() {
        let cover = CoverSimulator::from_entity(&cover_entity(json!({}))).unwrap();
        assert!(cover.is_closed());
        assert_eq!(cover.device_class(), None);
    }

    #[test]
    fn test_from_entity_rejects_bad_position() {
        let err = CoverSimulator::from_entity(&cover_entity(json!({"current_position": 140})))
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidAttribute { ref attribute, .. } if attribute == "current_position"));
    }

    #[test]
    fn test_from_entity_wrong_platform() {
        let mut entity = cover_entity(json!({}));
        entity.platform = Platform::Light;
        let err = CoverSimulator::from_entity(&entity).unwrap_err();
        assert_eq!(
            err,
            ComponentError::WrongPlatform {
                expected: Platform::Cover,
                actual: Platform::Light,
            }
        );
    }
}
