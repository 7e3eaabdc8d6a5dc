//! Media player with a fixed playlist

use serde::{Deserialize, Serialize};
use serde_json::json;
use sh_core::{Platform, ATTR_SUPPORTED_FEATURES};
use sh_model::{Attributes, ResolvedEntity};
use tracing::trace;

use crate::error::{ComponentError, ComponentResult};

/// Volume change for `volume_up` / `volume_down`
pub const VOLUME_STEP: f64 = 0.1;

/// Tracks every simulated player cycles through
pub const PLAYLIST: [&str; 5] = [
    "Morning Light",
    "Harbor Lights",
    "Quiet Streets",
    "Northbound",
    "Last Call",
];

const ATTR_STATE: &str = "state";
const ATTR_VOLUME_LEVEL: &str = "volume_level";
const ATTR_MEDIA_TRACK: &str = "media_track";
const ATTR_DEVICE_CLASS: &str = "device_class";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaPlayerState {
    Off,
    On,
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaPlayerSimulator {
    state: MediaPlayerState,
    volume_level: f64,
    is_volume_muted: bool,
    media_track: usize,
    device_class: Option<String>,
    supported_features: u64,
}

impl Default for MediaPlayerSimulator {
    fn default() -> Self {
        Self {
            state: MediaPlayerState::Playing,
            volume_level: 1.0,
            is_volume_muted: false,
            media_track: 0,
            device_class: None,
            supported_features: 0,
        }
    }
}

impl MediaPlayerSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a player from a compiled `media_player` entity
    pub fn from_entity(entity: &ResolvedEntity) -> ComponentResult<Self> {
        if entity.platform != Platform::MediaPlayer {
            return Err(ComponentError::WrongPlatform {
                expected: Platform::MediaPlayer,
                actual: entity.platform,
            });
        }

        let mut player = Self::new();
        if let Some(value) = entity.get(ATTR_STATE) {
            player.state = serde_json::from_value(value.clone()).map_err(|e| {
                ComponentError::invalid(ATTR_STATE, e.to_string())
            })?;
        }
        if let Some(value) = entity.get(ATTR_VOLUME_LEVEL) {
            player.volume_level = value
                .as_f64()
                .filter(|v| (0.0..=1.0).contains(v))
                .ok_or_else(|| {
                    ComponentError::invalid(ATTR_VOLUME_LEVEL, "expected a number from 0 to 1")
                })?;
        }
        if let Some(value) = entity.get(ATTR_MEDIA_TRACK) {
            let track = value.as_u64().ok_or_else(|| {
                ComponentError::invalid(ATTR_MEDIA_TRACK, "expected a track index")
            })?;
            player.media_track = track as usize % PLAYLIST.len();
        }
        if let Some(value) = entity.get(ATTR_DEVICE_CLASS) {
            let device_class = value
                .as_str()
                .ok_or_else(|| ComponentError::invalid(ATTR_DEVICE_CLASS, "expected a string"))?;
            player.device_class = Some(device_class.to_string());
        }
        if let Some(value) = entity.get(ATTR_SUPPORTED_FEATURES) {
            player.supported_features = value.as_u64().ok_or_else(|| {
                ComponentError::invalid(ATTR_SUPPORTED_FEATURES, "expected an integer")
            })?;
        }
        Ok(player)
    }

    pub fn state(&self) -> MediaPlayerState {
        self.state
    }

    pub fn volume_level(&self) -> f64 {
        self.volume_level
    }

    pub fn is_volume_muted(&self) -> bool {
        self.is_volume_muted
    }

    pub fn media_track(&self) -> usize {
        self.media_track
    }

    pub fn media_title(&self) -> &'static str {
        PLAYLIST[self.media_track]
    }

    pub fn device_class(&self) -> Option<&str> {
        self.device_class.as_deref()
    }

    pub fn supported_features(&self) -> u64 {
        self.supported_features
    }

    pub fn turn_on(&mut self) {
        self.state = MediaPlayerState::Playing;
    }

    pub fn turn_off(&mut self) {
        self.state = MediaPlayerState::Off;
    }

    pub fn play(&mut self) {
        self.state = MediaPlayerState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = MediaPlayerState::Paused;
    }

    pub fn stop(&mut self) {
        self.state = MediaPlayerState::Off;
    }

    pub fn mute(&mut self, mute: bool) {
        self.is_volume_muted = mute;
    }

    pub fn set_volume_level(&mut self, volume: f64) {
        self.volume_level = round_volume(volume.clamp(0.0, 1.0));
    }

    pub fn volume_up(&mut self) {
        self.set_volume_level(self.volume_level + VOLUME_STEP);
    }

    pub fn volume_down(&mut self) {
        self.set_volume_level(self.volume_level - VOLUME_STEP);
    }

    /// Skip forward, wrapping to the first track
    pub fn next_track(&mut self) {
        self.media_track = (self.media_track + 1) % PLAYLIST.len();
        trace!("Now playing track {}", self.media_track);
    }

    /// Skip back, wrapping to the last track
    pub fn previous_track(&mut self) {
        self.media_track = (self.media_track + PLAYLIST.len() - 1) % PLAYLIST.len();
        trace!("Now playing track {}", self.media_track);
    }

    /// Current state as entity attributes
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(ATTR_STATE.to_string(), json!(self.state));
        attributes.insert(ATTR_VOLUME_LEVEL.to_string(), json!(self.volume_level));
        attributes.insert("is_volume_muted".to_string(), json!(self.is_volume_muted));
        attributes.insert(ATTR_MEDIA_TRACK.to_string(), json!(self.media_track));
        attributes.insert("media_title".to_string(), json!(self.media_title()));
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

// Volumes stay on tenths
fn round_volume(volume: f64) -> f64 {
    (volume * 10.0).round() / 10.0
}
