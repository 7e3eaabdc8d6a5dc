//! Entity platforms
//!
//! A platform is the category of an entity (`binary_sensor`, `cover`, ...).
//! Device type templates group their entity templates by platform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a platform name is not recognized
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown platform '{0}'")]
pub struct PlatformError(pub String);

/// An entity platform supported by the synthetic home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    AlarmControlPanel,
    BinarySensor,
    Button,
    Calendar,
    Camera,
    Climate,
    Cover,
    DeviceTracker,
    Event,
    Fan,
    Humidifier,
    Light,
    Lock,
    MediaPlayer,
    Notify,
    Number,
    Select,
    Sensor,
    Switch,
    Text,
    Todo,
    Update,
    Vacuum,
    Valve,
    WaterHeater,
    Weather,
}

impl Platform {
    /// Every platform, in declaration order
    pub const ALL: [Platform; 26] = [
        Platform::AlarmControlPanel,
        Platform::BinarySensor,
        Platform::Button,
        Platform::Calendar,
        Platform::Camera,
        Platform::Climate,
        Platform::Cover,
        Platform::DeviceTracker,
        Platform::Event,
        Platform::Fan,
        Platform::Humidifier,
        Platform::Light,
        Platform::Lock,
        Platform::MediaPlayer,
        Platform::Notify,
        Platform::Number,
        Platform::Select,
        Platform::Sensor,
        Platform::Switch,
        Platform::Text,
        Platform::Todo,
        Platform::Update,
        Platform::Vacuum,
        Platform::Valve,
        Platform::WaterHeater,
        Platform::Weather,
    ];

    /// The platform's domain name as used in entity ids and symbols
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::AlarmControlPanel => "alarm_control_panel",
            Platform::BinarySensor => "binary_sensor",
            Platform::Button => "button",
            Platform::Calendar => "calendar",
            Platform::Camera => "camera",
            Platform::Climate => "climate",
            Platform::Cover => "cover",
            Platform::DeviceTracker => "device_tracker",
            Platform::Event => "event",
            Platform::Fan => "fan",
            Platform::Humidifier => "humidifier",
            Platform::Light => "light",
            Platform::Lock => "lock",
            Platform::MediaPlayer => "media_player",
            Platform::Notify => "notify",
            Platform::Number => "number",
            Platform::Select => "select",
            Platform::Sensor => "sensor",
            Platform::Switch => "switch",
            Platform::Text => "text",
            Platform::Todo => "todo",
            Platform::Update => "update",
            Platform::Vacuum => "vacuum",
            Platform::Valve => "valve",
            Platform::WaterHeater => "water_heater",
            Platform::Weather => "weather",
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| PlatformError(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform() {
        assert_eq!("binary_sensor".parse::<Platform>(), Ok(Platform::BinarySensor));
        assert_eq!("media_player".parse::<Platform>(), Ok(Platform::MediaPlayer));
        assert_eq!(
            "toaster".parse::<Platform>(),
            Err(PlatformError("toaster".to_string()))
        );
    }

    #[test]
    fn test_as_str_matches_serde() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
    }
}
