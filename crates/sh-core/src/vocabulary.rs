//! Home Assistant vocabulary
//!
//! The constants referenced by the bundled device types. Values match the
//! ones the Home Assistant frontend and core expect for each enum member.

use crate::SymbolTable;

impl SymbolTable {
    /// Build the table of Home Assistant device classes, state classes,
    /// feature flags, states and units.
    pub fn home_assistant() -> Self {
        let mut table = SymbolTable::new();

        // Device classes
        table
            .register_str_enum(
                "binary_sensor",
                "BinarySensorDeviceClass",
                &[
                    ("BATTERY", "battery"),
                    ("CONNECTIVITY", "connectivity"),
                    ("DOOR", "door"),
                    ("GARAGE_DOOR", "garage_door"),
                    ("LOCK", "lock"),
                    ("MOISTURE", "moisture"),
                    ("MOTION", "motion"),
                    ("OCCUPANCY", "occupancy"),
                    ("OPENING", "opening"),
                    ("PRESENCE", "presence"),
                    ("PROBLEM", "problem"),
                    ("SMOKE", "smoke"),
                    ("SOUND", "sound"),
                    ("TAMPER", "tamper"),
                    ("WINDOW", "window"),
                ],
            )
            .register_str_enum(
                "sensor",
                "SensorDeviceClass",
                &[
                    ("BATTERY", "battery"),
                    ("CO2", "carbon_dioxide"),
                    ("ENERGY", "energy"),
                    ("HUMIDITY", "humidity"),
                    ("ILLUMINANCE", "illuminance"),
                    ("POWER", "power"),
                    ("PRESSURE", "pressure"),
                    ("TEMPERATURE", "temperature"),
                    ("TIMESTAMP", "timestamp"),
                ],
            )
            .register_str_enum(
                "sensor",
                "SensorStateClass",
                &[
                    ("MEASUREMENT", "measurement"),
                    ("TOTAL", "total"),
                    ("TOTAL_INCREASING", "total_increasing"),
                ],
            )
            .register_str_enum(
                "cover",
                "CoverDeviceClass",
                &[
                    ("AWNING", "awning"),
                    ("BLIND", "blind"),
                    ("CURTAIN", "curtain"),
                    ("DOOR", "door"),
                    ("GARAGE", "garage"),
                    ("GATE", "gate"),
                    ("SHADE", "shade"),
                    ("SHUTTER", "shutter"),
                    ("WINDOW", "window"),
                ],
            )
            .register_str_enum(
                "media_player",
                "MediaPlayerDeviceClass",
                &[("RECEIVER", "receiver"), ("SPEAKER", "speaker"), ("TV", "tv")],
            )
            .register_str_enum(
                "switch",
                "SwitchDeviceClass",
                &[("OUTLET", "outlet"), ("SWITCH", "switch")],
            )
            .register_str_enum(
                "valve",
                "ValveDeviceClass",
                &[("GAS", "gas"), ("WATER", "water")],
            );

        // Feature flags
        table
            .register_flag_enum(
                "alarm_control_panel",
                "AlarmControlPanelEntityFeature",
                &[
                    ("ARM_HOME", 1),
                    ("ARM_AWAY", 2),
                    ("ARM_NIGHT", 4),
                    ("TRIGGER", 8),
                    ("ARM_CUSTOM_BYPASS", 16),
                    ("ARM_VACATION", 32),
                ],
            )
            .register_flag_enum(
                "climate",
                "ClimateEntityFeature",
                &[
                    ("TARGET_TEMPERATURE", 1),
                    ("TARGET_TEMPERATURE_RANGE", 2),
                    ("TARGET_HUMIDITY", 4),
                    ("FAN_MODE", 8),
                    ("PRESET_MODE", 16),
                    ("SWING_MODE", 32),
                    ("TURN_OFF", 128),
                    ("TURN_ON", 256),
                ],
            )
            .register_flag_enum(
                "cover",
                "CoverEntityFeature",
                &[
                    ("OPEN", 1),
                    ("CLOSE", 2),
                    ("SET_POSITION", 4),
                    ("STOP", 8),
                    ("OPEN_TILT", 16),
                    ("CLOSE_TILT", 32),
                    ("STOP_TILT", 64),
                    ("SET_TILT_POSITION", 128),
                ],
            )
            .register_flag_enum(
                "fan",
                "FanEntityFeature",
                &[
                    ("SET_SPEED", 1),
                    ("OSCILLATE", 2),
                    ("DIRECTION", 4),
                    ("PRESET_MODE", 8),
                    ("TURN_OFF", 16),
                    ("TURN_ON", 32),
                ],
            )
            .register_flag_enum(
                "light",
                "LightEntityFeature",
                &[("EFFECT", 4), ("FLASH", 8), ("TRANSITION", 32)],
            )
            .register_flag_enum("lock", "LockEntityFeature", &[("OPEN", 1)])
            .register_flag_enum(
                "media_player",
                "MediaPlayerEntityFeature",
                &[
                    ("PAUSE", 1),
                    ("SEEK", 2),
                    ("VOLUME_SET", 4),
                    ("VOLUME_MUTE", 8),
                    ("PREVIOUS_TRACK", 16),
                    ("NEXT_TRACK", 32),
                    ("TURN_ON", 128),
                    ("TURN_OFF", 256),
                    ("PLAY_MEDIA", 512),
                    ("VOLUME_STEP", 1024),
                    ("SELECT_SOURCE", 2048),
                    ("STOP", 4096),
                    ("CLEAR_PLAYLIST", 8192),
                    ("PLAY", 16384),
                    ("SHUFFLE_SET", 32768),
                    ("SELECT_SOUND_MODE", 65536),
                    ("BROWSE_MEDIA", 131072),
                    ("REPEAT_SET", 262144),
                    ("GROUPING", 524288),
                ],
            )
            .register_flag_enum(
                "todo",
                "TodoListEntityFeature",
                &[
                    ("CREATE_TODO_ITEM", 1),
                    ("DELETE_TODO_ITEM", 2),
                    ("UPDATE_TODO_ITEM", 4),
                    ("MOVE_TODO_ITEM", 8),
                    ("SET_DUE_DATE_ON_ITEM", 16),
                    ("SET_DUE_DATETIME_ON_ITEM", 32),
                    ("SET_DESCRIPTION_ON_ITEM", 64),
                ],
            )
            .register_flag_enum(
                "vacuum",
                "VacuumEntityFeature",
                &[
                    ("PAUSE", 4),
                    ("STOP", 8),
                    ("RETURN_HOME", 16),
                    ("FAN_SPEED", 32),
                    ("BATTERY", 64),
                    ("SEND_COMMAND", 256),
                    ("LOCATE", 512),
                    ("CLEAN_SPOT", 1024),
                    ("MAP", 2048),
                    ("STATE", 4096),
                    ("START", 8192),
                ],
            )
            .register_flag_enum(
                "valve",
                "ValveEntityFeature",
                &[("OPEN", 1), ("CLOSE", 2), ("SET_POSITION", 4), ("STOP", 8)],
            )
            .register_flag_enum(
                "weather",
                "WeatherEntityFeature",
                &[
                    ("FORECAST_DAILY", 1),
                    ("FORECAST_HOURLY", 2),
                    ("FORECAST_TWICE_DAILY", 4),
                ],
            );

        // Modes and states
        table
            .register_str_enum(
                "alarm_control_panel",
                "AlarmControlPanelState",
                &[
                    ("DISARMED", "disarmed"),
                    ("ARMED_HOME", "armed_home"),
                    ("ARMED_AWAY", "armed_away"),
                    ("ARMED_NIGHT", "armed_night"),
                    ("ARMED_VACATION", "armed_vacation"),
                    ("ARMED_CUSTOM_BYPASS", "armed_custom_bypass"),
                    ("PENDING", "pending"),
                    ("ARMING", "arming"),
                    ("DISARMING", "disarming"),
                    ("TRIGGERED", "triggered"),
                ],
            )
            .register_str_enum(
                "alarm_control_panel",
                "CodeFormat",
                &[("NUMBER", "number"), ("TEXT", "text")],
            )
            .register_str_enum(
                "climate",
                "HVACMode",
                &[
                    ("OFF", "off"),
                    ("HEAT", "heat"),
                    ("COOL", "cool"),
                    ("HEAT_COOL", "heat_cool"),
                    ("AUTO", "auto"),
                    ("DRY", "dry"),
                    ("FAN_ONLY", "fan_only"),
                ],
            )
            .register_str_enum(
                "climate",
                "HVACAction",
                &[
                    ("OFF", "off"),
                    ("HEATING", "heating"),
                    ("COOLING", "cooling"),
                    ("DRYING", "drying"),
                    ("IDLE", "idle"),
                    ("FAN", "fan"),
                ],
            )
            .register_str_enum(
                "light",
                "ColorMode",
                &[
                    ("ONOFF", "onoff"),
                    ("BRIGHTNESS", "brightness"),
                    ("COLOR_TEMP", "color_temp"),
                    ("HS", "hs"),
                    ("XY", "xy"),
                    ("RGB", "rgb"),
                    ("RGBW", "rgbw"),
                    ("RGBWW", "rgbww"),
                    ("WHITE", "white"),
                ],
            )
            .register_str_enum(
                "media_player",
                "MediaPlayerState",
                &[
                    ("OFF", "off"),
                    ("ON", "on"),
                    ("IDLE", "idle"),
                    ("PLAYING", "playing"),
                    ("PAUSED", "paused"),
                    ("STANDBY", "standby"),
                    ("BUFFERING", "buffering"),
                ],
            )
            .register_str_enum(
                "vacuum",
                "VacuumActivity",
                &[
                    ("CLEANING", "cleaning"),
                    ("DOCKED", "docked"),
                    ("IDLE", "idle"),
                    ("PAUSED", "paused"),
                    ("RETURNING", "returning"),
                    ("ERROR", "error"),
                ],
            );

        // Units
        table
            .register_str_enum(
                "const",
                "UnitOfTemperature",
                &[("CELSIUS", "°C"), ("FAHRENHEIT", "°F")],
            )
            .register_str_enum(
                "const",
                "UnitOfEnergy",
                &[("WATT_HOUR", "Wh"), ("KILO_WATT_HOUR", "kWh")],
            )
            .register_str_enum(
                "const",
                "UnitOfPower",
                &[("WATT", "W"), ("KILO_WATT", "kW")],
            )
            .register_str_enum(
                "const",
                "UnitOfSpeed",
                &[
                    ("METERS_PER_SECOND", "m/s"),
                    ("KILOMETERS_PER_HOUR", "km/h"),
                    ("MILES_PER_HOUR", "mph"),
                ],
            );

        table
    }
}
