// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::types::Position;

/// Default period between simulation ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Configuration for a window covering accessory.
///
/// Deserializes from the camelCase device entries a bridge keeps in its
/// config file. The `exampleDisplayName`/`exampleUniqueId` keys used by the
/// stock plugin template are accepted as aliases.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use blindsim_lib::accessory::AccessoryConfig;
///
/// let config = AccessoryConfig::new("Living Room Blind")
///     .with_unique_id("ABCD")
///     .with_tick_interval(Duration::from_millis(50));
/// assert_eq!(config.tick_interval(), Duration::from_millis(50));
///
/// let config = AccessoryConfig::from_json(
///     r#"{ "exampleDisplayName": "Kitchen Blind", "exampleUniqueId": "EFGH" }"#,
/// ).unwrap();
/// assert_eq!(config.display_name, "Kitchen Blind");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessoryConfig {
    /// Name shown in the controller's UI.
    #[serde(alias = "exampleDisplayName")]
    pub display_name: String,
    /// Stable identifier used to derive the accessory ID.
    #[serde(alias = "exampleUniqueId")]
    pub unique_id: Option<String>,
    /// Manufacturer reported in the accessory information.
    pub manufacturer: String,
    /// Model reported in the accessory information.
    pub model: String,
    /// Serial number reported in the accessory information.
    pub serial_number: String,
    /// Period between ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Current position at startup.
    pub initial_current_position: u8,
    /// Target position at startup.
    pub initial_target_position: u8,
}

impl AccessoryConfig {
    /// Creates a configuration with default settings and the given name.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a single device entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input, or the validation
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the stable unique id.
    #[must_use]
    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    /// Sets the manufacturer, model and serial number.
    #[must_use]
    pub fn with_information(
        mut self,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        serial_number: impl Into<String>,
    ) -> Self {
        self.manufacturer = manufacturer.into();
        self.model = model.into();
        self.serial_number = serial_number.into();
        self
    }

    /// Sets the tick period.
    ///
    /// Sub-millisecond precision is discarded.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the starting positions.
    #[must_use]
    pub fn with_initial_positions(mut self, current: Position, target: Position) -> Self {
        self.initial_current_position = current.value();
        self.initial_target_position = target.value();
        self
    }

    /// Returns the tick period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Returns the validated starting positions as `(current, target)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidInitialPosition` if either is above 100.
    pub fn initial_positions(&self) -> Result<(Position, Position), ConfigError> {
        let current = Position::new(self.initial_current_position).map_err(|_| {
            ConfigError::InvalidInitialPosition {
                field: "current",
                value: self.initial_current_position,
            }
        })?;
        let target = Position::new(self.initial_target_position).map_err(|_| {
            ConfigError::InvalidInitialPosition {
                field: "target",
                value: self.initial_target_position,
            }
        })?;
        Ok((current, target))
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTickInterval` for a zero interval and
    /// `ConfigError::InvalidInitialPosition` for a position above 100.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        self.initial_positions()?;
        Ok(())
    }

    /// Returns the accessory information derived from this configuration.
    #[must_use]
    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation {
            name: self.display_name.clone(),
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            serial_number: self.serial_number.clone(),
        }
    }
}

impl Default for AccessoryConfig {
    fn default() -> Self {
        Self {
            display_name: "Window Covering".to_string(),
            unique_id: None,
            manufacturer: "Default-Manufacturer".to_string(),
            model: "Default-Model".to_string(),
            serial_number: "Default-Serial".to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_current_position: Position::HALF.value(),
            initial_target_position: Position::HALF.value(),
        }
    }
}

/// Static accessory metadata shown by the controller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInformation {
    /// Display name.
    pub name: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Model.
    pub model: String,
    /// Serial number.
    pub serial_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AccessoryConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(
            config.initial_positions().unwrap(),
            (Position::HALF, Position::HALF)
        );
        assert_eq!(config.information().manufacturer, "Default-Manufacturer");
        assert_eq!(config.information().model, "Default-Model");
        assert_eq!(config.information().serial_number, "Default-Serial");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_json_camel_case() {
        let config = AccessoryConfig::from_json(
            r#"{
                "displayName": "Office Blind",
                "uniqueId": "office-1",
                "tickIntervalMs": 250,
                "initialCurrentPosition": 0,
                "initialTargetPosition": 100
            }"#,
        )
        .unwrap();
        assert_eq!(config.display_name, "Office Blind");
        assert_eq!(config.unique_id.as_deref(), Some("office-1"));
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(
            config.initial_positions().unwrap(),
            (Position::MIN, Position::MAX)
        );
        assert_eq!(config.model, "Default-Model");
    }

    #[test]
    fn from_json_template_aliases() {
        let config = AccessoryConfig::from_json(
            r#"{ "exampleDisplayName": "Bedroom", "exampleUniqueId": "ABCD" }"#,
        )
        .unwrap();
        assert_eq!(config.display_name, "Bedroom");
        assert_eq!(config.unique_id.as_deref(), Some("ABCD"));
    }

    #[test]
    fn from_json_rejects_zero_interval() {
        let err = AccessoryConfig::from_json(r#"{ "tickIntervalMs": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickInterval));
    }

    #[test]
    fn from_json_rejects_bad_position() {
        let err =
            AccessoryConfig::from_json(r#"{ "initialTargetPosition": 101 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidInitialPosition {
                field: "target",
                value: 101
            }
        ));
    }

    #[test]
    fn from_json_rejects_malformed() {
        let err = AccessoryConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn builder_methods() {
        let config = AccessoryConfig::new("Blind")
            .with_unique_id("id-1")
            .with_information("Acme", "Shade 3000", "SN-42")
            .with_tick_interval(Duration::from_millis(20))
            .with_initial_positions(Position::MIN, Position::MAX);

        let info = config.information();
        assert_eq!(info.name, "Blind");
        assert_eq!(info.manufacturer, "Acme");
        assert_eq!(info.model, "Shade 3000");
        assert_eq!(info.serial_number, "SN-42");
        assert_eq!(config.tick_interval_ms, 20);
        assert_eq!(config.initial_current_position, 0);
        assert_eq!(config.initial_target_position, 100);
    }
}
