// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration.

use crate::accessory::AccessoryConfig;
use crate::error::ConfigError;

/// Configuration for a [`Platform`](super::Platform).
///
/// Mirrors the platform block of a bridge config file: a name plus one
/// entry per simulated device.
///
/// # Examples
///
/// ```
/// use blindsim_lib::platform::PlatformConfig;
///
/// let config = PlatformConfig::from_json(r#"{
///     "name": "Blinds",
///     "devices": [
///         { "exampleDisplayName": "Bedroom", "exampleUniqueId": "ABCD" },
///         { "exampleDisplayName": "Kitchen", "exampleUniqueId": "EFGH" }
///     ]
/// }"#).unwrap();
/// assert_eq!(config.devices.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Platform name, used in logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// One entry per accessory.
    #[serde(default)]
    pub devices: Vec<AccessoryConfig>,
}

fn default_name() -> String {
    "BlindSim".to_string()
}

impl PlatformConfig {
    /// Creates an empty platform configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            devices: Vec::new(),
        }
    }

    /// Adds a device entry.
    #[must_use]
    pub fn with_device(mut self, device: AccessoryConfig) -> Self {
        self.devices.push(device);
        self
    }

    /// Parses and validates a platform block.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input, or the first device
    /// validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        for device in &config.devices {
            device.validate()?;
        }
        Ok(config)
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::new(default_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = PlatformConfig::from_json("{}").unwrap();
        assert_eq!(config, PlatformConfig::default());
    }

    #[test]
    fn invalid_device_is_rejected() {
        let err = PlatformConfig::from_json(r#"{ "devices": [ { "tickIntervalMs": 0 } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickInterval));
    }

    #[test]
    fn builder_adds_devices() {
        let config = PlatformConfig::new("Test")
            .with_device(AccessoryConfig::new("A"))
            .with_device(AccessoryConfig::new("B"));
        assert_eq!(config.name, "Test");
        assert_eq!(config.devices.len(), 2);
    }
}
