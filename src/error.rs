// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `BlindSim` library.
//!
//! The hierarchy mirrors the places where things can actually go wrong:
//! value coercion of incoming characteristic writes, accessory
//! configuration, and platform bookkeeping. Everything else in the
//! simulator is a total function.

use thiserror::Error;

use crate::event::AccessoryId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A position value could not be coerced into the valid range.
    #[error("invalid position value: {0}")]
    InvalidPositionValue(#[from] ValueError),

    /// Accessory configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Platform bookkeeping failed.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Accessory was not found on the platform.
    #[error("accessory not found")]
    AccessoryNotFound,
}

/// Errors raised while coercing a value into a [`Position`](crate::types::Position).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
        /// The actual value that was provided.
        actual: i64,
    },

    /// The value is not representable as an integer.
    #[error("value {0} is not an integer")]
    NotAnInteger(String),
}

/// Errors related to accessory configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The tick interval must be non-zero.
    #[error("tick interval must be greater than zero")]
    InvalidTickInterval,

    /// An initial position is outside [0, 100].
    #[error("initial {field} position {value} is out of range [0, 100]")]
    InvalidInitialPosition {
        /// Which position was invalid (`current` or `target`).
        field: &'static str,
        /// The configured value.
        value: u8,
    },
}

/// Errors related to platform operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// An accessory with the same identifier is already registered.
    #[error("accessory {0} is already registered")]
    DuplicateAccessory(AccessoryId),

    /// Accessories can only be spawned from inside a tokio runtime.
    #[error("no tokio runtime available to drive the accessory timer")]
    NoRuntime,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::NotAnInteger("80.5".to_string());
        let err: Error = value_err.into();
        assert!(matches!(
            err,
            Error::InvalidPositionValue(ValueError::NotAnInteger(_))
        ));
        assert_eq!(
            err.to_string(),
            "invalid position value: value 80.5 is not an integer"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidInitialPosition {
            field: "target",
            value: 120,
        };
        assert_eq!(
            err.to_string(),
            "initial target position 120 is out of range [0, 100]"
        );
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::NoRuntime;
        assert_eq!(
            err.to_string(),
            "no tokio runtime available to drive the accessory timer"
        );
    }
}
