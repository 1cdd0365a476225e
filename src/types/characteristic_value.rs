// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loosely-typed values written by a bridge controller.

use std::fmt;

/// A value handed to a characteristic set handler.
///
/// Bridge controllers are not strongly typed: a position write may arrive as
/// an integer, a float, a string or even a boolean. Conversion into a
/// [`Position`](super::Position) is where validation happens.
///
/// # Examples
///
/// ```
/// use blindsim_lib::types::CharacteristicValue;
///
/// let v: CharacteristicValue = 80.into();
/// assert_eq!(v, CharacteristicValue::Int(80));
///
/// let v: CharacteristicValue = serde_json::from_str("12.5").unwrap();
/// assert_eq!(v, CharacteristicValue::Float(12.5));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CharacteristicValue {
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A string value.
    String(String),
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for CharacteristicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for CharacteristicValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i32> for CharacteristicValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for CharacteristicValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CharacteristicValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CharacteristicValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CharacteristicValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<super::Position> for CharacteristicValue {
    fn from(value: super::Position) -> Self {
        Self::Int(i64::from(value.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_untagged() {
        let parse = |s: &str| serde_json::from_str::<CharacteristicValue>(s).unwrap();
        assert_eq!(parse("true"), CharacteristicValue::Bool(true));
        assert_eq!(parse("42"), CharacteristicValue::Int(42));
        assert_eq!(parse("4.5"), CharacteristicValue::Float(4.5));
        assert_eq!(parse("\"50\""), CharacteristicValue::String("50".into()));
    }

    #[test]
    fn display() {
        assert_eq!(CharacteristicValue::Int(7).to_string(), "7");
        assert_eq!(CharacteristicValue::from("x").to_string(), "\"x\"");
    }
}
