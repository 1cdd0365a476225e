// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Position type for window coverings.
//!
//! This module provides a type-safe representation of a covering position,
//! ensuring values are always within the valid range of 0-100%.

use std::fmt;

use crate::error::ValueError;

use super::CharacteristicValue;

/// How far a window covering is open, as a percentage (0-100).
///
/// 0 is fully closed and 100 is fully open.
///
/// # Examples
///
/// ```
/// use blindsim_lib::types::Position;
///
/// let pos = Position::new(75).unwrap();
/// assert_eq!(pos.value(), 75);
///
/// assert_eq!(Position::MIN.value(), 0);
/// assert_eq!(Position::MAX.value(), 100);
/// assert_eq!(Position::default().value(), 50);
///
/// // Invalid values return error
/// assert!(Position::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// Fully closed (0%).
    pub const MIN: Self = Self(0);

    /// Fully open (100%).
    pub const MAX: Self = Self(100);

    /// Halfway (50%), the position a freshly created accessory starts at.
    pub const HALF: Self = Self(50);

    /// Creates a new position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: i64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a position, clamping to the valid range.
    ///
    /// # Examples
    ///
    /// ```
    /// use blindsim_lib::types::Position;
    ///
    /// assert_eq!(Position::clamped(150).value(), 100);
    /// ```
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the number of one-unit steps between two positions.
    #[must_use]
    pub const fn distance(&self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// Returns the position one unit closer to `target`, or `self` if
    /// already there.
    #[must_use]
    pub(crate) const fn step_toward(self, target: Self) -> Self {
        if target.0 > self.0 {
            Self(self.0 + 1)
        } else if target.0 < self.0 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::HALF
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl TryFrom<u8> for Position {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Position {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: value,
            }),
        }
    }
}

impl TryFrom<&CharacteristicValue> for Position {
    type Error = ValueError;

    /// Coerces a loosely-typed characteristic value.
    ///
    /// Integers must be in range, floats must be integral, strings must
    /// parse as an integer. Booleans are never a position.
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn try_from(value: &CharacteristicValue) -> Result<Self, Self::Error> {
        match value {
            CharacteristicValue::Int(v) => Self::try_from(*v),
            CharacteristicValue::Float(v) => {
                if !v.is_finite() || v.trunc() != *v {
                    return Err(ValueError::NotAnInteger(v.to_string()));
                }
                // `as` saturates, so huge values still report as out of range
                Self::try_from(*v as i64)
            }
            CharacteristicValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ValueError::NotAnInteger(format!("{s:?}")))
                .and_then(<Self as TryFrom<i64>>::try_from),
            CharacteristicValue::Bool(b) => Err(ValueError::NotAnInteger(b.to_string())),
        }
    }
}

impl TryFrom<CharacteristicValue> for Position {
    type Error = ValueError;

    fn try_from(value: CharacteristicValue) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_valid_values() {
        for v in 0..=100 {
            assert_eq!(Position::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn position_invalid_value() {
        assert_eq!(
            Position::new(101),
            Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn position_clamped() {
        assert_eq!(Position::clamped(50).value(), 50);
        assert_eq!(Position::clamped(255).value(), 100);
    }

    #[test]
    fn position_default_is_half() {
        assert_eq!(Position::default(), Position::HALF);
    }

    #[test]
    fn position_distance_is_symmetric() {
        let a = Position::new(20).unwrap();
        let b = Position::new(80).unwrap();
        assert_eq!(a.distance(b), 60);
        assert_eq!(b.distance(a), 60);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn step_toward_moves_one_unit() {
        let p = Position::HALF;
        assert_eq!(p.step_toward(Position::MAX).value(), 51);
        assert_eq!(p.step_toward(Position::MIN).value(), 49);
        assert_eq!(p.step_toward(p), p);
        assert_eq!(Position::MAX.step_toward(Position::MAX), Position::MAX);
    }

    #[test]
    fn position_from_i64() {
        assert_eq!(Position::try_from(0_i64).unwrap(), Position::MIN);
        assert!(Position::try_from(-1_i64).is_err());
        assert!(Position::try_from(256_i64).is_err());
    }

    #[test]
    fn coerce_characteristic_values() {
        assert_eq!(
            Position::try_from(CharacteristicValue::Int(80)).unwrap().value(),
            80
        );
        assert_eq!(
            Position::try_from(CharacteristicValue::Float(30.0))
                .unwrap()
                .value(),
            30
        );
        assert_eq!(
            Position::try_from(CharacteristicValue::String(" 42 ".into()))
                .unwrap()
                .value(),
            42
        );
    }

    #[test]
    fn coerce_rejects_non_integers() {
        assert!(matches!(
            Position::try_from(CharacteristicValue::Float(12.5)),
            Err(ValueError::NotAnInteger(_))
        ));
        assert!(matches!(
            Position::try_from(CharacteristicValue::Float(f64::NAN)),
            Err(ValueError::NotAnInteger(_))
        ));
        assert!(matches!(
            Position::try_from(CharacteristicValue::String("open".into())),
            Err(ValueError::NotAnInteger(_))
        ));
        assert!(matches!(
            Position::try_from(CharacteristicValue::Bool(true)),
            Err(ValueError::NotAnInteger(_))
        ));
    }

    #[test]
    fn coerce_rejects_out_of_range() {
        assert!(matches!(
            Position::try_from(CharacteristicValue::Int(-5)),
            Err(ValueError::OutOfRange { actual: -5, .. })
        ));
        assert!(matches!(
            Position::try_from(CharacteristicValue::Float(150.0)),
            Err(ValueError::OutOfRange { actual: 150, .. })
        ));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(75).unwrap().to_string(), "75%");
    }

    #[test]
    fn position_serde_validates() {
        let pos: Position = serde_json::from_str("30").unwrap();
        assert_eq!(pos.value(), 30);
        assert!(serde_json::from_str::<Position>("130").is_err());
    }
}
