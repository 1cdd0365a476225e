// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motion state of a window covering.

use std::fmt;

use crate::error::ValueError;

use super::Position;

/// Direction a window covering is moving in.
///
/// The numeric codes match the bridge protocol's `PositionState`
/// characteristic.
///
/// # Examples
///
/// ```
/// use blindsim_lib::types::{Position, PositionState};
///
/// let state = PositionState::between(Position::HALF, Position::MAX);
/// assert_eq!(state, PositionState::Increasing);
/// assert_eq!(state.as_num(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    /// Closing.
    Decreasing,
    /// Opening.
    Increasing,
    /// Not moving.
    #[default]
    Stopped,
}

impl PositionState {
    /// Derives the motion state from a current and a target position.
    #[must_use]
    pub fn between(current: Position, target: Position) -> Self {
        match target.cmp(&current) {
            std::cmp::Ordering::Greater => Self::Increasing,
            std::cmp::Ordering::Less => Self::Decreasing,
            std::cmp::Ordering::Equal => Self::Stopped,
        }
    }

    /// Returns the protocol string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decreasing => "DECREASING",
            Self::Increasing => "INCREASING",
            Self::Stopped => "STOPPED",
        }
    }

    /// Returns the numeric value used on the wire.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Decreasing => 0,
            Self::Increasing => 1,
            Self::Stopped => 2,
        }
    }

    /// Returns `true` while the covering is moving.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for PositionState {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Decreasing),
            1 => Ok(Self::Increasing),
            2 => Ok(Self::Stopped),
            other => Err(ValueError::OutOfRange {
                min: 0,
                max: 2,
                actual: i64::from(other),
            }),
        }
    }
}
