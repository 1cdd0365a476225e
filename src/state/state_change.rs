// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] describes one discrete thing that happened to a
//! simulator: the current position moved, the target was rewritten, or the
//! motion state flipped. A [`CharacteristicUpdate`] is the full snapshot of
//! the three characteristics pushed to the controller after every tick.
//!
//! # Examples
//!
//! ```
//! use blindsim_lib::state::{PositionSimulator, StateChange};
//! use blindsim_lib::types::{Position, PositionState};
//!
//! let mut sim = PositionSimulator::new();
//! sim.set_target_position(Position::MAX);
//!
//! let change = sim.tick().unwrap();
//! assert!(change.contains(&StateChange::current_position(Position::new(51).unwrap())));
//! assert!(change.contains(&StateChange::PositionState(PositionState::Increasing)));
//! ```

use crate::types::{Position, PositionState};

/// Represents a change in simulator state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// The current position moved.
    CurrentPosition(Position),

    /// The target position was written.
    TargetPosition(Position),

    /// The derived motion state changed.
    PositionState(PositionState),

    /// Multiple changes at once.
    ///
    /// A tick that moves the covering and also starts or ends motion
    /// produces a batch.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a current position change.
    #[must_use]
    pub fn current_position(position: Position) -> Self {
        Self::CurrentPosition(position)
    }

    /// Creates a target position change.
    #[must_use]
    pub fn target_position(position: Position) -> Self {
        Self::TargetPosition(position)
    }

    /// Creates a batch change from several changes.
    ///
    /// A single change is returned as-is rather than wrapped.
    #[must_use]
    pub fn batch(mut changes: Vec<StateChange>) -> Self {
        if changes.len() == 1 {
            return changes.remove(0);
        }
        Self::Batch(changes)
    }

    /// Returns `true` if this change equals `other` or is a batch containing it.
    #[must_use]
    pub fn contains(&self, other: &StateChange) -> bool {
        match self {
            Self::Batch(changes) => changes.iter().any(|c| c.contains(other)),
            change => change == other,
        }
    }

    /// Iterates over the leaf changes, flattening batches.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &StateChange> + '_> {
        match self {
            Self::Batch(changes) => Box::new(changes.iter().flat_map(StateChange::iter)),
            change => Box::new(std::iter::once(change)),
        }
    }
}

/// Snapshot of the three window covering characteristics.
///
/// This is what a tick pushes to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacteristicUpdate {
    /// The current position.
    pub current_position: Position,
    /// The target position.
    pub target_position: Position,
    /// The derived motion state.
    pub position_state: PositionState,
}

impl CharacteristicUpdate {
    /// Builds a snapshot, deriving the motion state from the positions.
    #[must_use]
    pub fn new(current_position: Position, target_position: Position) -> Self {
        Self {
            current_position,
            target_position,
            position_state: PositionState::between(current_position, target_position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_of_one_unwraps() {
        let change = StateChange::batch(vec![StateChange::target_position(Position::MAX)]);
        assert_eq!(change, StateChange::TargetPosition(Position::MAX));
    }

    #[test]
    fn iter_flattens_nested_batches() {
        let change = StateChange::Batch(vec![
            StateChange::current_position(Position::MIN),
            StateChange::Batch(vec![StateChange::PositionState(PositionState::Stopped)]),
        ]);
        let leaves: Vec<_> = change.iter().collect();
        assert_eq!(leaves.len(), 2);
        assert!(change.contains(&StateChange::PositionState(PositionState::Stopped)));
    }

    #[test]
    fn update_derives_state() {
        let update = CharacteristicUpdate::new(Position::HALF, Position::MIN);
        assert_eq!(update.position_state, PositionState::Decreasing);
    }

    #[test]
    fn update_serializes_camel_case() {
        let update = CharacteristicUpdate::new(Position::HALF, Position::HALF);
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentPosition": 50,
                "targetPosition": 50,
                "positionState": "STOPPED"
            })
        );
    }
}
