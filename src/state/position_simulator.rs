// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Position simulator.

use crate::types::{Position, PositionState};

use super::{CharacteristicUpdate, StateChange};

/// In-memory model of a motorized window covering.
///
/// Holds a current and a target position. Each [`tick`](Self::tick) moves the
/// current position one unit toward the target; the motion state is derived
/// on demand from the gap between the two.
///
/// # Examples
///
/// ```
/// use blindsim_lib::state::PositionSimulator;
/// use blindsim_lib::types::{Position, PositionState};
///
/// let mut sim = PositionSimulator::new();
/// sim.set_target_position(Position::new(53).unwrap());
///
/// for _ in 0..3 {
///     sim.tick();
/// }
/// assert_eq!(sim.current_position().value(), 53);
/// assert_eq!(sim.position_state(), PositionState::Stopped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSimulator {
    current: Position,
    target: Position,
    /// Motion state as of the last tick, used to report transitions.
    reported_state: PositionState,
}

impl PositionSimulator {
    /// Creates a simulator with both positions at 50%.
    #[must_use]
    pub fn new() -> Self {
        Self::with_positions(Position::HALF, Position::HALF)
    }

    /// Creates a simulator with explicit starting positions.
    #[must_use]
    pub fn with_positions(current: Position, target: Position) -> Self {
        Self {
            current,
            target,
            reported_state: PositionState::between(current, current),
        }
    }

    /// Returns the current position.
    #[must_use]
    pub fn current_position(&self) -> Position {
        tracing::debug!(position = %self.current, "Get CurrentPosition");
        self.current
    }

    /// Returns the target position.
    #[must_use]
    pub fn target_position(&self) -> Position {
        tracing::debug!(position = %self.target, "Get TargetPosition");
        self.target
    }

    /// Returns the derived motion state.
    #[must_use]
    pub fn position_state(&self) -> PositionState {
        let state = PositionState::between(self.current, self.target);
        tracing::debug!(state = %state, "Get PositionState");
        state
    }

    /// Sets the target position.
    ///
    /// The current position is not touched; it starts moving on the next
    /// tick. A later write before that tick replaces this one.
    pub fn set_target_position(&mut self, target: Position) {
        tracing::debug!(position = %target, "Set TargetPosition");
        self.target = target;
    }

    /// Returns `true` once the current position has reached the target.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.current == self.target
    }

    /// Returns the three characteristic values as one snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CharacteristicUpdate {
        CharacteristicUpdate::new(self.current, self.target)
    }

    /// Advances the simulation by one step.
    ///
    /// Moves the current position one unit toward the target. Returns the
    /// changes that resulted, or `None` if nothing changed. A motion state
    /// change is included the first time motion starts and when it stops.
    pub fn tick(&mut self) -> Option<StateChange> {
        let mut changes = Vec::new();

        let next = self.current.step_toward(self.target);
        if next != self.current {
            if next > self.current {
                tracing::debug!(position = %next, "Blind opening");
            } else {
                tracing::debug!(position = %next, "Blind closing");
            }
            self.current = next;
            changes.push(StateChange::CurrentPosition(next));
        }

        let state = PositionState::between(self.current, self.target);
        if state != self.reported_state {
            self.reported_state = state;
            changes.push(StateChange::PositionState(state));
        }

        if changes.is_empty() {
            None
        } else {
            Some(StateChange::batch(changes))
        }
    }
}

impl Default for PositionSimulator {
    fn default() -> Self {
        Self::new()
    }
}
