// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window covering state.
//!
//! - [`PositionSimulator`] - Current/target positions and the tick step
//! - [`StateChange`] - Discrete changes produced by ticks and writes
//! - [`CharacteristicUpdate`] - Snapshot pushed to the controller

mod position_simulator;
mod state_change;

pub use position_simulator::PositionSimulator;
pub use state_change::{CharacteristicUpdate, StateChange};
