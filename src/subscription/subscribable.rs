// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for accessories that push updates.

use crate::state::{CharacteristicUpdate, StateChange};
use crate::subscription::SubscriptionId;
use crate::types::{Position, PositionState};

/// Trait for types that push characteristic updates to a controller.
///
/// # Examples
///
/// ```no_run
/// use blindsim_lib::accessory::{AccessoryConfig, WindowCoveringAccessory};
/// use blindsim_lib::subscription::Subscribable;
///
/// # async fn example() -> blindsim_lib::Result<()> {
/// let blind = WindowCoveringAccessory::spawn(AccessoryConfig::new("Bedroom Blind"))?;
///
/// let sub_id = blind.on_update(|update| {
///     println!("{} -> {} ({})", update.current_position, update.target_position, update.position_state);
/// });
///
/// blind.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to the characteristic snapshot pushed after every tick.
    fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CharacteristicUpdate) + Send + Sync + 'static;

    /// Subscribes to current position changes.
    fn on_current_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static;

    /// Subscribes to accepted target position writes.
    fn on_target_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static;

    /// Subscribes to motion state changes.
    fn on_position_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PositionState) + Send + Sync + 'static;

    /// Subscribes to all state changes.
    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
