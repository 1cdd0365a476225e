// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated window covering accessory.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{Error, PlatformError};
use crate::event::AccessoryId;
use crate::state::{CharacteristicUpdate, PositionSimulator, StateChange};
use crate::subscription::{CallbackRegistry, Subscribable, SubscriptionId};
use crate::types::{CharacteristicValue, Position, PositionState};

use super::{AccessoryConfig, AccessoryInformation};

/// A simulated motorized window covering.
///
/// The accessory owns a [`PositionSimulator`] and, once spawned, a recurring
/// tokio task that ticks it. After every tick the three characteristic
/// values are pushed to subscribers registered through [`Subscribable`].
///
/// The timer is released by [`stop`](Self::stop) or when the accessory is
/// dropped, whichever comes first.
///
/// # Examples
///
/// ```no_run
/// use blindsim_lib::accessory::{AccessoryConfig, WindowCoveringAccessory};
/// use blindsim_lib::types::PositionState;
///
/// #[tokio::main]
/// async fn main() -> blindsim_lib::Result<()> {
///     let blind = WindowCoveringAccessory::spawn(AccessoryConfig::new("Bedroom Blind"))?;
///
///     blind.set_target_position(80)?;
///     tokio::time::sleep(std::time::Duration::from_secs(4)).await;
///
///     assert_eq!(blind.get_current_position().value(), 80);
///     assert_eq!(blind.get_position_state(), PositionState::Stopped);
///
///     blind.stop();
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct WindowCoveringAccessory {
    id: AccessoryId,
    info: AccessoryInformation,
    tick_interval: Duration,
    simulator: Mutex<PositionSimulator>,
    callbacks: CallbackRegistry,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl WindowCoveringAccessory {
    /// Creates an accessory without starting its timer.
    ///
    /// The host drives the simulation by calling [`tick_now`](Self::tick_now).
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn new(config: &AccessoryConfig) -> Result<Self, Error> {
        config.validate()?;
        let (current, target) = config.initial_positions()?;

        let id = config
            .unique_id
            .as_deref()
            .map_or_else(AccessoryId::new, AccessoryId::from_unique_id);

        Ok(Self {
            id,
            info: config.information(),
            tick_interval: config.tick_interval(),
            simulator: Mutex::new(PositionSimulator::with_positions(current, target)),
            callbacks: CallbackRegistry::new(),
            task: Mutex::new(None),
        })
    }

    /// Creates an accessory and starts its recurring tick task.
    ///
    /// The first tick happens one interval after this call.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid, or
    /// `PlatformError::NoRuntime` when called outside a tokio runtime.
    pub fn spawn(config: AccessoryConfig) -> Result<Arc<Self>, Error> {
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| PlatformError::NoRuntime)?;

        let accessory = Arc::new(Self::new(&config)?);
        let task = handle.spawn(run_ticker(
            Arc::downgrade(&accessory),
            accessory.tick_interval,
        ));
        *accessory.task.lock() = Some(task);

        tracing::info!(
            accessory = %accessory.info.name,
            id = %accessory.id,
            interval = ?accessory.tick_interval,
            "Window covering started"
        );

        Ok(accessory)
    }

    /// Returns the accessory ID.
    #[must_use]
    pub fn id(&self) -> AccessoryId {
        self.id
    }

    /// Returns the accessory information.
    #[must_use]
    pub fn info(&self) -> &AccessoryInformation {
        &self.info
    }

    /// Returns the tick period.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    // =========================================================================
    // Characteristic handlers
    // =========================================================================

    /// Returns the current position.
    #[must_use]
    pub fn get_current_position(&self) -> Position {
        self.simulator.lock().current_position()
    }

    /// Returns the target position.
    #[must_use]
    pub fn get_target_position(&self) -> Position {
        self.simulator.lock().target_position()
    }

    /// Returns the motion state derived from current and target.
    #[must_use]
    pub fn get_position_state(&self) -> PositionState {
        self.simulator.lock().position_state()
    }

    /// Returns all three characteristic values at once.
    #[must_use]
    pub fn snapshot(&self) -> CharacteristicUpdate {
        self.simulator.lock().snapshot()
    }

    /// Handles a target position write from the controller.
    ///
    /// The value is coerced into a [`Position`]; the current position is not
    /// touched until the next tick.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPositionValue` if the value is not an integer
    /// in [0, 100]. The stored target is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use blindsim_lib::accessory::{AccessoryConfig, WindowCoveringAccessory};
    ///
    /// let blind = WindowCoveringAccessory::new(&AccessoryConfig::default()).unwrap();
    /// blind.set_target_position(30).unwrap();
    /// blind.set_target_position("75").unwrap();
    /// assert!(blind.set_target_position(150).is_err());
    /// assert!(blind.set_target_position(12.5).is_err());
    /// assert_eq!(blind.get_target_position().value(), 75);
    /// ```
    pub fn set_target_position(
        &self,
        value: impl Into<CharacteristicValue>,
    ) -> Result<(), Error> {
        let value = value.into();
        let target = Position::try_from(&value).inspect_err(|e| {
            tracing::warn!(
                accessory = %self.info.name,
                value = %value,
                error = %e,
                "Rejected TargetPosition write"
            );
        })?;

        self.simulator.lock().set_target_position(target);
        self.callbacks.dispatch(&StateChange::TargetPosition(target));
        Ok(())
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Runs one simulation step and pushes the result to subscribers.
    ///
    /// This is what the recurring task calls every interval. Subscribers to
    /// [`on_update`](Subscribable::on_update) are called even when nothing
    /// moved.
    pub fn tick_now(&self) -> CharacteristicUpdate {
        let (change, update) = {
            let mut simulator = self.simulator.lock();
            let change = simulator.tick();
            (change, simulator.snapshot())
        };

        if let Some(change) = &change {
            tracing::trace!(accessory = %self.info.name, ?change, "Tick changed state");
            self.callbacks.dispatch(change);
        }
        self.callbacks.dispatch_update(&update);
        update
    }

    /// Stops the recurring tick task.
    ///
    /// Getters and setters keep working; the covering simply stops moving.
    /// Calling this more than once is harmless.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            tracing::info!(accessory = %self.info.name, id = %self.id, "Window covering stopped");
        }
    }

    /// Returns `true` while the recurring tick task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for WindowCoveringAccessory {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

impl Subscribable for WindowCoveringAccessory {
    fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CharacteristicUpdate) + Send + Sync + 'static,
    {
        self.callbacks.on_update(callback)
    }

    fn on_current_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.callbacks.on_current_position_changed(callback)
    }

    fn on_target_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        self.callbacks.on_target_position_changed(callback)
    }

    fn on_position_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PositionState) + Send + Sync + 'static,
    {
        self.callbacks.on_position_state_changed(callback)
    }

    fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        self.callbacks.on_state_changed(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}

/// Ticks the accessory every `period` until it is dropped.
async fn run_ticker(accessory: Weak<WindowCoveringAccessory>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let Some(strong) = accessory.upgrade() else {
            tracing::debug!("Accessory dropped, ending tick task");
            break;
        };
        strong.tick_now();
    }
}
