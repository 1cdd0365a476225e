// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for accessory subscriptions.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::state::{CharacteristicUpdate, StateChange};
use crate::types::{Position, PositionState};

/// Unique identifier for a subscription.
///
/// IDs are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type UpdateCallback = Arc<dyn Fn(&CharacteristicUpdate) + Send + Sync>;
type PositionCallback = Arc<dyn Fn(Position) + Send + Sync>;
type PositionStateCallback = Arc<dyn Fn(PositionState) + Send + Sync>;
type StateChangedCallback = Arc<dyn Fn(&StateChange) + Send + Sync>;

/// Registry for managing accessory callbacks.
///
/// Uses `parking_lot::RwLock` for interior mutability, so it can be shared
/// between the tick task and the controller. Callbacks are cloned out of the
/// maps before being called, so a callback may subscribe or unsubscribe
/// without deadlocking.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    /// Characteristic snapshot callbacks, called on every tick.
    update_callbacks: RwLock<HashMap<SubscriptionId, UpdateCallback>>,
    current_position_callbacks: RwLock<HashMap<SubscriptionId, PositionCallback>>,
    target_position_callbacks: RwLock<HashMap<SubscriptionId, PositionCallback>>,
    position_state_callbacks: RwLock<HashMap<SubscriptionId, PositionStateCallback>>,
    /// Generic callbacks receiving every change.
    state_changed_callbacks: RwLock<HashMap<SubscriptionId, StateChangedCallback>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            update_callbacks: RwLock::new(HashMap::new()),
            current_position_callbacks: RwLock::new(HashMap::new()),
            target_position_callbacks: RwLock::new(HashMap::new()),
            position_state_callbacks: RwLock::new(HashMap::new()),
            state_changed_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for the per-tick characteristic snapshot.
    pub fn on_update<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CharacteristicUpdate) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.update_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for current position changes.
    pub fn on_current_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.current_position_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for target position writes.
    pub fn on_target_position_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Position) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.target_position_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for motion state changes.
    pub fn on_position_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(PositionState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.position_state_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for all state changes.
    pub fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StateChange) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_changed_callbacks
            .write()
            .insert(id, Arc::new(callback));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.update_callbacks.write().remove(&id).is_some()
            || self.current_position_callbacks.write().remove(&id).is_some()
            || self.target_position_callbacks.write().remove(&id).is_some()
            || self.position_state_callbacks.write().remove(&id).is_some()
            || self.state_changed_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.update_callbacks.write().clear();
        self.current_position_callbacks.write().clear();
        self.target_position_callbacks.write().clear();
        self.position_state_callbacks.write().clear();
        self.state_changed_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Dispatches a state change to relevant callbacks.
    ///
    /// Generic callbacks receive the change as given (a batch stays a batch);
    /// specific callbacks receive each leaf change.
    pub fn dispatch(&self, change: &StateChange) {
        let generic: Vec<_> = self.state_changed_callbacks.read().values().cloned().collect();
        for callback in generic {
            callback(change);
        }

        for leaf in change.iter() {
            match leaf {
                StateChange::CurrentPosition(position) => {
                    let callbacks: Vec<_> = self
                        .current_position_callbacks
                        .read()
                        .values()
                        .cloned()
                        .collect();
                    for callback in callbacks {
                        callback(*position);
                    }
                }
                StateChange::TargetPosition(position) => {
                    let callbacks: Vec<_> = self
                        .target_position_callbacks
                        .read()
                        .values()
                        .cloned()
                        .collect();
                    for callback in callbacks {
                        callback(*position);
                    }
                }
                StateChange::PositionState(state) => {
                    let callbacks: Vec<_> = self
                        .position_state_callbacks
                        .read()
                        .values()
                        .cloned()
                        .collect();
                    for callback in callbacks {
                        callback(*state);
                    }
                }
                // `iter` never yields a batch
                StateChange::Batch(_) => {}
            }
        }
    }

    /// Pushes a characteristic snapshot to update callbacks.
    pub fn dispatch_update(&self, update: &CharacteristicUpdate) {
        let callbacks: Vec<_> = self.update_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(update);
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.update_callbacks.read().len()
            + self.current_position_callbacks.read().len()
            + self.target_position_callbacks.read().len()
            + self.position_state_callbacks.read().len()
            + self.state_changed_callbacks.read().len()
    }

    /// Returns `true` if there are no registered callbacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId::new(42).to_string(), "Sub(42)");
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let registry = CallbackRegistry::new();
        let a = registry.on_update(|_| {});
        let b = registry.on_update(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn current_position_callback_and_unsubscribe() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_current_position_changed(move |_pos| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.callback_count(), 1);

        registry.dispatch(&StateChange::current_position(Position::MAX));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        assert!(registry.is_empty());

        registry.dispatch(&StateChange::current_position(Position::MIN));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn batch_dispatches_each_leaf() {
        let registry = CallbackRegistry::new();
        let positions = Arc::new(Mutex::new(Vec::new()));
        let states = Arc::new(Mutex::new(Vec::new()));
        let generic = Arc::new(AtomicU32::new(0));

        let p = positions.clone();
        registry.on_current_position_changed(move |pos| p.lock().push(pos));
        let s = states.clone();
        registry.on_position_state_changed(move |state| s.lock().push(state));
        let g = generic.clone();
        registry.on_state_changed(move |_| {
            g.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&StateChange::Batch(vec![
            StateChange::current_position(Position::MAX),
            StateChange::PositionState(PositionState::Stopped),
        ]));

        assert_eq!(*positions.lock(), vec![Position::MAX]);
        assert_eq!(*states.lock(), vec![PositionState::Stopped]);
        assert_eq!(generic.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn target_callbacks_ignore_current_changes() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        registry.on_target_position_changed(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(&StateChange::current_position(Position::MAX));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        registry.dispatch(&StateChange::target_position(Position::MAX));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn update_callback_receives_snapshot() {
        let registry = CallbackRegistry::new();
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        registry.on_update(move |update| *seen_clone.lock() = Some(*update));

        let update = CharacteristicUpdate::new(Position::HALF, Position::MAX);
        registry.dispatch_update(&update);
        assert_eq!(*seen.lock(), Some(update));
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::new());
        let slot = Arc::new(Mutex::new(None::<SubscriptionId>));

        let reg = registry.clone();
        let slot_clone = slot.clone();
        let id = registry.on_update(move |_| {
            if let Some(id) = *slot_clone.lock() {
                reg.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        registry.dispatch_update(&CharacteristicUpdate::new(Position::MIN, Position::MIN));
        assert!(registry.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let registry = CallbackRegistry::new();
        registry.on_update(|_| {});
        registry.on_state_changed(|_| {});
        registry.on_position_state_changed(|_| {});
        assert_eq!(registry.callback_count(), 3);

        registry.clear();
        assert!(registry.is_empty());
    }
}
