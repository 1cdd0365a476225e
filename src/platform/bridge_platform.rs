// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform hosting several simulated accessories.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use crate::accessory::{AccessoryConfig, WindowCoveringAccessory};
use crate::error::{Error, PlatformError};
use crate::event::{AccessoryEvent, AccessoryId, EventBus};
use crate::state::CharacteristicUpdate;
use crate::subscription::Subscribable;
use crate::types::CharacteristicValue;

use super::PlatformConfig;

/// Registry of window covering accessories sharing one event bus.
///
/// Every registered accessory runs its own tick task. Their per-tick updates
/// are republished as [`AccessoryEvent::Updated`] on the platform's bus, so a
/// single subscriber can follow every accessory.
///
/// # Examples
///
/// ```no_run
/// use blindsim_lib::accessory::AccessoryConfig;
/// use blindsim_lib::platform::Platform;
///
/// #[tokio::main]
/// async fn main() -> blindsim_lib::Result<()> {
///     let platform = Platform::new("Blinds");
///     let mut events = platform.subscribe();
///
///     let id = platform
///         .add_accessory(AccessoryConfig::new("Bedroom").with_unique_id("ABCD"))
///         .await?;
///     platform.set_target_position(id, 0).await?;
///
///     while let Ok(event) = events.recv().await {
///         println!("{event:?}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Platform {
    name: String,
    accessories: RwLock<HashMap<AccessoryId, Arc<WindowCoveringAccessory>>>,
    event_bus: EventBus,
}

impl Platform {
    /// Creates an empty platform.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accessories: RwLock::new(HashMap::new()),
            event_bus: EventBus::new(),
        }
    }

    /// Creates an empty platform with a custom event bus capacity.
    #[must_use]
    pub fn with_capacity(name: impl Into<String>, event_capacity: usize) -> Self {
        Self {
            name: name.into(),
            accessories: RwLock::new(HashMap::new()),
            event_bus: EventBus::with_capacity(event_capacity),
        }
    }

    /// Creates a platform and registers every configured device.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`add_accessory`](Self::add_accessory).
    /// Accessories registered before the failure are stopped.
    pub async fn from_config(config: PlatformConfig) -> Result<Self, Error> {
        let platform = Self::new(config.name);
        for device in config.devices {
            if let Err(e) = platform.add_accessory(device).await {
                platform.shutdown().await;
                return Err(e);
            }
        }
        let count = platform.accessory_count().await;
        tracing::info!(platform = %platform.name, count, "Platform finished launching");
        Ok(platform)
    }

    /// Returns the platform name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to accessory events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AccessoryEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Accessory management
    // =========================================================================

    /// Registers an accessory and starts its timer.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for an invalid configuration,
    /// `PlatformError::DuplicateAccessory` if an accessory with the same
    /// unique id is already registered, or `PlatformError::NoRuntime`
    /// outside a tokio runtime.
    pub async fn add_accessory(&self, config: AccessoryConfig) -> Result<AccessoryId, Error> {
        let accessory = WindowCoveringAccessory::spawn(config)?;
        let accessory_id = accessory.id();

        let mut accessories = self.accessories.write().await;
        if accessories.contains_key(&accessory_id) {
            accessory.stop();
            tracing::warn!(
                platform = %self.name,
                id = %accessory_id,
                "Accessory already registered"
            );
            return Err(PlatformError::DuplicateAccessory(accessory_id).into());
        }

        let bus = self.event_bus.clone();
        accessory.on_update(move |update| {
            bus.publish(AccessoryEvent::updated(accessory_id, *update));
        });

        tracing::info!(
            platform = %self.name,
            accessory = %accessory.info().name,
            id = %accessory_id,
            "Adding new accessory"
        );
        accessories.insert(accessory_id, accessory);
        drop(accessories);

        self.event_bus.publish(AccessoryEvent::added(accessory_id));
        Ok(accessory_id)
    }

    /// Removes an accessory and stops its timer.
    ///
    /// Returns `true` if the accessory was found and removed.
    pub async fn remove_accessory(&self, accessory_id: AccessoryId) -> bool {
        let removed = self.accessories.write().await.remove(&accessory_id);

        match removed {
            Some(accessory) => {
                accessory.stop();
                tracing::info!(platform = %self.name, id = %accessory_id, "Removed accessory");
                self.event_bus.publish(AccessoryEvent::removed(accessory_id));
                true
            }
            None => false,
        }
    }

    /// Returns a registered accessory.
    pub async fn accessory(
        &self,
        accessory_id: AccessoryId,
    ) -> Option<Arc<WindowCoveringAccessory>> {
        self.accessories.read().await.get(&accessory_id).cloned()
    }

    /// Returns the IDs of all registered accessories.
    pub async fn accessory_ids(&self) -> Vec<AccessoryId> {
        self.accessories.read().await.keys().copied().collect()
    }

    /// Returns the number of registered accessories.
    pub async fn accessory_count(&self) -> usize {
        self.accessories.read().await.len()
    }

    /// Forwards a target position write to an accessory.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessoryNotFound` for an unknown ID, or the
    /// accessory's validation error.
    pub async fn set_target_position(
        &self,
        accessory_id: AccessoryId,
        value: impl Into<CharacteristicValue>,
    ) -> Result<(), Error> {
        let accessory = self
            .accessory(accessory_id)
            .await
            .ok_or(Error::AccessoryNotFound)?;
        accessory.set_target_position(value)
    }

    /// Returns an accessory's characteristic snapshot.
    pub async fn snapshot(&self, accessory_id: AccessoryId) -> Option<CharacteristicUpdate> {
        self.accessory(accessory_id)
            .await
            .map(|accessory| accessory.snapshot())
    }

    /// Stops and removes every accessory.
    pub async fn shutdown(&self) {
        let drained: Vec<_> = self.accessories.write().await.drain().collect();

        for (accessory_id, accessory) in drained {
            accessory.stop();
            self.event_bus.publish(AccessoryEvent::removed(accessory_id));
        }
        tracing::info!(platform = %self.name, "Platform shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[tokio::test(start_paused = true)]
    async fn add_and_remove_accessory() {
        let platform = Platform::new("Test");
        let mut events = platform.subscribe();

        let id = platform
            .add_accessory(AccessoryConfig::new("Blind"))
            .await
            .unwrap();
        assert_eq!(platform.accessory_count().await, 1);
        assert_eq!(platform.accessory_ids().await, vec![id]);
        assert_eq!(events.recv().await.unwrap(), AccessoryEvent::added(id));

        let accessory = platform.accessory(id).await.unwrap();
        assert!(accessory.is_running());

        assert!(platform.remove_accessory(id).await);
        assert!(!accessory.is_running());
        assert!(!platform.remove_accessory(id).await);
        assert_eq!(events.recv().await.unwrap(), AccessoryEvent::removed(id));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_unique_id_is_rejected() {
        let platform = Platform::new("Test");
        let config = AccessoryConfig::new("Blind").with_unique_id("same");

        platform.add_accessory(config.clone()).await.unwrap();
        let err = platform.add_accessory(config).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::DuplicateAccessory(_))
        ));
        assert_eq!(platform.accessory_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn set_target_on_unknown_accessory() {
        let platform = Platform::new("Test");
        let err = platform
            .set_target_position(AccessoryId::new(), 10)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AccessoryNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn set_target_is_forwarded() {
        let platform = Platform::new("Test");
        let id = platform
            .add_accessory(AccessoryConfig::new("Blind"))
            .await
            .unwrap();

        platform.set_target_position(id, 20).await.unwrap();
        let snapshot = platform.snapshot(id).await.unwrap();
        assert_eq!(snapshot.target_position, Position::new(20).unwrap());
        assert_eq!(snapshot.current_position, Position::HALF);
    }

    #[tokio::test(start_paused = true)]
    async fn from_config_rolls_back_on_error() {
        let config = PlatformConfig::new("Test")
            .with_device(AccessoryConfig::new("A").with_unique_id("a"))
            .with_device(AccessoryConfig::new("A again").with_unique_id("a"));

        let err = Platform::from_config(config).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::DuplicateAccessory(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_everything() {
        let config = PlatformConfig::new("Test")
            .with_device(AccessoryConfig::new("A"))
            .with_device(AccessoryConfig::new("B"));
        let platform = Platform::from_config(config).await.unwrap();
        assert_eq!(platform.accessory_count().await, 2);

        let accessories: Vec<_> = {
            let mut v = Vec::new();
            for id in platform.accessory_ids().await {
                v.push(platform.accessory(id).await.unwrap());
            }
            v
        };

        platform.shutdown().await;
        assert_eq!(platform.accessory_count().await, 0);
        assert!(accessories.iter().all(|a| !a.is_running()));
    }
}
