// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory event types.

use crate::state::CharacteristicUpdate;

use super::AccessoryId;

/// Events emitted by a [`Platform`](crate::platform::Platform).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AccessoryEvent {
    /// An accessory was registered and its timer started.
    AccessoryAdded {
        /// The ID of the added accessory.
        accessory_id: AccessoryId,
    },

    /// An accessory was removed and its timer stopped.
    AccessoryRemoved {
        /// The ID of the removed accessory.
        accessory_id: AccessoryId,
    },

    /// An accessory pushed its characteristics after a tick.
    Updated {
        /// The ID of the accessory.
        accessory_id: AccessoryId,
        /// The pushed values.
        update: CharacteristicUpdate,
    },
}

impl AccessoryEvent {
    /// Returns the accessory ID associated with this event.
    #[must_use]
    pub fn accessory_id(&self) -> AccessoryId {
        match self {
            Self::AccessoryAdded { accessory_id }
            | Self::AccessoryRemoved { accessory_id }
            | Self::Updated { accessory_id, .. } => *accessory_id,
        }
    }

    /// Returns `true` if this is a lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::AccessoryAdded { .. } | Self::AccessoryRemoved { .. }
        )
    }

    /// Creates an accessory added event.
    #[must_use]
    pub fn added(accessory_id: AccessoryId) -> Self {
        Self::AccessoryAdded { accessory_id }
    }

    /// Creates an accessory removed event.
    #[must_use]
    pub fn removed(accessory_id: AccessoryId) -> Self {
        Self::AccessoryRemoved { accessory_id }
    }

    /// Creates an update event.
    #[must_use]
    pub fn updated(accessory_id: AccessoryId, update: CharacteristicUpdate) -> Self {
        Self::Updated {
            accessory_id,
            update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn accessory_id_accessor() {
        let id = AccessoryId::new();
        assert_eq!(AccessoryEvent::added(id).accessory_id(), id);
        assert_eq!(AccessoryEvent::removed(id).accessory_id(), id);
        let update = CharacteristicUpdate::new(Position::HALF, Position::HALF);
        assert_eq!(AccessoryEvent::updated(id, update).accessory_id(), id);
    }

    #[test]
    fn lifecycle_classification() {
        let id = AccessoryId::new();
        assert!(AccessoryEvent::added(id).is_lifecycle());
        assert!(AccessoryEvent::removed(id).is_lifecycle());
        let update = CharacteristicUpdate::new(Position::MIN, Position::MAX);
        assert!(!AccessoryEvent::updated(id, update).is_lifecycle());
    }
}
