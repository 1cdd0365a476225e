// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory identifier type.

use std::fmt;

use uuid::Uuid;

/// Namespace for identifiers derived from configured unique ids.
const ACCESSORY_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c7e_2b94_4d0a_9e55_0c3b_7f12_a8d4);

/// Unique identifier for an accessory.
///
/// Accessories configured with a stable unique id get the same identifier on
/// every run, so a bridge can match them against its cache. Others get a
/// random one.
///
/// # Examples
///
/// ```
/// use blindsim_lib::event::AccessoryId;
///
/// let a = AccessoryId::from_unique_id("ABCD");
/// let b = AccessoryId::from_unique_id("ABCD");
/// assert_eq!(a, b);
/// assert_ne!(AccessoryId::new(), AccessoryId::new());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AccessoryId(Uuid);

impl AccessoryId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derives a stable identifier from a configured unique id.
    #[must_use]
    pub fn from_unique_id(unique_id: &str) -> Self {
        Self(Uuid::new_v5(&ACCESSORY_NAMESPACE, unique_id.as_bytes()))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AccessoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "AccessoryId({short}...)")
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AccessoryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
