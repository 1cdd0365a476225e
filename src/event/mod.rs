// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform-wide events.
//!
//! - [`AccessoryId`] - Identifier of an accessory on a platform
//! - [`AccessoryEvent`] - Lifecycle and update notifications
//! - [`EventBus`] - Broadcast channel carrying those events

mod accessory_event;
mod accessory_id;
mod event_bus;

pub use accessory_event::AccessoryEvent;
pub use accessory_id::AccessoryId;
pub use event_bus::EventBus;
