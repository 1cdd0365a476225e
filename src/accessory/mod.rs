// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Window covering accessory.
//!
//! [`WindowCoveringAccessory`] exposes the four characteristic handlers a
//! bridge controller calls (get current position, get target position, get
//! position state, set target position) and pushes updates back through
//! [`Subscribable`](crate::subscription::Subscribable) callbacks.

mod accessory_config;
mod window_covering;

pub use accessory_config::{AccessoryConfig, AccessoryInformation, DEFAULT_TICK_INTERVAL_MS};
pub use window_covering::WindowCoveringAccessory;
