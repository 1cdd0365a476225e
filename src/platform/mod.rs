// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge platform hosting several simulated accessories.
//!
//! A bridge plugin typically registers one accessory per configured device.
//! [`Platform`] does the same: it spawns a [`WindowCoveringAccessory`]
//! per [`AccessoryConfig`] entry, keeps them keyed by
//! [`AccessoryId`], and fans their updates out on a broadcast bus.
//!
//! ```no_run
//! use blindsim_lib::platform::{Platform, PlatformConfig};
//! use blindsim_lib::event::AccessoryEvent;
//!
//! # async fn example() -> blindsim_lib::Result<()> {
//! let config = PlatformConfig::from_json(r#"{
//!     "name": "Blinds",
//!     "devices": [ { "exampleDisplayName": "Bedroom", "exampleUniqueId": "ABCD" } ]
//! }"#)?;
//! let platform = Platform::from_config(config).await?;
//!
//! let mut events = platform.subscribe();
//! while let Ok(event) = events.recv().await {
//!     if let AccessoryEvent::Updated { update, .. } = event {
//!         println!("{}", update.current_position);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`WindowCoveringAccessory`]: crate::accessory::WindowCoveringAccessory
//! [`AccessoryConfig`]: crate::accessory::AccessoryConfig
//! [`AccessoryId`]: crate::event::AccessoryId

mod bridge_platform;
mod platform_config;

pub use bridge_platform::Platform;
pub use platform_config::PlatformConfig;
