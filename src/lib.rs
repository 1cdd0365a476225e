// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BlindSim` Lib - A simulated motorized window covering for smart-home bridges.
//!
//! This library models a window covering accessory (blinds) with a target
//! position, a current position and a derived motion state. A recurring tick
//! moves the current position one unit toward the target, emulating a
//! physical motor, and pushes the three characteristic values back to the
//! controller after every step.
//!
//! # Features
//!
//! - **Validated positions**: Writes are coerced into a 0-100% [`Position`]
//!   or rejected with [`ValueError`]
//! - **Deterministic simulation**: [`PositionSimulator`](state::PositionSimulator)
//!   is a plain state machine, usable without any runtime
//! - **Timer lifecycle**: Each spawned accessory owns its tokio tick task and
//!   releases it on [`stop`](WindowCoveringAccessory::stop) or drop
//! - **Push updates**: Callbacks through the [`Subscribable`] trait
//! - **Multi-accessory hosting**: [`Platform`] with a broadcast event bus
//!
//! # Quick Start
//!
//! ```no_run
//! use blindsim_lib::{AccessoryConfig, Subscribable, WindowCoveringAccessory};
//!
//! #[tokio::main]
//! async fn main() -> blindsim_lib::Result<()> {
//!     let blind = WindowCoveringAccessory::spawn(AccessoryConfig::new("Living Room Blind"))?;
//!
//!     blind.on_update(|update| {
//!         println!(
//!             "current={} target={} state={}",
//!             update.current_position, update.target_position, update.position_state
//!         );
//!     });
//!
//!     // Controller writes arrive loosely typed
//!     blind.set_target_position(80)?;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//!     blind.stop();
//!     Ok(())
//! }
//! ```
//!
//! ## Driving the simulation by hand
//!
//! ```
//! use blindsim_lib::{AccessoryConfig, PositionState, WindowCoveringAccessory};
//!
//! let blind = WindowCoveringAccessory::new(&AccessoryConfig::default())?;
//! blind.set_target_position(0)?;
//!
//! for _ in 0..50 {
//!     blind.tick_now();
//! }
//! assert_eq!(blind.get_current_position().value(), 0);
//! assert_eq!(blind.get_position_state(), PositionState::Stopped);
//! # Ok::<(), blindsim_lib::Error>(())
//! ```

pub mod accessory;
pub mod error;
pub mod event;
pub mod platform;
pub mod state;
pub mod subscription;
pub mod types;

pub use accessory::{AccessoryConfig, AccessoryInformation, WindowCoveringAccessory};
pub use error::{ConfigError, Error, PlatformError, Result, ValueError};
pub use event::{AccessoryEvent, AccessoryId, EventBus};
pub use platform::{Platform, PlatformConfig};
pub use state::{CharacteristicUpdate, PositionSimulator, StateChange};
pub use subscription::{CallbackRegistry, Subscribable, SubscriptionId};
pub use types::{CharacteristicValue, Position, PositionState};
