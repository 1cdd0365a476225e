// SPDX-License-Identifier: MPL-2.0

//! Window covering simulation example.
//!
//! Spawns one simulated blind, moves it to a target position and prints the
//! characteristic updates it pushes along the way.
//!
//! # Usage
//!
//! ```bash
//! # Open to 80% (default)
//! cargo run --example simulate
//!
//! # Close fully, with debug logs from the simulator
//! RUST_LOG=debug cargo run --example simulate -- 0
//! ```

use std::env;
use std::time::Duration;

use blindsim_lib::subscription::Subscribable;
use blindsim_lib::{AccessoryConfig, WindowCoveringAccessory};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = match env::var("RUST_LOG").as_deref() {
        Ok("trace") => Level::TRACE,
        Ok("debug") => Level::DEBUG,
        _ => Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let target = env::args().nth(1).unwrap_or_else(|| "80".to_string());

    let config = AccessoryConfig::new("Demo Blind").with_unique_id("demo-blind");
    let blind = WindowCoveringAccessory::spawn(config)?;

    blind.on_position_state_changed(|state| {
        println!("Motion: {state}");
    });
    blind.on_current_position_changed(|position| {
        println!("Position: {position}");
    });

    blind.set_target_position(target.as_str())?;

    let distance = blind
        .get_current_position()
        .distance(blind.get_target_position());
    let run_for = blind.tick_interval() * (u32::from(distance) + 1);
    tokio::time::sleep(run_for + Duration::from_millis(50)).await;

    let snapshot = blind.snapshot();
    println!(
        "Final: current={} target={} state={}",
        snapshot.current_position, snapshot.target_position, snapshot.position_state
    );

    blind.stop();
    Ok(())
}
