//! Headless simulator for balance checks.
//!
//! Plays many lives through the real `World` with a scripted autopilot and
//! collects spawner and score statistics:
//! - obstacle type mix and how often types repeat
//! - spawn gaps as difficulty ramps
//! - how long a competent player survives

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::{steer, Steer};
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
