//! Dino Runner - a side-scrolling endless runner.
//!
//! This library holds the simulation (entities, world cycle, difficulty,
//! persistence) and the terminal canvas. The binary is a thin driver.

pub mod canvas;
pub mod collision;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod entities;
pub mod events;
pub mod high_score;
pub mod input;
pub mod simulator;
pub mod ui;
pub mod utils;
pub mod world;

pub use config::GameConfig;
pub use events::{CueSink, GameEvent};
pub use high_score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use world::{build_world, Entity, EntityKind, GameContext, World};
