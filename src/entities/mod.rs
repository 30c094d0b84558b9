//! The six entity variants that make up a run.

pub mod cloud_manager;
pub mod ground;
pub mod obstacle;
pub mod obstacle_manager;
pub mod player;
pub mod score_manager;

pub use cloud_manager::{Cloud, CloudManager};
pub use ground::{Ground, GroundDetail};
pub use obstacle::{Obstacle, ObstacleKind};
pub use obstacle_manager::{pick_obstacle_kind, ObstacleManager};
pub use player::Player;
pub use score_manager::ScoreManager;
