//! Runtime tuning loaded from `~/.dino-runner/config.json`.
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use crate::constants::*;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};

/// Tunable game parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ground speed at score 0 (px/frame).
    pub base_speed: f64,
    /// Downward acceleration applied every frame.
    pub gravity: f64,
    /// Vertical velocity set on jump (negative = upward).
    pub jump_strength: f64,
    /// Score added per running frame.
    pub score_rate: f64,
    pub min_spawn_frames: f64,
    pub max_spawn_frames: f64,
    /// Length of the post-restart grace period.
    pub invincibility_frames: u32,
    /// Target frame duration for the terminal driver.
    pub frame_ms: u64,
    /// Auto-release window for terminals that never report key releases.
    pub key_hold_ms: u64,
    /// Ring the terminal bell on milestones and collisions.
    pub sound: bool,
    /// Outline every hitbox in red.
    pub debug_hitboxes: bool,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_speed: DEFAULT_BASE_SPEED,
            gravity: DEFAULT_GRAVITY,
            jump_strength: DEFAULT_JUMP_STRENGTH,
            score_rate: DEFAULT_SCORE_RATE,
            min_spawn_frames: DEFAULT_MIN_SPAWN_FRAMES,
            max_spawn_frames: DEFAULT_MAX_SPAWN_FRAMES,
            invincibility_frames: DEFAULT_INVINCIBILITY_FRAMES,
            frame_ms: DEFAULT_FRAME_MS,
            key_hold_ms: DEFAULT_KEY_HOLD_MS,
            sound: true,
            debug_hitboxes: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load the config file, falling back to defaults when missing or invalid.
    pub fn load() -> Self {
        load_json_or_default::<GameConfig>(CONFIG_FILE).sanitized()
    }

    /// Repair values that would stall the simulation.
    pub fn sanitized(mut self) -> Self {
        if self.base_speed.is_nan() || self.base_speed <= 0.0 {
            self.base_speed = DEFAULT_BASE_SPEED;
        }
        if self.min_spawn_frames.is_nan() || self.min_spawn_frames <= 0.0 {
            self.min_spawn_frames = DEFAULT_MIN_SPAWN_FRAMES;
        }
        if self.max_spawn_frames.is_nan() || self.max_spawn_frames <= self.min_spawn_frames {
            self.max_spawn_frames = self.min_spawn_frames + 1.0;
        }
        if self.frame_ms == 0 {
            self.frame_ms = DEFAULT_FRAME_MS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = GameConfig::default();
        assert!((config.base_speed - 10.0).abs() < f64::EPSILON);
        assert!((config.gravity - 1.5).abs() < f64::EPSILON);
        assert!((config.jump_strength - (-24.0)).abs() < f64::EPSILON);
        assert_eq!(config.invincibility_frames, 60);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "base_speed": 12.5, "seed": 7 }"#).unwrap();
        assert!((config.base_speed - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.seed, Some(7));
        assert!((config.score_rate - DEFAULT_SCORE_RATE).abs() < f64::EPSILON);
        assert!(config.sound);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let config = GameConfig {
            base_speed: -1.0,
            min_spawn_frames: 50.0,
            max_spawn_frames: 10.0,
            frame_ms: 0,
            ..Default::default()
        }
        .sanitized();

        assert!((config.base_speed - DEFAULT_BASE_SPEED).abs() < f64::EPSILON);
        assert!(config.max_spawn_frames > config.min_spawn_frames);
        assert_eq!(config.frame_ms, DEFAULT_FRAME_MS);
    }
}
