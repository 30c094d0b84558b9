//! Simulation configuration.

/// Configuration for a headless simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of lives to play (each ends in a collision or the frame cap)
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per life before the run is cut off
    pub max_frames_per_run: u64,

    /// Steer the player around obstacles; off = stand still
    pub autopilot: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 50,
            seed: None,
            // Ten minutes at 60 frames per second
            max_frames_per_run: 36_000,
            autopilot: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Short config for smoke checks.
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            max_frames_per_run: 6_000,
            ..Default::default()
        }
    }
}
