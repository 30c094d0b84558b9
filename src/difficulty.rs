//! Score-driven difficulty curves.

use crate::constants::*;
use rand::Rng;

/// Ground (and obstacle) speed for a given score.
///
/// Grows linearly by one px/frame per 200 points and caps at a bonus of
/// `base + 10`, so the top speed is `2 * base + 10`.
pub fn ground_speed(base_speed: f64, score: f64) -> f64 {
    base_speed + (score / SPEED_SCORE_DIVISOR).min(base_speed + SPEED_CAP_BONUS)
}

/// Minimum frames between spawns. Shrinks with score past 500, down to 35.
pub fn min_spawn_interval(base_min: f64, score: f64) -> f64 {
    if score <= SPAWN_RAMP_SCORE {
        return base_min;
    }
    let floor = MIN_SPAWN_FLOOR.min(base_min);
    (base_min - score / SPAWN_RAMP_DIVISOR).max(floor)
}

/// Draw the next spawn countdown uniformly from `[min, max)`.
pub fn next_spawn_interval<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}
