//! Spawner: a frame countdown that releases weighted-random obstacles.

use super::obstacle::{Obstacle, ObstacleKind};
use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::constants::*;
use crate::difficulty::{min_spawn_interval, next_spawn_interval};
use crate::world::{Entity, EntityKind, GameContext};
use rand::Rng;
use std::any::Any;
use tracing::debug;

/// Weighted draw: small cactus 40%, large cactus 30%, bird 30%.
fn draw_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    let roll = rng.gen::<f64>();
    if roll < 0.4 {
        ObstacleKind::SmallCactus
    } else if roll < 0.7 {
        ObstacleKind::LargeCactus
    } else {
        ObstacleKind::Bird
    }
}

/// Pick the next obstacle type, discouraging immediate repeats.
///
/// A draw equal to `last` is redrawn with probability 0.7. Redraws stop
/// after `MAX_SPAWN_REDRAWS`, at which point the last draw stands.
pub fn pick_obstacle_kind<R: Rng>(rng: &mut R, last: Option<ObstacleKind>) -> ObstacleKind {
    let mut kind = draw_kind(rng);
    let mut redraws = 0;
    while Some(kind) == last
        && redraws < MAX_SPAWN_REDRAWS
        && rng.gen::<f64>() < REPEAT_REJECT_CHANCE
    {
        kind = draw_kind(rng);
        redraws += 1;
    }
    kind
}

#[derive(Debug, Clone)]
pub struct ObstacleManager {
    /// Frames since the last spawn.
    pub spawn_timer: f64,
    pub min_spawn_time: f64,
    pub max_spawn_time: f64,
    /// Countdown target for the next spawn.
    pub next_spawn_time: f64,
    pub last_kind: Option<ObstacleKind>,
    base_min_spawn_time: f64,
    spawned: u64,
}

impl ObstacleManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_timer: 0.0,
            min_spawn_time: config.min_spawn_frames,
            max_spawn_time: config.max_spawn_frames,
            next_spawn_time: config.min_spawn_frames,
            last_kind: None,
            base_min_spawn_time: config.min_spawn_frames,
            spawned: 0,
        }
    }

    /// Total obstacles released this session.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    fn spawn_obstacle(&mut self, ctx: &mut GameContext) {
        let kind = pick_obstacle_kind(&mut ctx.rng, self.last_kind);
        self.last_kind = Some(kind);
        self.spawned += 1;

        let obstacle = Obstacle::new(kind, OBSTACLE_SPAWN_X, &mut ctx.rng);
        debug!(
            kind = kind.name(),
            y = obstacle.y,
            next_in = self.next_spawn_time,
            "spawned obstacle"
        );
        ctx.spawn(Box::new(obstacle));
    }
}

impl Entity for ObstacleManager {
    fn kind(&self) -> EntityKind {
        EntityKind::ObstacleManager
    }

    fn update(&mut self, ctx: &mut GameContext) {
        if !ctx.running {
            return;
        }

        self.spawn_timer += 1.0;
        if self.spawn_timer < self.next_spawn_time {
            return;
        }

        self.min_spawn_time = min_spawn_interval(self.base_min_spawn_time, ctx.score);
        self.spawn_timer = 0.0;
        self.next_spawn_time =
            next_spawn_interval(&mut ctx.rng, self.min_spawn_time, self.max_spawn_time);
        self.spawn_obstacle(ctx);
    }

    fn draw(&self, _ctx: &GameContext, _canvas: &mut dyn Canvas) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn running_ctx() -> GameContext {
        let mut ctx = GameContext::new(&GameConfig::default(), StdRng::seed_from_u64(11));
        ctx.running = true;
        ctx
    }

    #[test]
    fn test_weighted_distribution_without_history() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let n = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..n {
            match pick_obstacle_kind(&mut rng, None) {
                ObstacleKind::SmallCactus => counts[0] += 1,
                ObstacleKind::LargeCactus => counts[1] += 1,
                ObstacleKind::Bird => counts[2] += 1,
            }
        }
        let frac = |c: usize| c as f64 / n as f64;
        assert!((frac(counts[0]) - 0.4).abs() < 0.02);
        assert!((frac(counts[1]) - 0.3).abs() < 0.02);
        assert!((frac(counts[2]) - 0.3).abs() < 0.02);
    }

    #[test]
    fn test_anti_repeat_cuts_repeat_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut last = None;
        let mut repeats = 0;
        let n = 10_000;
        for _ in 0..n {
            let kind = pick_obstacle_kind(&mut rng, last);
            if Some(kind) == last {
                repeats += 1;
            }
            last = Some(kind);
        }
        // Independent draws repeat ~34% of the time; rejection leaves ~13%.
        let rate = repeats as f64 / n as f64;
        assert!(rate > 0.08 && rate < 0.19, "repeat rate {}", rate);
    }

    #[test]
    fn test_first_spawn_after_min_interval() {
        let mut manager = ObstacleManager::new(&GameConfig::default());
        let mut ctx = running_ctx();
        for _ in 0..44 {
            manager.update(&mut ctx);
        }
        assert_eq!(ctx.pending_spawns(), 0);
        manager.update(&mut ctx);
        assert_eq!(ctx.pending_spawns(), 1);
        assert_eq!(manager.spawned(), 1);
        assert!((manager.spawn_timer - 0.0).abs() < f64::EPSILON);
        assert!(
            (DEFAULT_MIN_SPAWN_FRAMES..DEFAULT_MAX_SPAWN_FRAMES).contains(&manager.next_spawn_time)
        );
    }

    #[test]
    fn test_spawn_cadence_within_window() {
        let mut manager = ObstacleManager::new(&GameConfig::default());
        let mut ctx = running_ctx();
        let mut frames_since = 0u32;
        let mut gaps = Vec::new();
        for _ in 0..5_000 {
            manager.update(&mut ctx);
            frames_since += 1;
            if ctx.pending_spawns() > 0 {
                let _ = ctx.take_spawned();
                gaps.push(frames_since);
                frames_since = 0;
            }
        }
        assert!(gaps.len() > 50);
        for gap in gaps.iter().skip(1) {
            assert!((45..=90).contains(gap), "gap {}", gap);
        }
    }

    #[test]
    fn test_high_score_shortens_min_interval() {
        let mut manager = ObstacleManager::new(&GameConfig::default());
        let mut ctx = running_ctx();
        ctx.score = 5_000.0;
        manager.spawn_timer = manager.next_spawn_time;
        manager.update(&mut ctx);
        assert!((manager.min_spawn_time - MIN_SPAWN_FLOOR).abs() < 1e-9);
        assert!(manager.next_spawn_time >= MIN_SPAWN_FLOOR);
    }

    #[test]
    fn test_frozen_manager_does_not_spawn() {
        let mut manager = ObstacleManager::new(&GameConfig::default());
        let mut ctx = running_ctx();
        ctx.running = false;
        for _ in 0..500 {
            manager.update(&mut ctx);
        }
        assert_eq!(ctx.pending_spawns(), 0);
        assert!((manager.spawn_timer - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spawned_obstacle_enters_at_right_edge() {
        let mut manager = ObstacleManager::new(&GameConfig::default());
        let mut ctx = running_ctx();
        manager.spawn_timer = manager.next_spawn_time;
        manager.update(&mut ctx);

        let spawned = ctx.take_spawned();
        let obstacle = spawned[0].as_any().downcast_ref::<Obstacle>().unwrap();
        assert!((obstacle.x - OBSTACLE_SPAWN_X).abs() < f64::EPSILON);
        assert_eq!(Some(obstacle.kind), manager.last_kind);
    }
}
