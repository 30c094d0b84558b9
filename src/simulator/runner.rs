//! Simulation runner: plays lives back to back in one world.

use super::autopilot::{steer, Steer};
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::config::GameConfig;
use crate::entities::{ObstacleKind, ObstacleManager, ScoreManager};
use crate::events::GameEvent;
use crate::high_score::MemoryHighScoreStore;
use crate::input::RESTART_KEY;
use crate::world::{build_world, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Spawner bookkeeping carried across lives.
#[derive(Debug, Default)]
struct SpawnTracker {
    seen: u64,
    last_kind: Option<ObstacleKind>,
    frames_since_spawn: u64,
}

impl SpawnTracker {
    /// Record any obstacle released during the last update.
    fn observe(&mut self, world: &World, stats: &mut RunStats) {
        self.frames_since_spawn += 1;
        let Some(spawner) = world.find::<ObstacleManager>() else {
            return;
        };
        if spawner.spawned() == self.seen {
            return;
        }
        self.seen = spawner.spawned();

        if let Some(kind) = spawner.last_kind {
            *stats.spawned.entry(kind.name().to_string()).or_insert(0) += 1;
            if self.last_kind == Some(kind) {
                stats.repeats += 1;
            }
            self.last_kind = Some(kind);
        }
        stats.spawn_gaps.push(self.frames_since_spawn);
        self.frames_since_spawn = 0;
    }
}

fn score_of(world: &World) -> u64 {
    world
        .find::<ScoreManager>()
        .map_or(0, |s| s.display_score())
}

/// Play one life: until a collision or the frame cap.
fn simulate_single_run(
    config: &SimConfig,
    world: &mut World,
    tracker: &mut SpawnTracker,
) -> RunStats {
    let mut stats = RunStats::default();

    while stats.frames < config.max_frames_per_run {
        let decision = if config.autopilot {
            steer(world)
        } else {
            Steer::default()
        };
        decision.apply(world.keys_mut());

        world.update();
        stats.frames += 1;
        tracker.observe(world, &mut stats);

        for event in world.drain_events() {
            match event {
                GameEvent::Jumped => stats.jumps += 1,
                GameEvent::Milestone(_) => stats.milestones += 1,
                GameEvent::Collided => stats.collided = true,
                _ => {}
            }
        }
        if stats.collided {
            break;
        }
    }

    stats.final_score = score_of(world);
    stats
}

/// Start the next life: restart after a collision, or force a reset if
/// the previous life hit the frame cap.
fn restart(world: &mut World) {
    world.keys_mut().clear();
    if world.is_running() {
        world.reset_game();
        return;
    }
    world.keys_mut().set(RESTART_KEY, true);
    world.update();
    world.keys_mut().set(RESTART_KEY, false);
    world.drain_events();
}

/// Run the whole simulation and aggregate the results.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = MemoryHighScoreStore::default();
    let mut world = build_world(&GameConfig::default(), Box::new(store.clone()), rng);
    let mut tracker = SpawnTracker::default();

    let mut runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        if run_idx > 0 {
            restart(&mut world);
        }
        let stats = simulate_single_run(config, &mut world, &mut tracker);
        debug!(
            run = run_idx,
            score = stats.final_score,
            frames = stats.frames,
            "simulated run"
        );
        if config.verbosity >= 2 {
            println!(
                "  run {:>4}: score {:>6}  frames {:>7}  {}",
                run_idx + 1,
                stats.final_score,
                stats.frames,
                if stats.collided { "crashed" } else { "cut off" }
            );
        }
        runs.push(stats);
    }

    SimReport::from_runs(runs, store.value())
}
