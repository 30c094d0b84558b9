//! Shared per-session state handed to every entity.
//!
//! Entities never look each other up. An entity that owns a value other
//! entities need publishes it here during its own update; readers see the
//! value from this frame if the owner updates earlier, else from the last.

use super::{Entity, EntityKind};
use crate::collision::Rect;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::input::KeyState;
use rand::rngs::StdRng;

/// What obstacles need to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub bounds: Rect,
    pub invincible: bool,
}

pub struct GameContext {
    /// Gameplay updates are no-ops while false.
    pub running: bool,
    pub keys: KeyState,
    /// Frames since the world was created (advances while frozen too).
    pub frame: u64,
    /// Wall-clock milliseconds supplied by the driver for the current draw.
    pub now_ms: u64,
    pub rng: StdRng,
    pub debug_hitboxes: bool,

    // Published by ScoreManager
    pub score: f64,
    pub high_score: u64,
    // Published by Ground
    pub base_speed: f64,
    pub ground_speed: f64,
    // Published by Player
    pub player: Option<PlayerSnapshot>,

    spawned: Vec<Box<dyn Entity>>,
    events: Vec<GameEvent>,
}

impl GameContext {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            running: false,
            keys: KeyState::new(),
            frame: 0,
            now_ms: 0,
            rng,
            debug_hitboxes: config.debug_hitboxes,
            score: 0.0,
            high_score: 0,
            base_speed: config.base_speed,
            ground_speed: config.base_speed,
            player: None,
            spawned: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue an entity; it joins the world at the start of the next cycle.
    pub fn spawn(&mut self, entity: Box<dyn Entity>) {
        self.spawned.push(entity);
    }

    /// Drain queued entities. The world calls this at the top of each cycle.
    pub fn take_spawned(&mut self) -> Vec<Box<dyn Entity>> {
        std::mem::take(&mut self.spawned)
    }

    /// Discard queued entities of `kind` before they join the world.
    pub fn drop_pending(&mut self, kind: EntityKind) {
        self.spawned.retain(|e| e.kind() != kind);
    }

    pub fn pending_spawns(&self) -> usize {
        self.spawned.len()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
