//! World state: the ordered entity list and the per-frame cycle.
//!
//! Each cycle appends last frame's spawns, updates every entity in
//! registration order, then sweeps entities that flagged themselves for
//! removal. Drawing walks the same order, so registration order is layering.

mod context;

pub use context::{GameContext, PlayerSnapshot};

use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::entities::{CloudManager, Ground, ObstacleManager, Player, ScoreManager};
use crate::events::GameEvent;
use crate::high_score::HighScoreStore;
use crate::input::KeyState;
use rand::rngs::StdRng;
use std::any::Any;
use tracing::{debug, info};

/// Entity variants, used for bulk removal and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Ground,
    Obstacle,
    ObstacleManager,
    CloudManager,
    ScoreManager,
}

/// Anything that takes part in the update/draw cycle.
pub trait Entity: Any {
    fn kind(&self) -> EntityKind;

    /// Advance one frame. Gameplay entities return early while
    /// `ctx.running` is false.
    fn update(&mut self, ctx: &mut GameContext);

    fn draw(&self, ctx: &GameContext, canvas: &mut dyn Canvas);

    /// Set during `update` to have the entity swept at the end of the cycle.
    fn is_removed(&self) -> bool {
        false
    }

    /// Called on every surviving entity by the restart protocol.
    fn on_restart(&mut self, _ctx: &mut GameContext) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub struct World {
    entities: Vec<Box<dyn Entity>>,
    ctx: GameContext,
}

impl World {
    pub fn new(ctx: GameContext) -> Self {
        Self {
            entities: Vec::new(),
            ctx,
        }
    }

    /// Register an entity. It is updated and drawn from the next cycle on.
    pub fn add_entity<E: Entity>(&mut self, entity: E) {
        self.ctx.spawn(Box::new(entity));
    }

    /// One update pass.
    pub fn update(&mut self) {
        let spawned = self.ctx.take_spawned();
        self.entities.extend(spawned);

        if !self.ctx.running && self.ctx.keys.restart_pressed() {
            self.reset_game();
        }

        for entity in self.entities.iter_mut() {
            entity.update(&mut self.ctx);
        }

        self.entities.retain(|e| !e.is_removed());
        self.ctx.frame += 1;
    }

    /// One draw pass. `now_ms` is wall-clock time, used for cosmetic effects only.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, now_ms: u64) {
        self.ctx.now_ms = now_ms;
        for entity in &self.entities {
            entity.draw(&self.ctx, canvas);
        }
    }

    /// Update then draw.
    pub fn tick(&mut self, canvas: &mut dyn Canvas, now_ms: u64) {
        self.update();
        self.draw(canvas, now_ms);
    }

    /// Restart protocol: resume play, drop every obstacle (including ones
    /// still queued), and let the survivors reset themselves (score, ground
    /// speed, player grace period).
    pub fn reset_game(&mut self) {
        self.ctx.drop_pending(EntityKind::Obstacle);
        let before = self.entities.len();
        self.entities.retain(|e| e.kind() != EntityKind::Obstacle);
        debug!(
            removed = before - self.entities.len(),
            "restart: cleared obstacles"
        );

        self.ctx.running = true;
        for entity in self.entities.iter_mut() {
            entity.on_restart(&mut self.ctx);
        }
        self.ctx.emit(GameEvent::Restarted);
        info!("game restarted");
    }

    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.entities.iter().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    /// First entity of concrete type `T`.
    pub fn find<T: Entity>(&self) -> Option<&T> {
        self.entities
            .iter()
            .find_map(|e| e.as_any().downcast_ref::<T>())
    }

    pub fn find_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.entities
            .iter_mut()
            .find_map(|e| e.as_any_mut().downcast_mut::<T>())
    }

    /// Every entity of concrete type `T`, in update order.
    pub fn find_all<T: Entity>(&self) -> Vec<&T> {
        self.entities
            .iter()
            .filter_map(|e| e.as_any().downcast_ref::<T>())
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.ctx.take_events()
    }

    pub fn is_running(&self) -> bool {
        self.ctx.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.ctx.running = running;
    }

    pub fn keys_mut(&mut self) -> &mut KeyState {
        &mut self.ctx.keys
    }

    pub fn ctx(&self) -> &GameContext {
        &self.ctx
    }
}

/// Build a ready-to-run world.
///
/// Registration order fixes both update order and draw layering: clouds,
/// ground, player, spawner, score overlay. Obstacles are appended after
/// these as they spawn, so they always see this frame's ground speed and
/// player position.
pub fn build_world(config: &GameConfig, store: Box<dyn HighScoreStore>, rng: StdRng) -> World {
    let mut ctx = GameContext::new(config, rng);

    let clouds = CloudManager::new(&mut ctx.rng);
    let ground = Ground::new(config, &mut ctx.rng);
    let player = Player::new(config);
    let spawner = ObstacleManager::new(config);
    let score = ScoreManager::new(store, config.score_rate);
    ctx.high_score = score.high_score();

    let mut world = World::new(ctx);
    world.add_entity(clouds);
    world.add_entity(ground);
    world.add_entity(player);
    world.add_entity(spawner);
    world.add_entity(score);
    world.set_running(true);
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{palette, RecordingCanvas};
    use rand::SeedableRng;

    /// Minimal entity: counts updates while running, removes itself after `ttl`.
    struct Marker {
        kind: EntityKind,
        updates: u32,
        ttl: Option<u32>,
        tag: f64,
    }

    impl Marker {
        fn new(kind: EntityKind, tag: f64) -> Self {
            Self {
                kind,
                updates: 0,
                ttl: None,
                tag,
            }
        }
    }

    impl Entity for Marker {
        fn kind(&self) -> EntityKind {
            self.kind
        }

        fn update(&mut self, ctx: &mut GameContext) {
            if !ctx.running {
                return;
            }
            self.updates += 1;
        }

        fn draw(&self, _ctx: &GameContext, canvas: &mut dyn Canvas) {
            canvas.fill_rect(self.tag, 0.0, 1.0, 1.0, palette::TEXT);
        }

        fn is_removed(&self) -> bool {
            self.ttl.is_some_and(|ttl| self.updates >= ttl)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn empty_world() -> World {
        let ctx = GameContext::new(&GameConfig::default(), StdRng::seed_from_u64(7));
        let mut world = World::new(ctx);
        world.set_running(true);
        world
    }

    #[test]
    fn test_added_entity_joins_next_cycle() {
        let mut world = empty_world();
        world.add_entity(Marker::new(EntityKind::Player, 1.0));
        assert_eq!(world.len(), 0);

        world.update();
        assert_eq!(world.len(), 1);
        assert_eq!(world.find::<Marker>().unwrap().updates, 1);
    }

    #[test]
    fn test_draw_order_is_registration_order() {
        let mut world = empty_world();
        for tag in [3.0, 1.0, 2.0] {
            world.add_entity(Marker::new(EntityKind::Ground, tag));
        }
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        world.tick(&mut canvas, 0);

        let xs: Vec<f64> = canvas
            .commands
            .iter()
            .map(|c| match c {
                crate::canvas::DrawCommand::FillRect { x, .. } => *x,
                _ => -1.0,
            })
            .collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_sweep_after_update_pass() {
        let mut world = empty_world();
        let mut short = Marker::new(EntityKind::Obstacle, 0.0);
        short.ttl = Some(2);
        world.add_entity(short);
        world.add_entity(Marker::new(EntityKind::Ground, 1.0));

        world.update();
        assert_eq!(world.len(), 2);
        world.update();
        assert_eq!(world.len(), 1);
        assert_eq!(world.count_kind(EntityKind::Obstacle), 0);
    }

    #[test]
    fn test_frozen_world_skips_updates() {
        let mut world = empty_world();
        world.add_entity(Marker::new(EntityKind::Player, 0.0));
        world.update();
        world.set_running(false);
        for _ in 0..10 {
            world.update();
        }
        assert_eq!(world.find::<Marker>().unwrap().updates, 1);
    }

    #[test]
    fn test_restart_key_only_acts_when_frozen() {
        let mut world = empty_world();
        world.add_entity(Marker::new(EntityKind::Obstacle, 0.0));
        world.update();
        world.keys_mut().set(crate::input::RESTART_KEY, true);

        world.update();
        assert_eq!(world.count_kind(EntityKind::Obstacle), 1);

        world.set_running(false);
        world.update();
        assert!(world.is_running());
        assert_eq!(world.count_kind(EntityKind::Obstacle), 0);
        assert!(world.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_reset_keeps_non_obstacles_in_order() {
        let mut world = empty_world();
        world.add_entity(Marker::new(EntityKind::CloudManager, 0.0));
        world.add_entity(Marker::new(EntityKind::Obstacle, 1.0));
        world.add_entity(Marker::new(EntityKind::Player, 2.0));
        world.add_entity(Marker::new(EntityKind::Obstacle, 3.0));
        world.update();

        world.reset_game();
        let kinds: Vec<EntityKind> = world.entities().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EntityKind::CloudManager, EntityKind::Player]);
    }

    #[test]
    fn test_reset_discards_queued_obstacles() {
        let mut world = empty_world();
        world.add_entity(Marker::new(EntityKind::Player, 0.0));
        world.update();

        // Queued during the previous run, not yet part of the world
        world.add_entity(Marker::new(EntityKind::Obstacle, 1.0));
        world.add_entity(Marker::new(EntityKind::Ground, 2.0));
        world.set_running(false);
        world.reset_game();
        assert_eq!(world.ctx().pending_spawns(), 1);

        world.update();
        assert_eq!(world.count_kind(EntityKind::Obstacle), 0);
        assert_eq!(world.count_kind(EntityKind::Ground), 1);
    }

    #[test]
    fn test_build_world_registers_in_layer_order() {
        let world = {
            let mut w = build_world(
                &GameConfig::default(),
                Box::new(crate::high_score::MemoryHighScoreStore::default()),
                StdRng::seed_from_u64(1),
            );
            w.update();
            w
        };
        let kinds: Vec<EntityKind> = world.entities().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::CloudManager,
                EntityKind::Ground,
                EntityKind::Player,
                EntityKind::ObstacleManager,
                EntityKind::ScoreManager,
            ]
        );
        assert!(world.is_running());
    }
}
