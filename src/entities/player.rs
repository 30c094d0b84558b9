//! The runner: gravity, ground clamp, jump and duck.

use crate::canvas::{palette, Canvas, Rgba};
use crate::collision::Rect;
use crate::config::GameConfig;
use crate::constants::*;
use crate::events::GameEvent;
use crate::world::{Entity, EntityKind, GameContext, PlayerSnapshot};
use std::any::Any;

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    /// Top edge. Equals `GROUND_Y` when standing on the ground.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity_y: f64,
    pub gravity: f64,
    /// Negative: upward.
    pub jump_strength: f64,
    pub normal_height: f64,
    pub duck_height: f64,
    pub is_ducking: bool,
    pub is_jumping: bool,
    pub invincible: bool,
    pub invincible_timer: u32,
    invincibility_frames: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_NORMAL_HEIGHT,
            velocity_y: 0.0,
            gravity: config.gravity,
            jump_strength: config.jump_strength,
            normal_height: PLAYER_NORMAL_HEIGHT,
            duck_height: PLAYER_DUCK_HEIGHT,
            is_ducking: false,
            is_jumping: false,
            invincible: false,
            invincible_timer: 0,
            invincibility_frames: config.invincibility_frames,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn is_on_ground(&self) -> bool {
        self.y >= GROUND_Y
    }

    /// Start (or restart) the post-restart grace period.
    pub fn grant_invincibility(&mut self) {
        self.invincible = true;
        self.invincible_timer = 0;
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            bounds: self.bounds(),
            invincible: self.invincible,
        }
    }

    fn tick_invincibility(&mut self) {
        if !self.invincible {
            return;
        }
        self.invincible_timer += 1;
        if self.invincible_timer > self.invincibility_frames {
            self.invincible = false;
            self.invincible_timer = 0;
        }
    }

    /// Flash colour alternates every `INVINCIBLE_FLASH_MS` of wall-clock time.
    /// Cosmetic only; the simulation never reads it.
    fn fill_color(&self, now_ms: u64) -> Rgba {
        if self.invincible && (now_ms / INVINCIBLE_FLASH_MS) % 2 == 0 {
            palette::PLAYER_FLASH
        } else {
            palette::PLAYER
        }
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn update(&mut self, ctx: &mut GameContext) {
        if !ctx.running {
            return;
        }

        self.tick_invincibility();

        self.velocity_y += self.gravity;
        self.y += self.velocity_y;

        if self.y > GROUND_Y {
            self.y = GROUND_Y;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }

        // No double jump: is_jumping only clears on landing
        if ctx.keys.jump_pressed() && !self.is_jumping && self.y >= GROUND_Y {
            self.velocity_y = self.jump_strength;
            self.is_jumping = true;
            ctx.emit(GameEvent::Jumped);
        }

        self.is_ducking = ctx.keys.duck_pressed() && !self.is_jumping;
        self.height = if self.is_ducking {
            self.duck_height
        } else {
            self.normal_height
        };
        if self.is_ducking {
            // Keep the bottom edge on the ground line
            self.y = GROUND_Y + (self.normal_height - self.duck_height);
        }

        ctx.player = Some(self.snapshot());
    }

    fn draw(&self, ctx: &GameContext, canvas: &mut dyn Canvas) {
        canvas.fill_rect(
            self.x,
            self.y,
            self.width,
            self.height,
            self.fill_color(ctx.now_ms),
        );
        if ctx.debug_hitboxes {
            canvas.stroke_rect(self.x, self.y, self.width, self.height, palette::HITBOX);
        }
    }

    fn on_restart(&mut self, ctx: &mut GameContext) {
        self.grant_invincibility();
        ctx.player = Some(self.snapshot());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
