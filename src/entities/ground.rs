//! Scrolling ground strip. Owns the world scroll speed.

use crate::canvas::{palette, Canvas};
use crate::config::GameConfig;
use crate::constants::*;
use crate::difficulty::ground_speed;
use crate::world::{Entity, EntityKind, GameContext};
use rand::Rng;
use std::any::Any;

/// A small bump or pebble on the ground strip.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundDetail {
    /// Offset from the tile origin.
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

impl GroundDetail {
    fn random<R: Rng>(rng: &mut R, x: f64) -> Self {
        Self {
            x,
            width: 2.0 + rng.gen::<f64>() * 5.0,
            height: 2.0 + rng.gen::<f64>() * 4.0,
        }
    }
}

/// Two tiles drawn back to back so the wrap is seamless.
#[derive(Debug, Clone)]
pub struct Ground {
    pub base_speed: f64,
    pub speed: f64,
    /// Scroll offset in `(-width, 0]`.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub details: Vec<GroundDetail>,
}

impl Ground {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let width = CANVAS_WIDTH;
        let details = (0..GROUND_DETAIL_COUNT)
            .map(|_| {
                let x = rng.gen::<f64>() * width;
                GroundDetail::random(rng, x)
            })
            .collect();

        Self {
            base_speed: config.base_speed,
            speed: config.base_speed,
            x: 0.0,
            y: GROUND_STRIP_Y,
            width,
            height: GROUND_STRIP_HEIGHT,
            details,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn reset_speed(&mut self) {
        self.speed = self.base_speed;
    }

    /// Scroll tiles and details by the current speed.
    fn scroll<R: Rng>(&mut self, rng: &mut R) {
        self.x -= self.speed;
        if self.x <= -self.width {
            self.x = 0.0;
        }

        for detail in &mut self.details {
            detail.x -= self.speed;
            if detail.x <= -detail.width {
                let x = self.width + rng.gen::<f64>() * 100.0;
                *detail = GroundDetail::random(rng, x);
            }
        }
    }
}

impl Entity for Ground {
    fn kind(&self) -> EntityKind {
        EntityKind::Ground
    }

    fn update(&mut self, ctx: &mut GameContext) {
        if !ctx.running {
            return;
        }

        self.speed = ground_speed(self.base_speed, ctx.score);
        self.scroll(&mut ctx.rng);

        ctx.base_speed = self.base_speed;
        ctx.ground_speed = self.speed;
    }

    fn draw(&self, _ctx: &GameContext, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.x, self.y, self.width, self.height, palette::GROUND);
        canvas.fill_rect(
            self.x + self.width,
            self.y,
            self.width,
            self.height,
            palette::GROUND,
        );

        for detail in &self.details {
            for tile_x in [self.x, self.x + self.width] {
                canvas.fill_rect(
                    tile_x + detail.x,
                    self.y - detail.height,
                    detail.width,
                    detail.height,
                    palette::GROUND_DETAIL,
                );
            }
        }
    }

    fn on_restart(&mut self, ctx: &mut GameContext) {
        self.reset_speed();
        ctx.ground_speed = self.speed;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
