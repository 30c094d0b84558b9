//! Cacti and birds: scroll at ground speed, end the run on contact.

use crate::canvas::{palette, Canvas, Rgba};
use crate::collision::{overlaps_with_buffer, Rect};
use crate::constants::*;
use crate::events::GameEvent;
use crate::world::{Entity, EntityKind, GameContext};
use rand::Rng;
use std::any::Any;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    SmallCactus,
    LargeCactus,
    Bird,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::SmallCactus,
        ObstacleKind::LargeCactus,
        ObstacleKind::Bird,
    ];

    pub fn width(&self) -> f64 {
        match self {
            Self::SmallCactus => 20.0,
            Self::LargeCactus => 30.0,
            Self::Bird => 40.0,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Self::SmallCactus => 40.0,
            Self::LargeCactus => 60.0,
            Self::Bird => 20.0,
        }
    }

    pub fn color(&self) -> Rgba {
        match self {
            Self::SmallCactus => palette::SMALL_CACTUS,
            Self::LargeCactus => palette::LARGE_CACTUS,
            Self::Bird => palette::BIRD,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SmallCactus => "small-cactus",
            Self::LargeCactus => "large-cactus",
            Self::Bird => "bird",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Copied from the ground every frame.
    pub speed: f64,
    pub wing_up: bool,
    frame_count: u32,
    remove: bool,
}

impl Obstacle {
    /// Ground obstacles hang from the ground line; birds pick a random
    /// altitude in [300, 400).
    pub fn new<R: Rng>(kind: ObstacleKind, x: f64, rng: &mut R) -> Self {
        let y = match kind {
            ObstacleKind::Bird => BIRD_MIN_Y + rng.gen::<f64>() * BIRD_Y_RANGE,
            _ => GROUND_Y,
        };
        Self::at(kind, x, y)
    }

    /// Place an obstacle at an exact position.
    pub fn at(kind: ObstacleKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width: kind.width(),
            height: kind.height(),
            speed: DEFAULT_BASE_SPEED,
            wing_up: true,
            frame_count: 0,
            remove: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn collides_with(&self, other: &Rect) -> bool {
        overlaps_with_buffer(&self.bounds(), other, COLLISION_BUFFER)
    }

    fn animate_bird(&mut self) {
        self.frame_count += 1;
        if self.frame_count >= BIRD_WING_FRAMES {
            self.wing_up = !self.wing_up;
            self.frame_count = 0;
        }
        self.y += (self.x / BIRD_BOB_PERIOD).sin() * BIRD_BOB_AMPLITUDE;
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }

    fn update(&mut self, ctx: &mut GameContext) {
        if !ctx.running {
            return;
        }

        self.speed = ctx.ground_speed;
        self.x -= self.speed;

        // Right edge at or past the left boundary
        if self.x + self.width <= 0.0 {
            self.remove = true;
            return;
        }

        if self.kind == ObstacleKind::Bird {
            self.animate_bird();
        }

        let Some(player) = ctx.player else {
            return;
        };
        if !player.invincible && self.collides_with(&player.bounds) {
            info!(obstacle = self.kind.name(), score = ctx.score.floor(), "game over");
            ctx.running = false;
            ctx.emit(GameEvent::Collided);
        }
    }

    fn draw(&self, ctx: &GameContext, canvas: &mut dyn Canvas) {
        let color = self.kind.color();
        canvas.fill_rect(self.x, self.y, self.width, self.height, color);

        match self.kind {
            ObstacleKind::Bird => {
                let wing_y = if self.wing_up {
                    self.y - 10.0
                } else {
                    self.y + self.height
                };
                canvas.fill_rect(self.x + 5.0, wing_y, 30.0, 5.0, color);
            }
            ObstacleKind::SmallCactus => {
                canvas.fill_rect(self.x - 5.0, self.y + 10.0, 10.0, 5.0, color);
            }
            ObstacleKind::LargeCactus => {
                canvas.fill_rect(self.x - 8.0, self.y + 15.0, 15.0, 7.0, color);
                canvas.fill_rect(self.x + self.width - 7.0, self.y + 30.0, 15.0, 7.0, color);
            }
        }

        if ctx.debug_hitboxes {
            canvas.stroke_rect(self.x, self.y, self.width, self.height, palette::HITBOX);
        }
    }

    fn is_removed(&self) -> bool {
        self.remove
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
