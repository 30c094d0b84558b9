//! Background clouds. Cosmetic only.

use crate::canvas::{palette, Canvas};
use crate::constants::*;
use crate::world::{Entity, EntityKind, GameContext};
use rand::Rng;
use std::any::Any;

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    /// Centre of the main puff.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

#[derive(Debug, Clone)]
pub struct CloudManager {
    clouds: Vec<Cloud>,
    spawn_timer: u32,
}

impl CloudManager {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut manager = Self {
            clouds: Vec::new(),
            spawn_timer: 0,
        };
        for i in 0..MIN_CLOUDS {
            manager.create_cloud(rng, Some(100.0 + i as f64 * 300.0));
        }
        manager
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    /// Add a cloud at `x`, or somewhere just past the right edge.
    fn create_cloud<R: Rng>(&mut self, rng: &mut R, x: Option<f64>) {
        let x = x.unwrap_or_else(|| CANVAS_WIDTH + rng.gen::<f64>() * 200.0);
        self.clouds.push(Cloud {
            x,
            y: 50.0 + rng.gen::<f64>() * 150.0,
            width: 60.0 + rng.gen::<f64>() * 40.0,
            height: 20.0 + rng.gen::<f64>() * 15.0,
            // Slower than the ground for parallax
            speed: 1.0 + rng.gen::<f64>() * 2.0,
        });
    }
}

impl Entity for CloudManager {
    fn kind(&self) -> EntityKind {
        EntityKind::CloudManager
    }

    fn update(&mut self, ctx: &mut GameContext) {
        if !ctx.running {
            return;
        }

        self.spawn_timer += 1;
        if self.spawn_timer > CLOUD_SPAWN_FRAMES {
            self.create_cloud(&mut ctx.rng, None);
            self.spawn_timer = 0;
        }

        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
        }
        self.clouds.retain(|c| c.x + c.width >= 0.0);

        if self.clouds.len() < MIN_CLOUDS {
            self.create_cloud(&mut ctx.rng, None);
        }
    }

    fn draw(&self, _ctx: &GameContext, canvas: &mut dyn Canvas) {
        for cloud in &self.clouds {
            let (x, y, w, h) = (cloud.x, cloud.y, cloud.width, cloud.height);
            canvas.fill_ellipse(x, y, w / 2.0, h / 2.0, palette::CLOUD);
            canvas.fill_ellipse(x + w / 3.0, y - h / 4.0, w / 3.0, h / 2.0, palette::CLOUD);
            canvas.fill_ellipse(x + w / 2.0, y, w / 3.0, h / 3.0, palette::CLOUD);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
