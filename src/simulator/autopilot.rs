//! Scripted player: jumps cacti, ducks low birds.

use crate::constants::{COLLISION_BUFFER, GROUND_Y, PLAYER_WIDTH, PLAYER_X};
use crate::entities::{Obstacle, ObstacleKind, Player};
use crate::input::{Key, KeyState};
use crate::world::World;

/// Frames of warning before a cactus reaches the player.
const JUMP_LEAD_FRAMES: f64 = 6.0;
/// Frames of warning before a bird reaches the player.
const DUCK_LEAD_FRAMES: f64 = 10.0;

/// What to hold down this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Steer {
    pub jump: bool,
    pub duck: bool,
}

impl Steer {
    pub fn apply(&self, keys: &mut KeyState) {
        keys.set(Key::Space, self.jump);
        keys.set(Key::ArrowDown, self.duck);
    }
}

/// True if a bird at this height would clip a standing player.
fn bird_is_low(bird: &Obstacle) -> bool {
    // Contact needs the bottom past GROUND_Y + 10; the margin covers the bob
    bird.y + bird.height > GROUND_Y
}

/// Frames until `obstacle` first touches the player's hitbox, or `None`
/// once it has gone past.
fn frames_until_contact(obstacle: &Obstacle, speed: f64) -> Option<f64> {
    let contact_x = PLAYER_X + PLAYER_WIDTH - COLLISION_BUFFER * 2.0;
    let passed_x = PLAYER_X + COLLISION_BUFFER * 2.0;
    if obstacle.x + obstacle.width < passed_x {
        return None;
    }
    Some(((obstacle.x - contact_x) / speed.max(f64::EPSILON)).max(0.0))
}

/// Decide the keys for the coming frame from the current world state.
pub fn steer(world: &World) -> Steer {
    let Some(player) = world.find::<Player>() else {
        return Steer::default();
    };
    let speed = world.ctx().ground_speed;

    let nearest = world
        .find_all::<Obstacle>()
        .into_iter()
        .filter_map(|o| frames_until_contact(o, speed).map(|f| (o, f)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((obstacle, frames)) = nearest else {
        return Steer::default();
    };

    match obstacle.kind {
        ObstacleKind::Bird => Steer {
            jump: false,
            duck: bird_is_low(obstacle) && frames <= DUCK_LEAD_FRAMES,
        },
        ObstacleKind::SmallCactus | ObstacleKind::LargeCactus => Steer {
            jump: frames <= JUMP_LEAD_FRAMES && player.is_on_ground(),
            duck: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_timing() {
        let cactus = Obstacle::at(ObstacleKind::SmallCactus, 240.0, GROUND_Y);
        assert_eq!(frames_until_contact(&cactus, 10.0), Some(10.0));

        let passed = Obstacle::at(ObstacleKind::SmallCactus, 80.0, GROUND_Y);
        assert_eq!(frames_until_contact(&passed, 10.0), None);
    }

    #[test]
    fn test_only_low_birds_need_ducking() {
        let high = Obstacle::at(ObstacleKind::Bird, 300.0, 320.0);
        let low = Obstacle::at(ObstacleKind::Bird, 300.0, 390.0);
        assert!(!bird_is_low(&high));
        assert!(bird_is_low(&low));
    }

    #[test]
    fn test_steer_applies_keys() {
        let mut keys = KeyState::new();
        Steer {
            jump: true,
            duck: false,
        }
        .apply(&mut keys);
        assert!(keys.jump_pressed());
        assert!(!keys.duck_pressed());

        Steer::default().apply(&mut keys);
        assert!(!keys.jump_pressed());
    }
}
