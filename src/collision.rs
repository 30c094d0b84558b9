//! Axis-aligned bounding boxes and the forgiving overlap test.

/// Axis-aligned rectangle in world pixels (x, y = top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Length of the shared span of `[a0, a1)` and `[b0, b1)`; negative when apart.
fn span_overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    a1.min(b1) - a0.max(b0)
}

/// True when the boxes overlap on both axes by at least `2 * buffer`
/// (each box is inset by `buffer` on every edge). Grazes shallower than
/// that do not count; an overlap of exactly `2 * buffer` does. Boxes that
/// merely touch never collide.
pub fn overlaps_with_buffer(a: &Rect, b: &Rect, buffer: f64) -> bool {
    let threshold = 2.0 * buffer;
    let dx = span_overlap(a.x, a.right(), b.x, b.right());
    let dy = span_overlap(a.y, a.bottom(), b.y, b.bottom());
    dx > 0.0 && dy > 0.0 && dx >= threshold && dy >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COLLISION_BUFFER;

    fn player_box() -> Rect {
        Rect::new(100.0, 400.0, 50.0, 50.0)
    }

    #[test]
    fn test_disjoint_boxes() {
        let far = Rect::new(500.0, 400.0, 20.0, 40.0);
        assert!(!overlaps_with_buffer(&player_box(), &far, COLLISION_BUFFER));
    }

    #[test]
    fn test_shallow_horizontal_overlap_is_forgiven() {
        // Obstacle left edge 9.9px inside the player's right edge
        let graze = Rect::new(150.0 - 9.9, 400.0, 20.0, 40.0);
        assert!(!overlaps_with_buffer(&player_box(), &graze, COLLISION_BUFFER));
    }

    #[test]
    fn test_overlap_at_threshold_collides() {
        let hit = Rect::new(150.0 - 10.5, 400.0, 20.0, 40.0);
        assert!(overlaps_with_buffer(&player_box(), &hit, COLLISION_BUFFER));
    }

    #[test]
    fn test_overlap_of_exactly_twice_buffer_collides() {
        // Horizontal: obstacle left edge 10px inside the player's right edge
        let side = Rect::new(140.0, 400.0, 20.0, 40.0);
        assert!(overlaps_with_buffer(&player_box(), &side, COLLISION_BUFFER));

        // Vertical: bird bottom 10px below the player's top
        let above = Rect::new(110.0, 390.0, 40.0, 20.0);
        assert!(overlaps_with_buffer(&player_box(), &above, COLLISION_BUFFER));

        // Both axes at the threshold at once
        let corner = Rect::new(140.0, 440.0, 20.0, 40.0);
        assert!(overlaps_with_buffer(&player_box(), &corner, COLLISION_BUFFER));

        // Just under on either axis
        let short_x = Rect::new(140.001, 440.0, 20.0, 40.0);
        assert!(!overlaps_with_buffer(&player_box(), &short_x, COLLISION_BUFFER));
        let short_y = Rect::new(140.0, 440.001, 20.0, 40.0);
        assert!(!overlaps_with_buffer(&player_box(), &short_y, COLLISION_BUFFER));
    }

    #[test]
    fn test_shallow_vertical_overlap_is_forgiven() {
        // Bird whose bottom dips 8px into the player's top
        let bird = Rect::new(110.0, 400.0 - 20.0 + 8.0, 40.0, 20.0);
        assert!(!overlaps_with_buffer(&player_box(), &bird, COLLISION_BUFFER));

        let bird = Rect::new(110.0, 400.0 - 20.0 + 12.0, 40.0, 20.0);
        assert!(overlaps_with_buffer(&player_box(), &bird, COLLISION_BUFFER));
    }

    #[test]
    fn test_zero_buffer_is_plain_aabb() {
        let touching = Rect::new(150.0, 400.0, 20.0, 40.0);
        assert!(!overlaps_with_buffer(&player_box(), &touching, 0.0));
        let inside = Rect::new(149.0, 400.0, 20.0, 40.0);
        assert!(overlaps_with_buffer(&player_box(), &inside, 0.0));
    }

    #[test]
    fn test_symmetric() {
        let a = player_box();
        let b = Rect::new(130.0, 420.0, 30.0, 60.0);
        assert_eq!(
            overlaps_with_buffer(&a, &b, COLLISION_BUFFER),
            overlaps_with_buffer(&b, &a, COLLISION_BUFFER)
        );
    }
}
