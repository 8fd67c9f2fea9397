//! The flyer and the obstacle pairs.
//!
//! Both are plain data with small deterministic update rules; the
//! [`Simulation`](crate::simulation::Simulation) decides when each rule runs.

use crate::consts::*;
use crate::geometry::Aabb;

// ════════════════════════════════════════════════════════════════════════════
// Flyer
// ════════════════════════════════════════════════════════════════════════════

/// The player.  `x`/`y` are the top-left corner of its bounding box; only
/// `y` ever changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Flyer {
    pub x:        f32,
    pub y:        f32,
    pub velocity: f32,
}

impl Flyer {
    /// Centred at a quarter of the way across, half way down.
    pub fn spawn() -> Self {
        Flyer {
            x:        (SCREEN_WIDTH / 4.0 - (FLYER_WIDTH / 2.0).floor()).floor(),
            y:        (SCREEN_HEIGHT / 2.0 - (FLYER_HEIGHT / 2.0).floor()).floor(),
            velocity: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, FLYER_WIDTH, FLYER_HEIGHT)
    }

    pub fn flap(&mut self) { self.velocity = FLAP_STRENGTH; }

    /// Overrides the velocity; holding a dive gives constant-speed descent.
    pub fn dive(&mut self) { self.velocity = DIVE_STRENGTH; }

    /// Accelerate, then move by the whole-pixel part of the velocity.
    pub fn fall(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity.trunc();
    }

    /// Stop at the ceiling.
    pub fn clamp_to_ceiling(&mut self) {
        if self.y <= 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Obstacle
// ════════════════════════════════════════════════════════════════════════════

/// A top/bottom barrier pair sharing one gap.
///
/// The top segment spans `0..gap_top`, the bottom segment
/// `gap_bottom..SCREEN_HEIGHT`.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x:          f32,
    pub gap_top:    f32,
    pub gap_bottom: f32,
    passed:         bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Obstacle { x, gap_top, gap_bottom: gap_top + GAP, passed: false }
    }

    pub fn top_bounds(&self) -> Aabb {
        Aabb::new(self.x, 0.0, OBSTACLE_WIDTH, self.gap_top)
    }

    pub fn bottom_bounds(&self) -> Aabb {
        Aabb::new(self.x, self.gap_bottom, OBSTACLE_WIDTH, SCREEN_HEIGHT - self.gap_bottom)
    }

    pub fn center_x(&self) -> f32 { self.x + OBSTACLE_WIDTH / 2.0 }

    pub fn right(&self) -> f32 { self.x + OBSTACLE_WIDTH }

    pub fn advance(&mut self, dx: f32) { self.x += dx; }

    pub fn passed(&self) -> bool { self.passed }

    /// Once passed, always passed.
    pub fn mark_passed(&mut self) { self.passed = true; }

    pub fn is_off_screen(&self) -> bool { self.right() <= 0.0 }

    pub fn collides(&self, other: &Aabb) -> bool {
        self.top_bounds().intersects(other) || self.bottom_bounds().intersects(other)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flyer_spawns_centred_in_left_quarter() {
        let f = Flyer::spawn();
        assert_eq!((f.x, f.y), (100.0, 352.0));
        assert_eq!(f.velocity, 0.0);
    }

    #[test]
    fn fall_accumulates_and_truncates() {
        let mut f = Flyer::spawn();
        f.fall();
        assert_eq!(f.velocity, 1.5);
        assert_eq!(f.y, 353.0);
        f.fall();
        assert_eq!(f.velocity, 3.0);
        assert_eq!(f.y, 356.0);
    }

    #[test]
    fn flap_then_fall_rises() {
        let mut f = Flyer::spawn();
        f.flap();
        f.fall();
        assert_eq!(f.velocity, -9.5);
        assert_eq!(f.y, 352.0 - 9.0);
    }

    #[test]
    fn held_dive_is_constant_speed() {
        let mut f = Flyer::spawn();
        let mut steps = Vec::new();
        for _ in 0..4 {
            let before = f.y;
            f.dive();
            f.fall();
            steps.push(f.y - before);
        }
        assert!(steps.iter().all(|&d| d == 4.0));
    }

    #[test]
    fn ceiling_clamp_zeroes_velocity() {
        let mut f = Flyer { x: 100.0, y: -7.0, velocity: -9.5 };
        f.clamp_to_ceiling();
        assert_eq!((f.y, f.velocity), (0.0, 0.0));
    }

    #[test]
    fn obstacle_segments_frame_the_gap() {
        let o = Obstacle::new(500.0, 200.0);
        assert_eq!(o.top_bounds().bottom(), 200.0);
        assert_eq!(o.bottom_bounds().top(), 350.0);
        assert_eq!(o.bottom_bounds().bottom(), SCREEN_HEIGHT);
    }

    #[test]
    fn flyer_in_gap_does_not_collide() {
        let o = Obstacle::new(90.0, 320.0);
        assert!(!o.collides(&Flyer::spawn().bounds()));
        let o = Obstacle::new(90.0, 100.0);
        assert!(o.collides(&Flyer::spawn().bounds()));
    }

    #[test]
    fn off_screen_once_right_edge_reaches_zero() {
        let mut o = Obstacle::new(0.0, 200.0);
        assert!(!o.is_off_screen());
        o.advance(-OBSTACLE_WIDTH);
        assert!(o.is_off_screen());
    }
}
