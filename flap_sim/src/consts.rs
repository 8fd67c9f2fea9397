//! Fixed world constants.  Units are pixels and ticks unless noted.

use std::time::Duration;

pub const SCREEN_WIDTH:  f32 = 500.0;
pub const SCREEN_HEIGHT: f32 = 740.0;

// ── Flyer ────────────────────────────────────────────────────────────────
pub const FLYER_WIDTH:   f32 = 51.0;
pub const FLYER_HEIGHT:  f32 = 36.0;
/// Added to the flyer's velocity every running tick.
pub const GRAVITY:       f32 = 1.5;
/// Velocity set by a flap (negative is up).
pub const FLAP_STRENGTH: f32 = -11.0;
/// Velocity set by every tick of an open palm.
pub const DIVE_STRENGTH: f32 = 3.0;

// ── Obstacles ────────────────────────────────────────────────────────────
pub const OBSTACLE_WIDTH:      f32 = 80.0;
pub const GAP:                 f32 = 150.0;
pub const MIN_SEGMENT_HEIGHT:  u32 = 100;
pub const BASE_OBSTACLE_SPEED: f32 = -6.0;
/// Speed magnitude added each time the ramp triggers.
pub const SPEED_STEP:          f32 = 0.5;
/// The ramp triggers every this many points.
pub const SPEED_INCREASE_INTERVAL: u32 = 5;
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(2500);

// ── Loop ─────────────────────────────────────────────────────────────────
pub const TICK_RATE: u32 = 60;
/// One simulated tick.  Rounded up so that 150 ticks cover 2.5 s exactly.
pub const TICK: Duration = Duration::from_nanos(16_666_667);
