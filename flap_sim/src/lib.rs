//! # flap_sim
//!
//! The side-scrolling flyer game as a pure, deterministic state machine.
//! No window, no clock, no camera: callers hand in one [`FrameInput`] and a
//! simulated `dt` per tick and read the resulting state back.
//!
//! ## Controls → actions
//!
//! | Input | NotStarted | Running | GameOver |
//! |---|---|---|---|
//! | Fist (edge) | start + flap | flap | restart |
//! | Palm (held) | — | dive | — |
//! | Flap key | start + flap | flap | restart |
//! | Restart key | — | — | restart |
//!
//! ## Quick start
//!
//! ```rust
//! use flap_sim::{FrameInput, KeyInput, SessionState, Simulation, TICK};
//!
//! let mut sim = Simulation::with_seed(1);
//! sim.tick(FrameInput::keys(KeyInput::flap()), TICK);
//! assert_eq!(sim.state(), SessionState::Running);
//! ```

pub mod consts;
pub mod geometry;
pub mod entity;
pub mod session;
pub mod input;
pub mod timer;
pub mod simulation;

pub use consts::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK, TICK_RATE};
pub use geometry::Aabb;
pub use entity::{Flyer, Obstacle};
pub use session::{GameSession, SessionState};
pub use input::{aggregate, KeyInput, TickInput};
pub use timer::SpawnTimer;
pub use simulation::{Collision, FrameInput, SimEvent, Simulation, TickReport};
