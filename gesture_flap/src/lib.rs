//! # gesture_flap
//!
//! A flappy-style game steered by hand gestures.
//!
//! ## Gestures (camera)
//!
//! | Gesture | Not started | Running | Game over |
//! |---|---|---|---|
//! | Fist (on closing) | start + flap | flap | restart |
//! | Open palm (held) | — | dive | — |
//!
//! ## Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `Space` | flap / start; restart on the game-over screen |
//! | `R` | restart (game over only) |
//! | `F` (held) | simulated fist |
//! | `P` (held) | simulated open palm |
//! | `Esc` / `Q` | quit |
//!
//! Hand landmarks come from an external detector process speaking one JSON
//! object per line on stdout (see [`hand_gesture::source`]).  Without one the
//! game is fully playable from the keyboard.

pub mod error;
pub mod config;
pub mod visualizer;
pub mod app;

pub use app::{run, run_loop, Controls, Frontend, Hud, LoopStats, SimPose};
pub use config::{AppConfig, Overrides};
pub use error::StartupError;
