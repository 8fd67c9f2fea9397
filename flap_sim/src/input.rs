//! Input aggregation: one gesture symbol plus this tick's key presses become
//! a single [`TickInput`].
//!
//! The previous tick's gesture is passed in and the new one handed back, so
//! the caller owns the edge-detection state.
//!
//! | State | Fist edge | Palm (held) | Flap key | Restart key |
//! |---|---|---|---|---|
//! | NotStarted | Flap | — | Flap | — |
//! | Running | Flap | Dive | Flap | — |
//! | GameOver | Restart | — | Restart | Restart |
//!
//! A "fist edge" is the first tick of a fist after any other symbol; holding a
//! fist does nothing further.  In Running a flap from either source wins over
//! a held palm.

use hand_gesture::GestureSymbol;

use crate::session::SessionState;

/// Discrete key presses collected since the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub flap:    bool,
    pub restart: bool,
}

impl KeyInput {
    pub fn flap() -> Self { KeyInput { flap: true, restart: false } }
    pub fn restart() -> Self { KeyInput { flap: false, restart: true } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickInput {
    #[default]
    None,
    Flap,
    Dive,
    Restart,
}

/// Resolve one tick of input.  Returns the action and the gesture to pass as
/// `last` next tick (always `current`).
pub fn aggregate(
    state:   SessionState,
    current: GestureSymbol,
    last:    GestureSymbol,
    keys:    KeyInput,
) -> (TickInput, GestureSymbol) {
    let fist_edge = current == GestureSymbol::Fist && last != GestureSymbol::Fist;

    let input = match state {
        SessionState::GameOver => {
            if fist_edge || keys.flap || keys.restart { TickInput::Restart } else { TickInput::None }
        }
        SessionState::NotStarted => {
            if fist_edge || keys.flap { TickInput::Flap } else { TickInput::None }
        }
        SessionState::Running => {
            if fist_edge || keys.flap {
                TickInput::Flap
            } else if current == GestureSymbol::Palm {
                TickInput::Dive
            } else {
                TickInput::None
            }
        }
    };

    (input, current)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
