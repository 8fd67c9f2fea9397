//! Session lifecycle state.

use hand_gesture::GestureSymbol;

use crate::consts::BASE_OBSTACLE_SPEED;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

impl SessionState {
    pub fn name(self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::Running    => "running",
            SessionState::GameOver   => "game_over",
        }
    }
}

/// Score, speed and the gesture seen on the previous tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub state:          SessionState,
    pub score:          u32,
    /// Horizontal obstacle velocity per tick; negative is leftward.
    pub obstacle_speed: f32,
    pub last_gesture:   GestureSymbol,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            state:          SessionState::NotStarted,
            score:          0,
            obstacle_speed: BASE_OBSTACLE_SPEED,
            last_gesture:   GestureSymbol::None,
        }
    }
}
