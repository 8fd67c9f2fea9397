//! Application configuration.
//!
//! Read from an optional TOML file, then overridden field-by-field from the
//! command line.  Every key is optional; unknown keys are an error so typos
//! surface at startup.
//!
//! ```toml
//! window_scale     = 2
//! landmark_command = ["python3", "tools/hand_landmarks.py"]
//! stale_after_ms   = 250
//! seed             = 42
//! log_filter       = "gesture_flap=debug,info"
//! show_gesture_hud = true
//! ```
//!
//! Physics and difficulty are fixed and deliberately not configurable here.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Window magnification: 1, 2 or 4.
    pub window_scale:     u8,
    /// Detector helper to spawn, as argv.  Empty means keyboard simulation only.
    pub landmark_command: Vec<String>,
    /// A hand frame older than this counts as no hand.
    pub stale_after_ms:   u64,
    /// Obstacle RNG seed; drawn from OS entropy when absent.
    pub seed:             Option<u64>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter:       String,
    /// Draw the gesture indicator and hand skeleton inset.
    pub show_gesture_hud: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            window_scale:     1,
            landmark_command: Vec::new(),
            stale_after_ms:   hand_gesture::DEFAULT_STALE_AFTER.as_millis() as u64,
            seed:             None,
            log_filter:       "info".to_string(),
            show_gesture_hud: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub landmark_command: Option<Vec<String>>,
    pub seed:             Option<u64>,
    pub window_scale:     Option<u8>,
    pub no_camera:        bool,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = AppConfig::from_toml_str(&text).map_err(|source| StartupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, StartupError> {
        match path {
            Some(p) => AppConfig::load(p),
            None    => Ok(AppConfig::default()),
        }
    }

    pub fn apply(mut self, o: Overrides) -> Self {
        if let Some(cmd) = o.landmark_command { self.landmark_command = cmd; }
        if let Some(seed) = o.seed { self.seed = Some(seed); }
        if let Some(scale) = o.window_scale { self.window_scale = scale; }
        if o.no_camera { self.landmark_command.clear(); }
        self
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }

    pub fn camera_enabled(&self) -> bool {
        !self.landmark_command.is_empty()
    }
}
