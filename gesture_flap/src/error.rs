//! Startup failures.  Everything after startup is absorbed: a missing or
//! stale hand is just "no gesture".

use std::path::PathBuf;

use hand_gesture::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to open window: {0}")]
    Window(#[source] minifb::Error),
    #[error(transparent)]
    Landmarks(#[from] SourceError),
}
