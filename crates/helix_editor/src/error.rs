//! Editor error types

use helix_animation::{TrackError, TweenError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by editor transitions and rendering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Selecting or destroying an animation that does not exist
    #[error("animation index {index} is out of range ({len} animations)")]
    InvalidAnimationIndex { index: usize, len: usize },

    #[error("cannot record waypoint: {0}")]
    Track(#[from] TrackError),

    #[error("cannot compute playback position: {0}")]
    Tween(#[from] TweenError),
}

/// Errors raised reading or writing persisted state
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted state is not valid: {0}")]
    Json(#[from] serde_json::Error),

    /// Keys become file names, so they are restricted to a safe alphabet
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// Errors raised loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for editor transitions
pub type Result<T> = std::result::Result<T, EditorError>;
