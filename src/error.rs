//! Error taxonomy
//!
//! Construction and configuration failures are returned as `TennisError`.
//! Contract violations inside the simulation (stepping a finished episode,
//! malformed rectangles) are programming errors and panic instead.

use thiserror::Error;

use crate::render::Backend;

#[derive(Error, Debug)]
pub enum TennisError {
    #[error("unknown renderer backend: {0:?} (expected \"vector\" or \"gpu\")")]
    UnknownBackend(String),

    #[error("renderer backend '{backend}' is not installed (rebuild with the `{backend}` feature)")]
    BackendNotInstalled { backend: Backend },

    #[error("no graphics capability available in this environment: {0}")]
    NoGraphicsCapability(String),

    #[error("invalid player: {0} (expected 1 or 2)")]
    InvalidPlayer(u8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("action has {found} buttons, expected {expected}")]
    ActionLength { expected: usize, found: usize },

    #[error("got {found} actions, expected {expected}")]
    ActionCount { expected: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TennisError {
    /// Whether the error comes from the rendering backend rather than the caller
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            TennisError::BackendNotInstalled { .. } | TennisError::NoGraphicsCapability(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TennisError>;
