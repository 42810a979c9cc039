//! Error types shared across game modes.
//!
//! Nothing here is fatal to a running game: transition errors are rejected
//! requests, config errors surface at load time, and collaborator errors are
//! always swapped for a fallback before they reach a session.

use thiserror::Error;

/// Session lifecycle states common to every minigame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Running,
    Ended,
}

/// A lifecycle request that is not allowed from the current state.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {action} a session that is {from:?}")]
pub struct TransitionError {
    pub from: SessionState,
    pub action: &'static str,
}

/// Failure reported by (or while talking to) an external text collaborator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("collaborator returned an empty response")]
    EmptyResponse,
    #[error("malformed collaborator response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Configuration could not be parsed or holds unusable values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
