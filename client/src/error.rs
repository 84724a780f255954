use std::fmt;

use shared::ValidationError;
use thiserror::Error;

/// Why the server no longer recognises the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// Status endpoint answered 404.
    GameNotFound,
    /// Snapshot says the player is not part of the game (e.g. after a reset).
    PlayerRemoved,
}

impl InvalidationReason {
    /// Text shown to the user when the session is dropped.
    pub fn message(self) -> &'static str {
        match self {
            InvalidationReason::GameNotFound => "The game no longer exists",
            InvalidationReason::PlayerRemoved => "You were disconnected from the game (was it reset?)",
        }
    }
}

impl fmt::Display for InvalidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidationReason::GameNotFound => f.write_str("game not found"),
            InvalidationReason::PlayerRemoved => f.write_str("player removed from game"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error(
        "server rejected request with status {status}: {}",
        .message.as_deref().unwrap_or("no details")
    )]
    Rejected { status: u16, message: Option<String> },

    #[error("session invalidated: {0}")]
    SessionInvalidated(InvalidationReason),

    #[error("not joined to any game")]
    NoSession,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
