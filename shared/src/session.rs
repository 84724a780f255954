use std::fmt;

use thiserror::Error;

/// Which game and player identity the client is currently bound to.
///
/// The game id is always stored upper-cased; the player name is whatever the
/// server handed back (or the local fallback normalization).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session {
    game_id: String,
    player_name: String,
}

impl Session {
    pub fn new(game_id: impl AsRef<str>, player_name: impl Into<String>) -> Self {
        Self {
            game_id: normalize_game_id(game_id.as_ref()),
            player_name: player_name.into(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.player_name, self.game_id)
    }
}

/// Client-side name normalization, used only when the server omits its own.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

pub fn normalize_game_id(game_id: &str) -> String {
    game_id.trim().to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PlayerName,
    GameId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::PlayerName => f.write_str("player name"),
            Field::GameId => f.write_str("game id"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} must not be empty")]
pub struct ValidationError {
    pub field: Field,
}

/// Returns the trimmed value, or an error naming `field` when nothing is left.
pub fn require_non_blank(field: Field, value: &str) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError { field });
    }
    Ok(trimmed)
}
