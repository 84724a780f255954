use serde::{Deserialize, Serialize};

// POST /api/games
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateGameResponse {
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// POST /api/games/{id}/join
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub player_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinResponse {
    /// Server-normalized name. Older servers omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// POST /api/games/{id}/start
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StartResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of any non-2xx reply.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// One row of the game board: another player and what they were dealt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    #[serde(rename = "JUGADOR")]
    pub player: String,
    #[serde(rename = "PERSONAJE")]
    pub character: String,
    #[serde(rename = "CONTEXTO")]
    pub context: String,
}

impl VisibleRow {
    pub fn new(
        player: impl Into<String>,
        character: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            player: player.into(),
            character: character.into(),
            context: context.into(),
        }
    }
}

// GET /api/games/{id}/status?player_name=...
//
// Every field defaults so an error-only body still decodes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub is_player_in_game: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_data: Option<Vec<VisibleRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
