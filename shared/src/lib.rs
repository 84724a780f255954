//! Wire types and session identity shared by the lobby client and tools.

pub mod protocol;
pub mod session;

pub use protocol::{
    CreateGameResponse, ErrorBody, GameStatus, JoinRequest, JoinResponse, StartResponse,
    VisibleRow,
};
pub use session::{normalize_game_id, normalize_name, require_non_blank, Field, Session, ValidationError};
