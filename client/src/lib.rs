//! Lobby client for the guessing game: join or create a game, keep the local
//! view in sync with the server, and hand every snapshot to a [`View`].

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod poller;
pub mod render;
pub mod screens;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{GameApi, HttpGameApi, StatusReply};
pub use config::{ClientConfig, ServerArgs};
pub use error::{ClientError, InvalidationReason, Result};
pub use notify::{Level, Notification, NotificationBoard};
pub use poller::{PollOutcome, SessionPoller};
pub use render::{render_game, Board, GameView, PlayerBadge, StatusBadge, TableRow, View};
pub use screens::lobby::Lobby;
pub use screens::prompt::{run_prompt, spawn_line_reader, PromptExit};
pub use screens::terminal::{Command, TerminalView};
pub use shared::Session;
