use std::sync::Arc;

use shared::{normalize_name, require_non_blank, Field, Session};
use tracing::{debug, info, warn};

use crate::api::GameApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::notify::Notification;
use crate::poller::{PollOutcome, SessionPoller};
use crate::render::View;

const ENTER_NAME: &str = "Please enter your name";
const ENTER_GAME_ID: &str = "Please enter the game ID";
const CONNECTION_ERROR: &str = "Connection error";

// 🏠 Lobby actions: create, join, start, leave
pub struct Lobby {
    api: Arc<dyn GameApi>,
    view: Arc<dyn View>,
    poller: SessionPoller,
}

impl Lobby {
    pub fn new(api: Arc<dyn GameApi>, view: Arc<dyn View>, config: &ClientConfig) -> Self {
        let poller = SessionPoller::new(Arc::clone(&api), Arc::clone(&view), config.poll_interval);
        Self { api, view, poller }
    }

    pub fn poller(&self) -> &SessionPoller {
        &self.poller
    }

    pub fn session(&self) -> Option<Session> {
        self.poller.session()
    }

    /// Asks the server for a fresh game and joins it as `name`.
    pub async fn create(&self, name: &str) -> Result<Session> {
        let name = self.require(Field::PlayerName, name)?;

        let created = match self.api.create_game().await {
            Ok(created) => created,
            Err(err) => {
                self.report(&err, "Error creating game");
                return Err(err);
            }
        };
        info!("🏠 Created game {}", created.game_id);
        self.join_checked(&created.game_id, name).await
    }

    /// Joins an existing game; on success the poller takes over the session.
    pub async fn join(&self, game_id: &str, name: &str) -> Result<Session> {
        let name = self.require(Field::PlayerName, name)?;
        let game_id = self.require(Field::GameId, game_id)?;
        self.join_checked(game_id, name).await
    }

    /// Asks the server to deal characters. Returns `Ok(false)` when not in a
    /// game, in which case nothing is sent.
    pub async fn start_game(&self) -> Result<bool> {
        let Some(session) = self.poller.session() else {
            debug!("Start requested without a session");
            return Ok(false);
        };
        match self.api.start_game(session.game_id()).await {
            Ok(()) => {
                info!("🚀 Start requested for game {}", session.game_id());
                Ok(true)
            }
            Err(err) => {
                self.report(&err, "Could not start the game");
                Err(err)
            }
        }
    }

    /// Local logout. The server keeps the player listed.
    pub fn leave(&self) -> bool {
        let left = self.poller.logout();
        if left {
            info!("🚪 Left the game");
            self.view.notify(Notification::info("You left the game"));
        }
        left
    }

    pub async fn refresh(&self) -> Result<PollOutcome> {
        self.poller.refresh().await
    }

    fn require<'a>(&self, field: Field, value: &'a str) -> Result<&'a str> {
        require_non_blank(field, value).map_err(|err| {
            let message = match field {
                Field::PlayerName => ENTER_NAME,
                Field::GameId => ENTER_GAME_ID,
            };
            self.view.notify(Notification::warning(message));
            ClientError::from(err)
        })
    }

    // `game_id` and `name` are already trimmed and non-empty.
    async fn join_checked(&self, game_id: &str, name: &str) -> Result<Session> {
        let joined = match self.api.join_game(game_id, name).await {
            Ok(joined) => joined,
            Err(err) => {
                self.report(&err, "Error joining game");
                return Err(err);
            }
        };

        let player_name = joined
            .player_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| normalize_name(name));
        let session = Session::new(game_id, player_name);
        info!("🎮 Joined game {} as {}", session.game_id(), session.player_name());
        self.poller.start(session.clone());
        Ok(session)
    }

    fn report(&self, err: &ClientError, fallback: &str) {
        let message = match err {
            ClientError::Rejected { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            ClientError::Transport(_) => CONNECTION_ERROR.to_string(),
            other => other.to_string(),
        };
        warn!("❌ {fallback}: {err}");
        self.view.notify(Notification::danger(message));
    }
}
