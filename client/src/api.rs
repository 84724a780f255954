use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Response, StatusCode, Url};
use shared::{
    CreateGameResponse, ErrorBody, GameStatus, JoinRequest, JoinResponse, Session, StartResponse,
};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// What the status endpoint said about a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReply {
    /// 404: the game is gone.
    NotFound,
    Snapshot(GameStatus),
}

/// The four game server endpoints the client talks to.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn create_game(&self) -> Result<CreateGameResponse>;

    async fn join_game(&self, game_id: &str, player_name: &str) -> Result<JoinResponse>;

    async fn start_game(&self, game_id: &str) -> Result<()>;

    async fn game_status(&self, session: &Session) -> Result<StatusReply>;
}

/// [`GameApi`] over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    http: reqwest::Client,
    base: Url,
}

impl HttpGameApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.server_url).map_err(|e| {
            ClientError::Transport(format!("invalid server url {}: {e}", config.server_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Transport(format!(
                "server url {} cannot carry a path",
                config.server_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, base })
    }

    // Builds {base}/api/games/{segments...}; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::Transport(format!("server url {} cannot carry a path", self.base))
            })?;
            path.pop_if_empty().push("api").push("games").extend(segments);
        }
        Ok(url)
    }
}

// Turns a non-2xx response into a rejection, keeping the server's `error` text.
async fn rejection(resp: Response) -> ClientError {
    let status = resp.status().as_u16();
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);
    ClientError::Rejected { status, message }
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn create_game(&self) -> Result<CreateGameResponse> {
        let url = self.endpoint(&[])?;
        let resp = self.http.post(url).send().await?;
        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        let created: CreateGameResponse = resp.json().await?;
        debug!("🏠 Server created game {}", created.game_id);
        Ok(created)
    }

    async fn join_game(&self, game_id: &str, player_name: &str) -> Result<JoinResponse> {
        let url = self.endpoint(&[game_id, "join"])?;
        let resp = self
            .http
            .post(url)
            .json(&JoinRequest {
                player_name: player_name.to_string(),
            })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn start_game(&self, game_id: &str) -> Result<()> {
        let url = self.endpoint(&[game_id, "start"])?;
        let resp = self.http.post(url).send().await?;
        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }
        // body is informational only
        if let Ok(StartResponse { message: Some(message) }) = resp.json::<StartResponse>().await {
            debug!("🚀 {game_id}: {message}");
        }
        Ok(())
    }

    async fn game_status(&self, session: &Session) -> Result<StatusReply> {
        let url = self.endpoint(&[session.game_id(), "status"])?;
        let resp = self
            .http
            .get(url)
            .query(&[("player_name", session.player_name())])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(StatusReply::NotFound),
            status if status.is_success() => Ok(StatusReply::Snapshot(resp.json().await?)),
            _ => Err(rejection(resp).await),
        }
    }
}
