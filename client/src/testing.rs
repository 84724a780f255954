use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{CreateGameResponse, GameStatus, JoinResponse, Session};
use tokio::sync::Notify;

use crate::api::{GameApi, StatusReply};
use crate::error::{ClientError, Result};
use crate::notify::{Level, Notification};
use crate::render::{GameView, View};

pub(crate) fn in_game(players: &[&str]) -> GameStatus {
    GameStatus {
        players: players.iter().map(|p| p.to_string()).collect(),
        is_player_in_game: true,
        ..GameStatus::default()
    }
}

/// Scripted [`GameApi`]. Status replies are served in order; once the queue
/// is empty every poll gets `fallback`.
pub(crate) struct ScriptedApi {
    status_calls: AtomicUsize,
    other_calls: AtomicUsize,
    statuses: Mutex<VecDeque<Result<StatusReply>>>,
    fallback: Mutex<Result<StatusReply>>,
    create: Mutex<Result<CreateGameResponse>>,
    join: Mutex<Result<JoinResponse>>,
    start: Mutex<Result<()>>,
    // Held calls park on these until released; each gate catches one call.
    status_gate: Mutex<Option<Arc<Notify>>>,
    create_gate: Mutex<Option<Arc<Notify>>>,
    pub(crate) polled: Mutex<Vec<Session>>,
    pub(crate) requests: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self {
            status_calls: AtomicUsize::new(0),
            other_calls: AtomicUsize::new(0),
            statuses: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Ok(StatusReply::Snapshot(in_game(&["ANA"])))),
            create: Mutex::new(Ok(CreateGameResponse {
                game_id: "NEW123".into(),
                message: None,
            })),
            join: Mutex::new(Ok(JoinResponse::default())),
            start: Mutex::new(Ok(())),
            status_gate: Mutex::new(None),
            create_gate: Mutex::new(None),
            polled: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn queue_status(&self, reply: Result<StatusReply>) -> &Self {
        self.statuses.lock().push_back(reply);
        self
    }

    pub(crate) fn set_fallback(&self, reply: Result<StatusReply>) {
        *self.fallback.lock() = reply;
    }

    pub(crate) fn set_create(&self, reply: Result<CreateGameResponse>) {
        *self.create.lock() = reply;
    }

    pub(crate) fn set_join(&self, reply: Result<JoinResponse>) {
        *self.join.lock() = reply;
    }

    pub(crate) fn set_start(&self, reply: Result<()>) {
        *self.start.lock() = reply;
    }

    /// The next status call picks its reply, then waits until the returned
    /// gate is notified.
    pub(crate) fn hold_next_status(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.status_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub(crate) fn hold_next_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub(crate) fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Calls to anything but the status endpoint.
    pub(crate) fn other_calls(&self) -> usize {
        self.other_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameApi for ScriptedApi {
    async fn create_game(&self) -> Result<CreateGameResponse> {
        self.other_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push("create".into());
        let gate = self.create_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.create.lock().clone()
    }

    async fn join_game(&self, game_id: &str, player_name: &str) -> Result<JoinResponse> {
        self.other_calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .push(format!("join {game_id} {player_name}"));
        self.join.lock().clone()
    }

    async fn start_game(&self, game_id: &str) -> Result<()> {
        self.other_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(format!("start {game_id}"));
        self.start.lock().clone()
    }

    async fn game_status(&self, session: &Session) -> Result<StatusReply> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.polled.lock().push(session.clone());
        let queued = self.statuses.lock().pop_front();
        let reply = queued.unwrap_or_else(|| self.fallback.lock().clone());
        let gate = self.status_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        reply
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewEvent {
    ShowLogin,
    ShowGame(Session),
    Render(GameView),
    Notify(Level, String),
}

/// [`View`] that records every call.
#[derive(Default)]
pub(crate) struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }

    pub(crate) fn renders(&self) -> Vec<GameView> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Render(view) => Some(view.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn notifications(&self) -> Vec<(Level, String)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Notify(level, message) => Some((*level, message.clone())),
                _ => None,
            })
            .collect()
    }
}

impl View for RecordingView {
    fn show_login(&self) {
        self.events.lock().push(ViewEvent::ShowLogin);
    }

    fn show_game(&self, session: &Session) {
        self.events.lock().push(ViewEvent::ShowGame(session.clone()));
    }

    fn render(&self, view: &GameView) {
        self.events.lock().push(ViewEvent::Render(view.clone()));
    }

    fn notify(&self, notification: Notification) {
        self.events
            .lock()
            .push(ViewEvent::Notify(notification.level, notification.message));
    }
}

pub(crate) fn transport_error() -> ClientError {
    ClientError::Transport("connection refused".into())
}
