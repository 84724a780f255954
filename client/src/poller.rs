//! Keeps the local view in sync with the server for the current session.
//!
//! At most one poll task exists at a time. Every `start`, `stop` and
//! invalidation bumps an epoch; a tick only applies its result if the epoch it
//! was issued under is still current, so a late reply from a superseded
//! session never touches the view.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::Session;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{GameApi, StatusReply};
use crate::error::{ClientError, InvalidationReason, Result};
use crate::notify::Notification;
use crate::render::{render_game, View};

/// Result of one poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Snapshot handed to the view.
    Rendered,
    /// Request or decode failed; the previous render stays.
    Failed(ClientError),
    /// Server answered with an `error` field; nothing rendered this tick.
    ServerError(String),
    /// Session dropped and the view sent back to login.
    Invalidated(InvalidationReason),
    /// Session changed while the request was in flight; result discarded.
    Stale,
}

#[derive(Default)]
struct PollerState {
    session: Option<Session>,
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl PollerState {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.epoch = self.epoch.wrapping_add(1);
    }
}

struct Inner {
    api: Arc<dyn GameApi>,
    view: Arc<dyn View>,
    interval: Duration,
    state: Mutex<PollerState>,
}

/// Owns the current [`Session`] and the repeating status poll tied to it.
#[derive(Clone)]
pub struct SessionPoller {
    inner: Arc<Inner>,
}

impl SessionPoller {
    pub fn new(api: Arc<dyn GameApi>, view: Arc<dyn View>, interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                view,
                interval,
                state: Mutex::new(PollerState::default()),
            }),
        }
    }

    /// Adopts `session` and starts polling it: one fetch right away, then one
    /// every interval. Any earlier poll is cancelled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, session: Session) {
        let mut state = self.inner.state.lock();
        state.cancel();
        state.session = Some(session.clone());
        let epoch = state.epoch;

        info!("🎮 Polling game {} as {}", session.game_id(), session.player_name());
        self.inner.view.show_game(&session);

        let inner = Arc::clone(&self.inner);
        state.task = Some(tokio::spawn(inner.run(epoch, session)));
    }

    /// Cancels the running poll, if any. The session itself is kept.
    pub fn stop(&self) {
        let mut state = self.inner.state.lock();
        if state.task.is_some() {
            debug!("⏹️ Poller stopped");
        }
        state.cancel();
    }

    /// Stops polling, forgets the session and returns to the login screen.
    /// Returns whether there was a session to drop.
    pub fn logout(&self) -> bool {
        let mut state = self.inner.state.lock();
        state.cancel();
        let had_session = state.session.take().is_some();
        self.inner.view.show_login();
        had_session
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.state.lock().session.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .state
            .lock()
            .task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// One out-of-band tick for the current session.
    pub async fn refresh(&self) -> Result<PollOutcome> {
        let (epoch, session) = {
            let state = self.inner.state.lock();
            let session = state.session.clone().ok_or(ClientError::NoSession)?;
            (state.epoch, session)
        };
        match self.inner.poll_once(epoch, &session).await {
            PollOutcome::Invalidated(reason) => Err(ClientError::SessionInvalidated(reason)),
            outcome => Ok(outcome),
        }
    }
}

impl Inner {
    async fn run(self: Arc<Self>, epoch: u64, session: Session) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.poll_once(epoch, &session).await {
                PollOutcome::Invalidated(_) | PollOutcome::Stale => break,
                _ => {}
            }
        }
        debug!("🛑 Poll task for {} finished", session);
    }

    async fn poll_once(&self, epoch: u64, session: &Session) -> PollOutcome {
        let reply = self.api.game_status(session).await;

        let mut state = self.state.lock();
        if state.epoch != epoch || state.session.as_ref() != Some(session) {
            debug!("🕰️ Discarding status reply for superseded session {}", session);
            return PollOutcome::Stale;
        }

        let status = match reply {
            Err(err) => {
                warn!("⚠️ Status poll for {} failed: {err}", session);
                return PollOutcome::Failed(err);
            }
            Ok(StatusReply::NotFound) => {
                return self.invalidate(&mut state, session, InvalidationReason::GameNotFound);
            }
            Ok(StatusReply::Snapshot(status)) => status,
        };

        if let Some(error) = status.error {
            debug!("Server reported '{error}' for {}; skipping render", session);
            return PollOutcome::ServerError(error);
        }

        if !status.is_player_in_game {
            return self.invalidate(&mut state, session, InvalidationReason::PlayerRemoved);
        }

        let view = render_game(&status, session.player_name());
        debug!(
            "📊 {} players, active={} in {}",
            view.players.len(),
            status.active,
            session.game_id()
        );
        self.view.render(&view);
        PollOutcome::Rendered
    }

    fn invalidate(
        &self,
        state: &mut PollerState,
        session: &Session,
        reason: InvalidationReason,
    ) -> PollOutcome {
        info!("👋 Session {} invalidated: {reason}", session);
        state.cancel();
        state.session = None;
        self.view.notify(Notification::danger(reason.message()));
        self.view.show_login();
        PollOutcome::Invalidated(reason)
    }
}
