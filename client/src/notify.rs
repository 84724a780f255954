use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::DEFAULT_NOTIFICATION_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Danger,
    Warning,
    Info,
    Success,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Level::Danger => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Success => "ok",
        };
        f.write_str(tag)
    }
}

/// A short, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Level::Danger, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Notifications currently on screen. Entries drop off on their own once
/// they are older than `ttl`.
#[derive(Debug)]
pub struct NotificationBoard {
    ttl: Duration,
    entries: Vec<Notification>,
}

impl Default for NotificationBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Vec::new(),
        }
    }

    /// Adds `notification`, dropping anything that has already expired.
    pub fn push(&mut self, notification: Notification) {
        let now = Instant::now();
        self.prune(now);
        self.entries.push(notification);
    }

    /// Prunes expired entries and returns the rest, oldest first.
    pub fn active(&mut self, now: Instant) -> Vec<&Notification> {
        self.prune(now);
        self.entries.iter().collect()
    }

    fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
    }
}
