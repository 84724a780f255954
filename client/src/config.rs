use std::time::Duration;

use clap::Args;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

// 🎮 Client-side lobby configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,      // "http://localhost:5000"
    pub poll_interval: Duration, // status poll cadence
    pub request_timeout: Duration,
    pub notification_ttl: Duration, // how long a notification stays on screen
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// Connection flags shared by the `adivina` client and the `lobby` helper.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Base URL of the game server (e.g. http://localhost:5000)
    #[arg(long, env = "ADIVINA_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// How often to poll the game status, in milliseconds
    #[arg(long, env = "ADIVINA_POLL_INTERVAL_MS", default_value_t = 2000)]
    pub poll_interval_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, env = "ADIVINA_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,
}

impl ServerArgs {
    pub fn into_config(self) -> ClientConfig {
        ClientConfig {
            server_url: self.server_url,
            // a zero period would make tokio's interval panic
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        server: ServerArgs,
    }

    #[test]
    fn defaults_match_two_second_cadence() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.notification_ttl, Duration::from_secs(5));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "adivina",
            "--server-url",
            "http://games.local:8080",
            "--poll-interval-ms",
            "500",
            "--request-timeout-secs",
            "0",
        ]);
        let config = cli.server.into_config();

        assert_eq!(config.server_url, "http://games.local:8080");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.notification_ttl, DEFAULT_NOTIFICATION_TTL);
    }
}
