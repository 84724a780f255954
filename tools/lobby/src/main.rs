use std::sync::Arc;
use std::time::Duration;

use adivina_client::{
    GameApi, HttpGameApi, ServerArgs, SessionPoller, StatusReply, TerminalView,
};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::{normalize_name, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "lobby",
    about = "Scripted helper for the guessing game server"
)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new game and print its id
    Create,
    /// Join a game by id
    Join {
        #[arg(long)]
        game_id: String,
        #[arg(long)]
        name: String,
    },
    /// Deal characters for a game (needs 2+ players)
    Start {
        #[arg(long)]
        game_id: String,
    },
    /// Fetch one status snapshot as seen by a player
    Status {
        #[arg(long)]
        game_id: String,
        #[arg(long)]
        name: String,
    },
    /// Follow a game as a player until Ctrl-C or until the session ends
    Watch {
        #[arg(long)]
        game_id: String,
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.server.into_config();
    let api = Arc::new(HttpGameApi::new(&config)?);

    match cli.command {
        Commands::Create => {
            let res = api.create_game().await?;
            println!("{}", serde_json::to_string_pretty(&res)?);
        }
        Commands::Join { game_id, name } => {
            let res = api.join_game(game_id.trim(), name.trim()).await?;
            println!("{}", serde_json::to_string_pretty(&res)?);
        }
        Commands::Start { game_id } => {
            api.start_game(game_id.trim()).await?;
            println!("started {}", game_id.trim().to_uppercase());
        }
        Commands::Status { game_id, name } => {
            let session = Session::new(&game_id, normalize_name(&name));
            match api.game_status(&session).await? {
                StatusReply::Snapshot(status) => {
                    println!("{}", serde_json::to_string_pretty(&status)?)
                }
                StatusReply::NotFound => bail!("game {} not found", session.game_id()),
            }
        }
        Commands::Watch { game_id, name } => {
            let session = Session::new(&game_id, normalize_name(&name));
            let view = Arc::new(TerminalView::stdout(config.notification_ttl));
            let poller = SessionPoller::new(api, view, config.poll_interval);

            info!("👀 Watching {}", session);
            poller.start(session);
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = wait_until_stopped(&poller) => {}
            }
            poller.stop();
        }
    }

    Ok(())
}

async fn wait_until_stopped(poller: &SessionPoller) {
    let mut check = tokio::time::interval(Duration::from_millis(250));
    loop {
        check.tick().await;
        if !poller.is_running() {
            return;
        }
    }
}
