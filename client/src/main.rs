use std::io;
use std::sync::Arc;

use adivina_client::{run_prompt, spawn_line_reader, HttpGameApi, Lobby, ServerArgs, TerminalView, View};
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "adivina",
    about = "Terminal client for the multiplayer guessing game lobby"
)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.server.into_config();
    info!("🎮 Adivina client starting against {}", config.server_url);

    let api = Arc::new(HttpGameApi::new(&config)?);
    let view = Arc::new(TerminalView::stdout(config.notification_ttl));
    let lobby = Lobby::new(api, view.clone(), &config);
    view.show_login();

    let mut lines = spawn_line_reader(io::BufReader::new(io::stdin()));
    let exit = run_prompt(&lobby, &mut lines, &mut io::stdout(), tokio::signal::ctrl_c()).await?;

    lobby.poller().stop();
    info!("👋 Bye ({exit:?})");
    Ok(())
}
