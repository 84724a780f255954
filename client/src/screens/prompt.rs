use std::future::Future;
use std::io::{self, BufRead, Write};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::poller::PollOutcome;
use crate::screens::lobby::Lobby;
use crate::screens::terminal::Command;

const LINE_BUFFER: usize = 16;

/// Why the prompt loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptExit {
    Quit,
    EndOfInput,
    Interrupted,
}

/// Reads `input` line by line on its own OS thread and forwards each line.
///
/// The thread is detached: a read blocked on a terminal never holds up
/// runtime shutdown. The channel closes once input ends or the receiver is
/// dropped.
pub fn spawn_line_reader<R>(input: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    let spawned = thread::Builder::new()
        .name("prompt-reader".into())
        .spawn(move || {
            for line in input.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        });
    if let Err(err) = spawned {
        warn!("⚠️ Could not start the input reader: {err}");
    }
    rx
}

/// Runs prompt commands against `lobby` until the user quits, input ends or
/// `shutdown` resolves. `shutdown` also cuts short a command that is still
/// waiting on the server.
pub async fn run_prompt<W, F>(
    lobby: &Lobby,
    lines: &mut mpsc::Receiver<io::Result<String>>,
    out: &mut W,
    shutdown: F,
) -> io::Result<PromptExit>
where
    W: Write,
    F: Future,
{
    tokio::pin!(shutdown);
    loop {
        let line = tokio::select! {
            biased;
            _ = &mut shutdown => return Ok(PromptExit::Interrupted),
            line = lines.recv() => line,
        };
        let Some(line) = line else {
            return Ok(PromptExit::EndOfInput);
        };

        let command = match Command::parse(&line?) {
            Ok(Some(Command::Quit)) => return Ok(PromptExit::Quit),
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };

        let reply = tokio::select! {
            biased;
            _ = &mut shutdown => return Ok(PromptExit::Interrupted),
            reply = execute(lobby, command) => reply,
        };
        if let Some(reply) = reply {
            writeln!(out, "{reply}")?;
            out.flush()?;
        }
    }
}

// Failures the lobby already showed through the view are only logged here.
async fn execute(lobby: &Lobby, command: Command) -> Option<String> {
    match command {
        Command::Create { name } => {
            if let Err(err) = lobby.create(&name).await {
                debug!("create failed: {err}");
            }
            None
        }
        Command::Join { game_id, name } => {
            if let Err(err) = lobby.join(&game_id, &name).await {
                debug!("join failed: {err}");
            }
            None
        }
        Command::Start => match lobby.start_game().await {
            Ok(false) => Some("Join a game first".into()),
            Ok(true) => None,
            Err(err) => {
                debug!("start failed: {err}");
                None
            }
        },
        Command::Refresh => match lobby.refresh().await {
            Ok(PollOutcome::Failed(err)) => Some(format!("Refresh failed: {err}")),
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        },
        Command::Leave => (!lobby.leave()).then(|| "Not in a game".into()),
        Command::Help => Some(Command::HELP.into()),
        Command::Quit => None,
    }
}
