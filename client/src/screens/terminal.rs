use std::io::{self, Write};
use std::time::Duration;

use parking_lot::Mutex;
use shared::Session;
use tokio::time::Instant;
use tracing::warn;

use crate::notify::{Notification, NotificationBoard};
use crate::render::{Board, GameView, StatusBadge, TableRow, View};

const HELP: &str = "\
commands:
  create <name>            create a new game and join it
  join <game-id> <name>    join an existing game
  start                    deal characters (needs 2+ players)
  refresh                  poll the game status now
  leave                    leave the current game
  help                     show this help
  quit                     exit";

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { name: String },
    Join { game_id: String, name: String },
    Start,
    Refresh,
    Leave,
    Help,
    Quit,
}

impl Command {
    pub const HELP: &'static str = HELP;

    /// Parses one prompt line. Names may contain spaces; missing arguments
    /// parse as empty strings and are rejected later by the lobby.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "create" | "new" => Command::Create {
                name: rest.to_string(),
            },
            "join" => {
                let (game_id, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Join {
                    game_id: game_id.to_string(),
                    name: name.trim().to_string(),
                }
            }
            "start" => Command::Start,
            "refresh" | "r" => Command::Refresh,
            "leave" | "logout" => Command::Leave,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(Some(command))
    }
}

struct TerminalState<W> {
    out: W,
    // Rows survive a Hidden render so they come back if the table is shown again.
    rows: Vec<TableRow>,
    notifications: NotificationBoard,
}

/// [`View`] that draws the lobby as plain text.
pub struct TerminalView<W = io::Stdout> {
    state: Mutex<TerminalState<W>>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(notification_ttl: Duration) -> Self {
        Self::new(io::stdout(), notification_ttl)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, notification_ttl: Duration) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                rows: Vec::new(),
                notifications: NotificationBoard::new(notification_ttl),
            }),
        }
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().out
    }

    fn draw(&self, f: impl FnOnce(&mut TerminalState<W>) -> io::Result<()>) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if let Err(err) = f(&mut *state).and_then(|()| state.out.flush()) {
            warn!("Failed to write to terminal: {err}");
        }
    }
}

fn write_game<W: Write>(state: &mut TerminalState<W>, view: &GameView) -> io::Result<()> {
    let TerminalState {
        out,
        rows,
        notifications,
    } = state;

    for notification in notifications.active(Instant::now()) {
        writeln!(out, "{notification}")?;
    }

    let badge = match view.badge {
        StatusBadge::Active => "ACTIVE",
        StatusBadge::Waiting => "WAITING",
    };
    writeln!(out, "Status: {badge}")?;

    let players: Vec<String> = view
        .players
        .iter()
        .map(|p| {
            if p.is_self {
                format!("[{}]*", p.name)
            } else {
                format!("[{}]", p.name)
            }
        })
        .collect();
    writeln!(out, "Players: {}", players.join(" "))?;

    let visible = match &view.board {
        Board::Hidden => false,
        Board::Unchanged => true,
        Board::Rows(new_rows) => {
            rows.clone_from(new_rows);
            true
        }
    };

    if visible {
        writeln!(out, "{}", TableRow::HEADERS.join(" | "))?;
        for row in rows.iter() {
            writeln!(out, "{}", row.cells().join(" | "))?;
        }
    } else {
        writeln!(out, "Waiting for the game to start...")?;
    }
    Ok(())
}

impl<W: Write + Send> View for TerminalView<W> {
    fn show_login(&self) {
        self.draw(|state| {
            state.rows.clear();
            writeln!(state.out, "== Lobby ==")?;
            writeln!(
                state.out,
                "Type 'create <name>' or 'join <game-id> <name>' ('help' for more)"
            )
        });
    }

    fn show_game(&self, session: &Session) {
        self.draw(|state| {
            state.rows.clear();
            writeln!(
                state.out,
                "== Game {} | you are {} ==",
                session.game_id(),
                session.player_name()
            )
        });
    }

    fn render(&self, view: &GameView) {
        self.draw(|state| write_game(state, view));
    }

    fn notify(&self, notification: Notification) {
        self.draw(|state| {
            writeln!(state.out, "{notification}")?;
            state.notifications.push(notification);
            Ok(())
        });
    }
}
