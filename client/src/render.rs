use shared::{GameStatus, Session, VisibleRow};

use crate::notify::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Active,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBadge {
    pub name: String,
    /// Highlighted: this entry is the local player.
    pub is_self: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub player: String,
    pub character: String,
    pub context: String,
}

impl TableRow {
    pub const HEADERS: [&'static str; 3] = ["JUGADOR", "PERSONAJE", "CONTEXTO"];

    pub fn cells(&self) -> [&str; 3] {
        [&self.player, &self.character, &self.context]
    }
}

impl From<&VisibleRow> for TableRow {
    fn from(row: &VisibleRow) -> Self {
        Self {
            player: row.player.clone(),
            character: row.character.clone(),
            context: row.context.clone(),
        }
    }
}

/// What happens to the game table on this render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Board {
    /// Game not active: hide the table but keep whatever rows it had.
    Hidden,
    /// Active, but the snapshot carried no rows: show the table as it was.
    Unchanged,
    /// Active: replace the table with these rows, in server order.
    Rows(Vec<TableRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub badge: StatusBadge,
    pub players: Vec<PlayerBadge>,
    pub board: Board,
}

/// Pure projection of one snapshot for the player called `own_name`.
pub fn render_game(status: &GameStatus, own_name: &str) -> GameView {
    let badge = if status.active {
        StatusBadge::Active
    } else {
        StatusBadge::Waiting
    };

    let players = status
        .players
        .iter()
        .map(|name| PlayerBadge {
            name: name.clone(),
            is_self: name == own_name,
        })
        .collect();

    let board = match (status.active, &status.visible_data) {
        (false, _) => Board::Hidden,
        (true, None) => Board::Unchanged,
        (true, Some(rows)) => Board::Rows(rows.iter().map(TableRow::from).collect()),
    };

    GameView {
        badge,
        players,
        board,
    }
}

/// The UI surface. Implementations only draw; they hold no session state.
///
/// The poller calls `render`, `notify` and `show_login` while it holds its own
/// state lock, so implementations must not call back into the poller.
pub trait View: Send + Sync {
    /// Logged-out screen: name/game id entry.
    fn show_login(&self);

    /// In-game screen header for a freshly joined session.
    fn show_game(&self, session: &Session);

    fn render(&self, view: &GameView);

    fn notify(&self, notification: Notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(active: bool, rows: Option<Vec<VisibleRow>>) -> GameStatus {
        GameStatus {
            active,
            players: vec!["ANA".into(), "LUIS".into(), "EVA".into()],
            is_player_in_game: true,
            visible_data: rows,
            ..GameStatus::default()
        }
    }

    #[test]
    fn single_row_renders_columns_in_order() {
        let view = render_game(
            &status(true, Some(vec![VisibleRow::new("A", "X", "Y")])),
            "ANA",
        );

        assert_eq!(view.badge, StatusBadge::Active);
        let Board::Rows(rows) = &view.board else {
            panic!("expected rows, got {:?}", view.board);
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells(), ["A", "X", "Y"]);
    }

    #[test]
    fn rows_keep_server_order() {
        let view = render_game(
            &status(
                true,
                Some(vec![
                    VisibleRow::new("LUIS", "Batman", "En el dentista"),
                    VisibleRow::new("EVA", "Superman", "En el supermercado"),
                ]),
            ),
            "ANA",
        );
        let Board::Rows(rows) = view.board else {
            panic!("expected rows");
        };
        let players: Vec<_> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(players, ["LUIS", "EVA"]);
    }

    #[test]
    fn own_player_is_highlighted() {
        let view = render_game(&status(false, None), "LUIS");
        let highlighted: Vec<_> = view
            .players
            .iter()
            .filter(|p| p.is_self)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(highlighted, ["LUIS"]);
        assert_eq!(view.players.len(), 3);
    }

    #[test]
    fn inactive_game_hides_table() {
        let view = render_game(
            &status(false, Some(vec![VisibleRow::new("A", "X", "Y")])),
            "ANA",
        );
        assert_eq!(view.badge, StatusBadge::Waiting);
        assert_eq!(view.board, Board::Hidden);
    }

    #[test]
    fn active_without_rows_leaves_table_alone() {
        let view = render_game(&status(true, None), "ANA");
        assert_eq!(view.board, Board::Unchanged);
    }

    #[test]
    fn active_with_empty_rows_clears_table() {
        let view = render_game(&status(true, Some(Vec::new())), "ANA");
        assert_eq!(view.board, Board::Rows(Vec::new()));
    }
}
