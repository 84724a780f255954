pub mod lobby;
pub mod prompt;
pub mod terminal;
