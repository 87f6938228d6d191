use std::path::PathBuf;

use crate::game::Piece;

/// Errors from a checked drop. The board is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors from parsing the text form of a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected 6 rows, found {0}")]
    RowCount(usize),

    #[error("row {line}: expected 7 cells, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("unknown cell symbol '{0}'")]
    UnknownSymbol(char),

    #[error("piece at row {row}, column {col} has an empty cell below it")]
    Floating { row: usize, col: usize },
}

/// Errors from seating agents in a duel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DuelError {
    #[error("both agents play {0:?}")]
    DuplicatePiece(Piece),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
