//! Core Connect Four data: the 6x7 board and the two pieces.

mod board;
mod player;

pub use board::{Board, Cell, ValidColumns, COLS, ROWS};
pub use player::Piece;
