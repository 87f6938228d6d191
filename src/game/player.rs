use serde::{Deserialize, Serialize};

use super::board::Cell;

/// The two pieces on the board, one per competing search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    /// Played by the iterative-deepening agent.
    Deepening,
    /// Played by the fixed-depth minimax agent.
    Minimax,
}

impl Piece {
    pub const ALL: [Piece; 2] = [Piece::Deepening, Piece::Minimax];

    /// Get the other piece
    pub fn other(self) -> Piece {
        match self {
            Piece::Deepening => Piece::Minimax,
            Piece::Minimax => Piece::Deepening,
        }
    }

    /// Convert piece to cell type
    pub fn to_cell(self) -> Cell {
        Cell::Occupied(self)
    }

    /// Numeric code used in the text board form
    pub fn code(self) -> char {
        match self {
            Piece::Deepening => '1',
            Piece::Minimax => '2',
        }
    }

    pub fn from_code(code: char) -> Option<Piece> {
        match code {
            '1' => Some(Piece::Deepening),
            '2' => Some(Piece::Minimax),
            _ => None,
        }
    }

    /// Name of the agent controlling this piece, used in announcements
    pub fn agent_name(self) -> &'static str {
        match self {
            Piece::Deepening => "Iterative Deepening AI",
            Piece::Minimax => "Minimax AI",
        }
    }
}
