use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;

use super::player::Piece;
use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Legal columns in ascending order. Never allocates.
pub type ValidColumns = ArrayVec<usize, COLS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Piece),
}

impl Cell {
    fn code(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Occupied(piece) => piece.code(),
        }
    }
}

/// Fixed 6x7 grid. Row 0 is the bottom, row 5 is the top.
///
/// `Board` is `Copy`: search explores hypothetical positions on by-value
/// copies, so sibling branches never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column accepts a piece while its top cell is empty
    pub fn is_valid_column(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col] == Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` when the column is full
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Place `piece` at (row, col) without any legality check.
    ///
    /// Callers must have obtained `row` from [`Board::next_open_row`] for a
    /// column that passed [`Board::is_valid_column`].
    pub fn drop(&mut self, row: usize, col: usize, piece: Piece) {
        self.cells[row][col] = piece.to_cell();
    }

    /// Checked drop: validates the column first and leaves the board
    /// untouched on error. Returns the row where the piece landed.
    pub fn play(&mut self, col: usize, piece: Piece) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.next_open_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.drop(row, col, piece);
        Ok(row)
    }

    /// Columns that can still take a piece, ascending
    pub fn valid_columns(&self) -> ValidColumns {
        (0..COLS).filter(|&col| self.is_valid_column(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.is_valid_column(col))
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the top row first, one `[c c c c c c c]` line per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.code())?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) form back. Blank lines are ignored,
/// brackets are optional and `.` is accepted for an empty cell.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount(lines.len()));
        }

        let mut board = Board::new();
        for (i, line) in lines.iter().enumerate() {
            let row = ROWS - 1 - i;
            let symbols: Vec<char> = line
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '[' && *c != ']')
                .collect();
            if symbols.len() != COLS {
                return Err(BoardParseError::ColumnCount {
                    line: i + 1,
                    found: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                board.cells[row][col] = match symbol {
                    '0' | '.' => Cell::Empty,
                    other => Piece::from_code(other)
                        .map(Cell::Occupied)
                        .ok_or(BoardParseError::UnknownSymbol(other))?,
                };
            }
        }

        // Gravity: nothing may rest on an empty cell.
        for col in 0..COLS {
            for row in 1..ROWS {
                if board.cells[row][col] != Cell::Empty && board.cells[row - 1][col] == Cell::Empty {
                    return Err(BoardParseError::Floating { row, col });
                }
            }
        }

        Ok(board)
    }
}
