//! Position evaluation: win detection and the window heuristic.
//!
//! Every check is expressed over *windows*, runs of four cells along a row,
//! a column or either diagonal. The board has 69 of them.

use crate::game::{Board, Cell, Piece, COLS, ROWS};

/// Search and heuristic scores.
pub type Score = i64;

pub const WINDOW_LEN: usize = 4;

/// Four cells in a line.
pub type Window = [Cell; WINDOW_LEN];

const FOUR_SCORE: Score = 100;
const THREE_SCORE: Score = 5;
const TWO_SCORE: Score = 2;
/// Weaker than `THREE_SCORE` on purpose: play leans offensive.
const OPPONENT_THREE_PENALTY: Score = -4;

/// Trait for evaluating a board position from a piece's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, piece: Piece) -> Score;
}

/// Default heuristic: sum of [`score_window`] over every window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, piece: Piece) -> Score {
        score_position(board, piece)
    }
}

fn window_at(board: &Board, row: usize, col: usize, d_row: isize, d_col: isize) -> Window {
    std::array::from_fn(|i| {
        let r = row as isize + d_row * i as isize;
        let c = col as isize + d_col * i as isize;
        board.get(r as usize, c as usize)
    })
}

/// All windows on the board: horizontal, vertical, rising diagonal, then
/// falling diagonal.
pub fn windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    let horizontal = (0..ROWS).flat_map(move |row| {
        (0..=COLS - WINDOW_LEN).map(move |col| window_at(board, row, col, 0, 1))
    });
    let vertical = (0..COLS).flat_map(move |col| {
        (0..=ROWS - WINDOW_LEN).map(move |row| window_at(board, row, col, 1, 0))
    });
    let rising = (0..=ROWS - WINDOW_LEN).flat_map(move |row| {
        (0..=COLS - WINDOW_LEN).map(move |col| window_at(board, row, col, 1, 1))
    });
    let falling = (WINDOW_LEN - 1..ROWS).flat_map(move |row| {
        (0..=COLS - WINDOW_LEN).map(move |col| window_at(board, row, col, -1, 1))
    });

    horizontal.chain(vertical).chain(rising).chain(falling)
}

/// True iff `piece` has four in a line anywhere on the board.
pub fn has_won(board: &Board, piece: Piece) -> bool {
    let own = piece.to_cell();
    windows(board).any(|window| window.iter().all(|&cell| cell == own))
}

/// Heuristic value of one window for `piece`.
pub fn score_window(window: &Window, piece: Piece) -> Score {
    let own_cell = piece.to_cell();
    let opp_cell = piece.other().to_cell();
    let mut own = 0;
    let mut opp = 0;
    let mut empty = 0;
    for &cell in window {
        match cell {
            c if c == own_cell => own += 1,
            c if c == opp_cell => opp += 1,
            _ => empty += 1,
        }
    }

    let mut score = if own == 4 {
        FOUR_SCORE
    } else if own == 3 && empty == 1 {
        THREE_SCORE
    } else if own == 2 && empty == 2 {
        TWO_SCORE
    } else {
        0
    };
    if opp == 3 && empty == 1 {
        score += OPPONENT_THREE_PENALTY;
    }
    score
}

/// Heuristic value of the whole board for `piece`.
pub fn score_position(board: &Board, piece: Piece) -> Score {
    windows(board).map(|window| score_window(&window, piece)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Cell = Cell::Occupied(Piece::Deepening);
    const M: Cell = Cell::Occupied(Piece::Minimax);
    const E: Cell = Cell::Empty;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn window_count() {
        let board = Board::new();
        assert_eq!(windows(&board).count(), 69);
    }

    // --- has_won ---

    #[test]
    fn empty_board_has_no_winner() {
        let board = Board::new();
        assert!(!has_won(&board, Piece::Deepening));
        assert!(!has_won(&board, Piece::Minimax));
    }

    #[test]
    fn isolated_pieces_do_not_win() {
        let b = board(
            "0000000
             0000000
             0000000
             0000000
             0000000
             1020102",
        );
        assert!(!has_won(&b, Piece::Deepening));
        assert!(!has_won(&b, Piece::Minimax));
    }

    #[test]
    fn horizontal_win() {
        let b = board(
            "0000000
             0000000
             0000000
             0000000
             0002220
             0011110",
        );
        assert!(has_won(&b, Piece::Deepening));
        assert!(!has_won(&b, Piece::Minimax));
    }

    #[test]
    fn vertical_win() {
        let b = board(
            "0000000
             0000002
             0000002
             0000002
             0000012
             0000011",
        );
        assert!(has_won(&b, Piece::Minimax));
        assert!(!has_won(&b, Piece::Deepening));
    }

    #[test]
    fn rising_diagonal_win() {
        let b = board(
            "0000000
             0000000
             0001000
             0012000
             0122000
             1222100",
        );
        assert!(has_won(&b, Piece::Deepening));
        assert!(!has_won(&b, Piece::Minimax));
    }

    #[test]
    fn falling_diagonal_win() {
        let b = board(
            "0000000
             0000000
             0002000
             0001200
             0001120
             0001112",
        );
        assert!(has_won(&b, Piece::Minimax));
        assert!(!has_won(&b, Piece::Deepening));
    }

    #[test]
    fn broken_line_is_not_a_win() {
        let b = board(
            "0000000
             0000000
             0000000
             0000000
             0000000
             1112111",
        );
        assert!(!has_won(&b, Piece::Deepening));
    }

    #[test]
    fn column_of_three_then_four() {
        let mut b = Board::new();
        for _ in 0..3 {
            b.play(3, Piece::Deepening).unwrap();
        }
        assert!(!has_won(&b, Piece::Deepening));
        b.play(3, Piece::Deepening).unwrap();
        assert!(has_won(&b, Piece::Deepening));
    }

    // --- score_window ---

    #[test]
    fn window_constants() {
        let p = Piece::Deepening;
        assert_eq!(score_window(&[D, D, D, D], p), 100);
        assert_eq!(score_window(&[D, D, E, D], p), 5);
        assert_eq!(score_window(&[E, D, D, E], p), 2);
        assert_eq!(score_window(&[M, E, M, M], p), -4);
        assert_eq!(score_window(&[E, E, E, E], p), 0);
        assert_eq!(score_window(&[D, E, E, E], p), 0);
        assert_eq!(score_window(&[D, D, D, M], p), 0);
        assert_eq!(score_window(&[D, D, M, M], p), 0);
        assert_eq!(score_window(&[M, M, M, M], p), 0);
        assert_eq!(score_window(&[M, M, E, E], p), 0);
    }

    #[test]
    fn window_scores_mirror_under_relabeling() {
        let pairs: [(Window, Window); 4] = [
            ([D, D, D, D], [M, M, M, M]),
            ([D, D, D, E], [M, M, M, E]),
            ([D, E, D, E], [M, E, M, E]),
            ([E, M, M, M], [E, D, D, D]),
        ];
        for (window, relabeled) in pairs {
            assert_eq!(
                score_window(&window, Piece::Deepening),
                score_window(&relabeled, Piece::Minimax)
            );
        }
    }

    #[test]
    fn offense_and_defense_are_asymmetric() {
        let three = [D, D, D, E];
        assert_eq!(score_window(&three, Piece::Deepening), 5);
        assert_eq!(score_window(&three, Piece::Minimax), -4);
    }

    // --- score_position ---

    #[test]
    fn empty_board_scores_zero() {
        let b = Board::new();
        assert_eq!(score_position(&b, Piece::Deepening), 0);
        assert_eq!(score_position(&b, Piece::Minimax), 0);
    }

    #[test]
    fn two_adjacent_pieces() {
        let b = board(
            "0000000
             0000000
             0000000
             0000000
             0000000
             1100000",
        );
        assert_eq!(score_position(&b, Piece::Deepening), 2);
        assert_eq!(score_position(&b, Piece::Minimax), 0);
    }

    #[test]
    fn three_in_a_row_both_perspectives() {
        let b = board(
            "0000000
             0000000
             0000000
             0000000
             0000000
             1110000",
        );
        // [1110] = 5, [1100] = 2, [1000] = 0
        assert_eq!(score_position(&b, Piece::Deepening), 7);
        assert_eq!(score_position(&b, Piece::Minimax), -4);
    }

    #[test]
    fn window_heuristic_matches_score_position() {
        let b = board(
            "0000000
             0000000
             0000000
             0002000
             0021100
             1121200",
        );
        for piece in Piece::ALL {
            assert_eq!(WindowHeuristic.evaluate(&b, piece), score_position(&b, piece));
        }
    }
}
