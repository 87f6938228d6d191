use crate::game::{Board, Piece};

/// A seat in a duel: something that picks a column for its piece.
pub trait Agent {
    /// Choose a column for the current board, or `None` when there is no
    /// legal move.
    fn select_column(&mut self, board: &Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// The piece this agent plays.
    fn piece(&self) -> Piece;
}
