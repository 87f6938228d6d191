use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::game::{Board, Piece};

use super::agent::Agent;
use super::evaluator::{has_won, Heuristic, Score, WindowHeuristic};

/// Terminal score when the maximizer has four in a line.
pub const WIN_SCORE: Score = 100_000_000_000_000;
/// Terminal score when the minimizer has four in a line.
pub const LOSS_SCORE: Score = -10_000_000_000_000;
/// Terminal score for a full board with no winner.
pub const DRAW_SCORE: Score = 0;

/// Outcome of one search: the chosen column and its score.
///
/// `column` is `None` only for terminal positions, where there is nothing
/// to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: Score,
}

/// Counters for the most recent root search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// The searcher plays for a fixed maximizer piece; the opponent is the
/// minimizer. Columns are tried in ascending order. Before the scan a legal
/// column is drawn from `rng` so that a move is always returned for a
/// non-terminal position.
pub struct Minimax<R> {
    maximizer: Piece,
    rng: R,
    heuristic: Box<dyn Heuristic>,
    pruning: bool,
    stats: SearchStats,
}

impl<R: Rng> Minimax<R> {
    pub fn new(maximizer: Piece, rng: R) -> Self {
        Self::with_heuristic(maximizer, rng, Box::new(WindowHeuristic))
    }

    pub fn with_heuristic(maximizer: Piece, rng: R, heuristic: Box<dyn Heuristic>) -> Self {
        Minimax {
            maximizer,
            rng,
            heuristic,
            pruning: true,
            stats: SearchStats::default(),
        }
    }

    /// Explore the full tree. Same result as the pruned search, more nodes.
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn maximizer(&self) -> Piece {
        self.maximizer
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Root search for the maximizer with a full alpha-beta window.
    pub fn best_move(&mut self, board: &Board, depth: u32) -> SearchResult {
        self.stats = SearchStats::default();
        let result = self.search(board, depth, Score::MIN, Score::MAX, true);
        trace!(
            piece = ?self.maximizer,
            depth,
            column = ?result.column,
            score = result.score,
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            cutoffs = self.stats.cutoffs,
            "search finished"
        );
        result
    }

    /// One node of the search. `maximizing` says whose ply this is.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;
        let minimizer = self.maximizer.other();

        // Terminal positions end the branch regardless of depth.
        if has_won(board, self.maximizer) {
            self.stats.leaves += 1;
            return SearchResult { column: None, score: WIN_SCORE };
        }
        if has_won(board, minimizer) {
            self.stats.leaves += 1;
            return SearchResult { column: None, score: LOSS_SCORE };
        }
        let valid = board.valid_columns();
        if valid.is_empty() {
            self.stats.leaves += 1;
            return SearchResult { column: None, score: DRAW_SCORE };
        }

        let fallback = valid[self.rng.random_range(0..valid.len())];
        let mover = if maximizing { self.maximizer } else { minimizer };

        if depth == 0 {
            self.stats.leaves += 1;
            return SearchResult {
                column: Some(fallback),
                score: self.heuristic.evaluate(board, mover),
            };
        }

        let mut column = fallback;
        let mut value = if maximizing { Score::MIN } else { Score::MAX };

        for &col in &valid {
            let Some(row) = board.next_open_row(col) else {
                continue;
            };
            let mut child = *board;
            child.drop(row, col, mover);
            let score = self.search(&child, depth - 1, alpha, beta, !maximizing).score;

            if maximizing {
                if score > value {
                    value = score;
                    column = col;
                }
                alpha = alpha.max(value);
                if self.pruning && alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            } else {
                if score < value {
                    value = score;
                    column = col;
                }
                beta = beta.min(value);
                if self.pruning && beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        SearchResult {
            column: Some(column),
            score: value,
        }
    }
}

/// Agent that runs a single minimax search at a fixed depth each turn.
pub struct MinimaxAgent {
    depth: u32,
    search: Minimax<StdRng>,
}

impl MinimaxAgent {
    pub fn new(piece: Piece, depth: u32, rng: StdRng) -> Self {
        MinimaxAgent {
            depth,
            search: Minimax::new(piece, rng),
        }
    }

    pub fn without_pruning(mut self) -> Self {
        self.search = self.search.without_pruning();
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    fn select_column(&mut self, board: &Board) -> Option<usize> {
        self.search.best_move(board, self.depth).column
    }

    fn name(&self) -> &str {
        "Minimax AI"
    }

    fn piece(&self) -> Piece {
        self.search.maximizer()
    }
}
