//! Iterative deepening over [`Minimax`].
//!
//! Each depth from 1 to the maximum is a complete, independent search with
//! a fresh full alpha-beta window; nothing carries over between depths. A
//! depth's result replaces the kept one only when its score is strictly
//! higher, so among equal scores the shallowest depth wins.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::game::{Board, Piece};

use super::agent::Agent;
use super::evaluator::Score;
use super::minimax::{Minimax, SearchResult};

/// What an iterative-deepening run found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepeningReport {
    /// The kept result. `column` is `None` if no depth ran or the board was terminal.
    pub result: SearchResult,
    /// Depth that produced `result`.
    pub best_depth: Option<u32>,
    /// Deepest depth that ran to completion.
    pub completed_depth: u32,
    /// Result of every completed depth, shallowest first.
    pub per_depth: Vec<SearchResult>,
}

/// Run searches at depth 1..=`max_depth` and keep the highest-scoring one.
///
/// With a `budget`, no new depth is started once the elapsed time reaches
/// it. A running depth is never interrupted and depth 1 always runs.
pub fn iterative_deepening<R: Rng>(
    search: &mut Minimax<R>,
    board: &Board,
    max_depth: u32,
    budget: Option<Duration>,
) -> DeepeningReport {
    let start = Instant::now();
    let mut best = SearchResult {
        column: None,
        score: Score::MIN,
    };
    let mut best_depth = None;
    let mut per_depth = Vec::with_capacity(max_depth as usize);

    for depth in 1..=max_depth {
        let result = search.best_move(board, depth);
        debug!(
            piece = ?search.maximizer(),
            depth,
            column = ?result.column,
            score = result.score,
            nodes = search.stats().nodes,
            "depth complete"
        );
        per_depth.push(result);

        if result.score > best.score {
            best = result;
            best_depth = Some(depth);
        }

        if let Some(budget) = budget {
            if depth < max_depth && start.elapsed() >= budget {
                debug!(depth, elapsed = ?start.elapsed(), "time budget spent");
                break;
            }
        }
    }

    DeepeningReport {
        result: best,
        best_depth,
        completed_depth: per_depth.len() as u32,
        per_depth,
    }
}

/// Agent that plays the result of iterative deepening each turn.
pub struct DeepeningAgent {
    max_depth: u32,
    budget: Option<Duration>,
    search: Minimax<StdRng>,
}

impl DeepeningAgent {
    pub fn new(piece: Piece, max_depth: u32, rng: StdRng) -> Self {
        DeepeningAgent {
            max_depth,
            budget: None,
            search: Minimax::new(piece, rng),
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn without_pruning(mut self) -> Self {
        self.search = self.search.without_pruning();
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Full report for `board`, for callers that want more than the column.
    pub fn analyze(&mut self, board: &Board) -> DeepeningReport {
        iterative_deepening(&mut self.search, board, self.max_depth, self.budget)
    }
}

impl Agent for DeepeningAgent {
    fn select_column(&mut self, board: &Board) -> Option<usize> {
        self.analyze(board).result.column
    }

    fn name(&self) -> &str {
        "Iterative Deepening AI"
    }

    fn piece(&self) -> Piece {
        self.search.maximizer()
    }
}
