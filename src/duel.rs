//! The game loop: two agents alternate on one shared board until a win, a
//! draw, or neither of them can move.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::ai::{has_won, Agent, DeepeningAgent, MinimaxAgent};
use crate::config::AppConfig;
use crate::error::DuelError;
use crate::game::{Board, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelOutcome {
    Winner(Piece),
    Draw,
    /// Both agents skipped back to back while legal moves remained.
    Abandoned,
}

/// One turn as seen by an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// 1-based turn number.
    pub number: usize,
    pub piece: Piece,
    /// What the agent asked for.
    pub requested: Option<usize>,
    /// Whether a piece was actually placed.
    pub applied: bool,
    /// Board after the turn.
    pub board: Board,
}

/// Pick the starting piece uniformly at random.
pub fn random_first<R: Rng>(rng: &mut R) -> Piece {
    Piece::ALL[rng.random_range(0..Piece::ALL.len())]
}

pub struct Duel {
    board: Board,
    deepening: Box<dyn Agent>,
    minimax: Box<dyn Agent>,
    rng: StdRng,
    first: Option<Piece>,
}

impl Duel {
    /// Seat two agents. They must play different pieces.
    pub fn new(a: Box<dyn Agent>, b: Box<dyn Agent>, rng: StdRng) -> Result<Self, DuelError> {
        let (deepening, minimax) = match (a.piece(), b.piece()) {
            (Piece::Deepening, Piece::Minimax) => (a, b),
            (Piece::Minimax, Piece::Deepening) => (b, a),
            (piece, _) => return Err(DuelError::DuplicatePiece(piece)),
        };
        Ok(Duel {
            board: Board::new(),
            deepening,
            minimax,
            rng,
            first: None,
        })
    }

    /// Build the standard pairing: iterative deepening against fixed-depth
    /// minimax. Every random source derives from `duel.seed` when it is set.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut rng = match config.duel.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let search = &config.search;

        let mut deepening =
            DeepeningAgent::new(Piece::Deepening, search.max_depth, StdRng::from_rng(&mut rng));
        if let Some(budget) = search.time_budget() {
            deepening = deepening.with_budget(budget);
        }
        let mut minimax =
            MinimaxAgent::new(Piece::Minimax, search.fixed_depth, StdRng::from_rng(&mut rng));
        if !search.alpha_beta {
            deepening = deepening.without_pruning();
            minimax = minimax.without_pruning();
        }

        Duel {
            board: Board::new(),
            deepening: Box::new(deepening),
            minimax: Box::new(minimax),
            rng,
            first: config.duel.first,
        }
    }

    /// Always start with `piece` instead of picking at random.
    pub fn with_first(mut self, piece: Piece) -> Self {
        self.first = Some(piece);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self, piece: Piece) -> &dyn Agent {
        match piece {
            Piece::Deepening => self.deepening.as_ref(),
            Piece::Minimax => self.minimax.as_ref(),
        }
    }

    fn agent_mut(&mut self, piece: Piece) -> &mut dyn Agent {
        match piece {
            Piece::Deepening => self.deepening.as_mut(),
            Piece::Minimax => self.minimax.as_mut(),
        }
    }

    /// Final line for an outcome.
    pub fn announcement(&self, outcome: DuelOutcome) -> String {
        match outcome {
            DuelOutcome::Winner(piece) => format!("{} wins!", self.agent(piece).name()),
            DuelOutcome::Draw => "Game ends in a draw".to_string(),
            DuelOutcome::Abandoned => "Game abandoned: neither agent could move".to_string(),
        }
    }

    /// Play from the current board until the game ends, reporting every
    /// turn to `on_turn`.
    pub fn play(&mut self, mut on_turn: impl FnMut(&Turn)) -> DuelOutcome {
        let first = match self.first {
            Some(piece) => piece,
            None => random_first(&mut self.rng),
        };
        info!(first = self.agent(first).name(), "duel starts");

        let mut active = first;
        let mut skipped_in_row = 0;
        let mut number = 0;

        let outcome = loop {
            number += 1;
            let board = self.board;
            let requested = self.agent_mut(active).select_column(&board);

            // Only legal columns touch the board; anything else skips the turn.
            let applied = match requested {
                Some(col) => match self.board.play(col, active) {
                    Ok(row) => {
                        debug!(turn = number, piece = ?active, col, row, "piece dropped");
                        true
                    }
                    Err(e) => {
                        warn!(turn = number, piece = ?active, error = %e, "illegal column, turn skipped");
                        false
                    }
                },
                None => {
                    warn!(turn = number, piece = ?active, "no column chosen, turn skipped");
                    false
                }
            };

            on_turn(&Turn {
                number,
                piece: active,
                requested,
                applied,
                board: self.board,
            });

            if applied && has_won(&self.board, active) {
                break DuelOutcome::Winner(active);
            }

            skipped_in_row = if applied { 0 } else { skipped_in_row + 1 };
            active = active.other();

            if self.board.is_full() {
                break DuelOutcome::Draw;
            }
            if skipped_in_row >= 2 {
                break DuelOutcome::Abandoned;
            }
        };

        info!(turns = number, result = %self.announcement(outcome), "duel over");
        outcome
    }
}
