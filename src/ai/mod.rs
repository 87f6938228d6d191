mod agent;
pub mod deepening;
pub mod evaluator;
pub mod minimax;

pub use agent::Agent;
pub use deepening::{iterative_deepening, DeepeningAgent, DeepeningReport};
pub use evaluator::{has_won, score_position, score_window, Heuristic, Score, WindowHeuristic};
pub use minimax::{Minimax, MinimaxAgent, SearchResult, SearchStats, LOSS_SCORE, WIN_SCORE};
