//! # Connect Four Duel
//!
//! Two automated Connect Four agents playing each other: a fixed-depth
//! minimax search with alpha-beta pruning, and an iterative-deepening
//! driver around the same search.
//!
//! ## Modules
//!
//! - [`game`]: Board, cells and pieces
//! - [`ai`]: Win detection, window heuristic, minimax, iterative deepening, agents
//! - [`duel`]: Game loop alternating the two agents
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//! - [`logging`]: tracing subscriber setup

pub mod ai;
pub mod config;
pub mod duel;
pub mod error;
pub mod game;
pub mod logging;
