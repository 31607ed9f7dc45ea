//! Core traits and types for game adapters
//!
//! This crate provides the fundamental abstractions the search engine
//! consumes:
//! - `GameState`: an immutable game position that knows its legal moves
//! - `GameMove`: an action, flagged as deterministic or stochastic
//! - `Evaluator`: a heuristic position scorer used when rollouts are cut off
//!
//! The engine itself carries no game-specific logic; everything it needs
//! from a game flows through these traits.

pub mod evaluator;
pub mod state;

pub use evaluator::{Evaluator, NeutralEvaluator};
pub use state::{GameMove, GameState};
