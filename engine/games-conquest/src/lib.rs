//! Risk-style territorial game for the conquest engine
//!
//! This crate provides a compact two-player territorial game implementing
//! the `game-core` adapter traits, exercising every feature the search
//! engine supports: deterministic phase moves, dice-driven attacks behind
//! chance nodes, and heuristic evaluators for rollout cutoffs.
//!
//! # Usage
//!
//! ```rust
//! use games_conquest::{ConquestState, Map};
//! use game_core::GameState;
//!
//! let state = ConquestState::new(Map::frontier());
//! assert!(state.winner().is_none());
//! assert!(!state.legal_moves().is_empty());
//! ```

pub mod eval;
pub mod map;
pub mod moves;
pub mod state;

pub use eval::{BorderEvaluator, ResourceEvaluator};
pub use map::{Map, Region, Territory, TerritoryId};
pub use moves::{ConquestMove, Phase};
pub use state::{ConquestState, Player};

#[cfg(test)]
mod tests;
