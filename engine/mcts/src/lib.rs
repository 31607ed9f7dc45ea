//! Parallel Monte Carlo Tree Search for two-player games with chance.
//!
//! This crate provides a game-agnostic MCTS engine for adversarial games
//! that mix deterministic and stochastic moves. It works with any game
//! implementing the `game-core` traits.
//!
//! # Overview
//!
//! The engine builds a shared tree of two node kinds: *decision* nodes where
//! a player chooses among moves, and *chance* nodes that group the realised
//! outcomes of a stochastic move by state hash. Each search episode runs
//! four phases:
//!
//! 1. **Selection**: descend the tree picking UCT-maximal children
//! 2. **Expansion**: attach a node for an untried move or unseen outcome
//! 3. **Rollout**: play random moves to a terminal state or a depth cutoff
//! 4. **Backup**: fold the outcome into every node along the path
//!
//! Episodes run from many worker threads against the same tree (tree
//! parallelization). Per-node read-write locks keep the statistics
//! consistent, and a virtual loss applied during descent and reversed at
//! backup keeps concurrent workers from piling onto one line.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{Mcts, SearchConfig, Segment};
//!
//! let config = SearchConfig::new(8).with_episodes(1_000).with_cutoff(50);
//! let mut mcts = Mcts::new(config)?;
//!
//! // First search of the game: nothing to reuse yet.
//! let (policy, metric) = mcts.simulate(&state, &[]);
//!
//! // ...both sides play; report what happened to keep the subtree...
//! let lineage = vec![
//!     Segment::new(my_move, state_after_mine.hash()),
//!     Segment::new(their_move, state_after_theirs.hash()),
//! ];
//! let (policy, metric) = mcts.simulate(&state_after_theirs, &lineage);
//! ```
//!
//! The returned policy maps each explored root move to its visit count (not
//! normalised); callers pick a move by argmax or by temperature-weighted
//! sampling.
//!
//! # Budgets
//!
//! A search runs either a fixed number of episodes (`with_episodes`) or
//! against the wall clock (`with_duration`); exactly one must be set.
//! Rollouts stop at `with_cutoff` plies and fall back to the configured
//! evaluator.

mod chance;
mod decision;
mod node;
mod rollout;
mod search;
#[cfg(test)]
mod testing;

pub mod config;
pub mod metrics;
pub mod tree;
pub mod uct;

pub use config::{ConfigError, SearchConfig};
pub use metrics::{Collector, MetricCollector, NoopCollector, SearchMetric};
pub use tree::{Mcts, Segment};
pub use uct::{C_SQUARED, LOSS, MAX_CUTOFF, WIN};
