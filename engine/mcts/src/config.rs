//! Search configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use game_core::{Evaluator, GameState, NeutralEvaluator};
use thiserror::Error;

use crate::uct::MAX_CUTOFF;

/// Errors raised when a configuration cannot describe a runnable search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a search needs an episode count or a duration budget")]
    MissingBudget,

    #[error("episode and duration budgets are mutually exclusive")]
    ConflictingBudgets,

    #[error("a search needs at least one worker")]
    NoWorkers,
}

/// Configuration for one search engine instance.
///
/// Exactly one of the two budgets must be set: `with_episodes` runs a fixed
/// amount of work, `with_duration` runs against the clock. Everything else
/// has a default.
pub struct SearchConfig<S: GameState> {
    pub(crate) workers: usize,
    pub(crate) episodes: u64,
    pub(crate) duration: Option<Duration>,
    pub(crate) cutoff: usize,
    pub(crate) evaluator: Arc<dyn Evaluator<S>>,
    pub(crate) seed: Option<u64>,
    pub(crate) metrics: bool,
}

impl<S: GameState> SearchConfig<S> {
    /// Start a configuration with `workers` concurrent search workers.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            episodes: 0,
            duration: None,
            cutoff: MAX_CUTOFF,
            evaluator: Arc::new(NeutralEvaluator::new()),
            seed: None,
            metrics: false,
        }
    }

    /// Fixed-work budget: run exactly `episodes` episodes in total.
    pub fn with_episodes(mut self, episodes: u64) -> Self {
        self.episodes = episodes;
        self
    }

    /// Fixed-time budget: run episodes until `duration` has elapsed.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Cap rollouts at `plies` moves before handing off to the evaluator.
    pub fn with_cutoff(mut self, plies: usize) -> Self {
        self.cutoff = plies;
        self
    }

    /// Evaluator invoked on positions reaching the rollout cutoff.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator<S>>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Seed the per-worker RNG streams for reproducible searches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Collect search metrics (off by default).
    pub fn with_metrics(mut self) -> Self {
        self.metrics = true;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        match (self.episodes > 0, self.duration.is_some()) {
            (false, false) => Err(ConfigError::MissingBudget),
            (true, true) => Err(ConfigError::ConflictingBudgets),
            _ => Ok(()),
        }
    }
}

impl<S: GameState> Clone for SearchConfig<S> {
    fn clone(&self) -> Self {
        Self {
            workers: self.workers,
            episodes: self.episodes,
            duration: self.duration,
            cutoff: self.cutoff,
            evaluator: Arc::clone(&self.evaluator),
            seed: self.seed,
            metrics: self.metrics,
        }
    }
}

impl<S: GameState> fmt::Debug for SearchConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("workers", &self.workers)
            .field("episodes", &self.episodes)
            .field("duration", &self.duration)
            .field("cutoff", &self.cutoff)
            .field("evaluator", &self.evaluator.name())
            .field("seed", &self.seed)
            .field("metrics", &self.metrics)
            .finish()
    }
}
