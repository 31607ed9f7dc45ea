//! Thread-safe search metrics.
//!
//! The hot counters (episodes, full playouts) are plain atomics so workers
//! never contend on a lock to record progress. The per-search metadata is
//! written once by the driver thread before workers spawn and once after
//! they join, and sits behind a mutex.
//!
//! Production searches wire the no-op collector; experiments wire the real
//! one. Both satisfy the same trait so the engine never branches on it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Snapshot of one search, taken when the budget is exhausted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMetric {
    /// Worker count the search ran with.
    pub workers: usize,
    /// Wall-clock time between `start` and `complete`.
    pub duration: Duration,
    /// Episodes completed.
    pub episodes: u64,
    /// Episodes whose rollout reached a true terminal state.
    pub full_playouts: u64,
    /// Rollout depth bound in plies.
    pub cutoff: usize,
    /// Name of the cutoff evaluator.
    pub evaluator: &'static str,
    /// Whether the previous search's subtree survived re-rooting.
    pub tree_reused: bool,
}

/// Recording interface the engine reports into.
pub trait Collector: Send + Sync {
    /// Begin a search: stamp the start time and the search parameters.
    fn start(&self, workers: usize, cutoff: usize, evaluator: &'static str);

    /// Record one completed episode.
    fn add_episode(&self);

    /// Record a rollout that reached a true terminal state.
    fn add_full_playout(&self);

    /// Record whether the tree survived re-rooting for this search.
    fn set_tree_reused(&self, reused: bool);

    /// Finish the search and return the snapshot.
    fn complete(&self) -> SearchMetric;
}

#[derive(Debug, Default)]
struct Meta {
    workers: usize,
    cutoff: usize,
    evaluator: &'static str,
    tree_reused: bool,
    started: Option<Instant>,
}

/// Atomic-counter collector.
#[derive(Debug, Default)]
pub struct MetricCollector {
    meta: Mutex<Meta>,
    episodes: AtomicU64,
    full_playouts: AtomicU64,
}

impl MetricCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for MetricCollector {
    fn start(&self, workers: usize, cutoff: usize, evaluator: &'static str) {
        let mut meta = self.meta.lock().expect("metrics lock poisoned");
        *meta = Meta {
            workers,
            cutoff,
            evaluator,
            tree_reused: false,
            started: Some(Instant::now()),
        };
        self.episodes.store(0, Ordering::Relaxed);
        self.full_playouts.store(0, Ordering::Relaxed);
    }

    fn add_episode(&self) {
        self.episodes.fetch_add(1, Ordering::Relaxed);
    }

    fn add_full_playout(&self) {
        self.full_playouts.fetch_add(1, Ordering::Relaxed);
    }

    fn set_tree_reused(&self, reused: bool) {
        let mut meta = self.meta.lock().expect("metrics lock poisoned");
        meta.tree_reused = reused;
    }

    fn complete(&self) -> SearchMetric {
        let meta = self.meta.lock().expect("metrics lock poisoned");
        SearchMetric {
            workers: meta.workers,
            duration: meta.started.map(|s| s.elapsed()).unwrap_or_default(),
            episodes: self.episodes.load(Ordering::Relaxed),
            full_playouts: self.full_playouts.load(Ordering::Relaxed),
            cutoff: meta.cutoff,
            evaluator: meta.evaluator,
            tree_reused: meta.tree_reused,
        }
    }
}

/// Collector that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollector;

impl Collector for NoopCollector {
    fn start(&self, _workers: usize, _cutoff: usize, _evaluator: &'static str) {}
    fn add_episode(&self) {}
    fn add_full_playout(&self) {}
    fn set_tree_reused(&self, _reused: bool) {}

    fn complete(&self) -> SearchMetric {
        SearchMetric::default()
    }
}
