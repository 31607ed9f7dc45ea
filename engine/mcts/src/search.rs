//! Episodes and the parallel search drivers.
//!
//! One episode is the classic descent → rollout → backup cycle. The drivers
//! run episodes from many workers against one shared tree (tree
//! parallelization): per-node locks serialise statistics, and the virtual
//! loss applied on the way down steers concurrent workers apart until the
//! backup reverses it.
//!
//! Workers are cooperatively cancellable at episode boundaries only. An
//! in-flight episode always completes; stopping one midway would leave its
//! virtual losses applied forever.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use game_core::{Evaluator, GameState};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::metrics::Collector;
use crate::node::Node;
use crate::rollout::rollout;

/// Run one episode against `root`.
pub(crate) fn episode<S: GameState>(
    root: &Arc<Node<S>>,
    state: &S,
    cutoff: usize,
    evaluator: &dyn Evaluator<S>,
    metrics: &dyn Collector,
    rng: &mut ChaCha20Rng,
) {
    let (node, state) = descend(root, state.clone(), rng);
    let (player, score) = rollout(state, cutoff, evaluator, metrics, rng);
    backup(node, player.as_ref(), score);
}

/// Selection-and-expansion walk from the root.
///
/// Descent continues while steps are selections of existing children; it
/// ends at the first expansion or at a terminal node (which returns itself).
fn descend<S: GameState>(
    root: &Arc<Node<S>>,
    state: S,
    rng: &mut ChaCha20Rng,
) -> (Arc<Node<S>>, S) {
    let mut parent = Arc::clone(root);
    let (mut child, mut state, mut selected) = parent.select_or_expand(state, rng);
    while selected && !Arc::ptr_eq(&child, &parent) {
        parent = child;
        (child, state, selected) = parent.select_or_expand(state, rng);
    }
    (child, state)
}

/// Propagate the playout outcome from the descent terminus to the root.
fn backup<S: GameState>(mut node: Arc<Node<S>>, player: Option<&S::Player>, score: f64) {
    while let Some(parent) = node.backup(player, score) {
        node = parent;
    }
}

/// Fixed-work driver: `workers` threads drain a shared budget of `episodes`
/// tokens, each token funding one episode.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_episodes<S: GameState>(
    workers: usize,
    episodes: u64,
    cutoff: usize,
    root: &Arc<Node<S>>,
    state: &S,
    evaluator: &dyn Evaluator<S>,
    metrics: &dyn Collector,
    seed: Option<u64>,
) {
    let tokens = AtomicU64::new(episodes);

    thread::scope(|scope| {
        for worker in 0..workers {
            let mut rng = worker_rng(seed, worker);
            let tokens = &tokens;
            scope.spawn(move || {
                while take_token(tokens) {
                    episode(root, state, cutoff, evaluator, metrics, &mut rng);
                    metrics.add_episode();
                }
            });
        }
    });
}

/// Fixed-time driver: workers loop until a timer thread trips the
/// cancellation flag. The flag is polled between episodes, not during them,
/// and costs one relaxed load per episode.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_for<S: GameState>(
    workers: usize,
    duration: Duration,
    cutoff: usize,
    root: &Arc<Node<S>>,
    state: &S,
    evaluator: &dyn Evaluator<S>,
    metrics: &dyn Collector,
    seed: Option<u64>,
) {
    let cancelled = AtomicBool::new(false);

    thread::scope(|scope| {
        let cancelled = &cancelled;
        scope.spawn(move || {
            thread::sleep(duration);
            cancelled.store(true, Ordering::Relaxed);
        });

        for worker in 0..workers {
            let mut rng = worker_rng(seed, worker);
            scope.spawn(move || {
                while !cancelled.load(Ordering::Relaxed) {
                    episode(root, state, cutoff, evaluator, metrics, &mut rng);
                    metrics.add_episode();
                }
            });
        }
    });
}

fn take_token(tokens: &AtomicU64) -> bool {
    tokens
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
        .is_ok()
}

/// Independent RNG stream per worker, derived from the engine seed when one
/// was configured.
fn worker_rng(seed: Option<u64>, worker: usize) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed.wrapping_add(worker as u64)),
        None => ChaCha20Rng::from_entropy(),
    }
}
