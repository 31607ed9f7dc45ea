//! The search engine: root lifecycle, subtree reuse, and the `simulate`
//! entrypoint.
//!
//! One `Mcts` value accompanies one side through a whole game. Between
//! successive `simulate` calls the caller reports the moves actually played
//! (its own and the opponent's) as a lineage of `(move, state hash)`
//! segments; the engine walks the old tree along that lineage and, when
//! every step checks out, promotes the surviving node to root so its
//! accumulated statistics carry over. Any mismatch discards the tree and
//! starts fresh; re-rooting never fails a search.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use game_core::GameState;
use tracing::debug;

use crate::config::{ConfigError, SearchConfig};
use crate::decision::Decision;
use crate::metrics::{Collector, MetricCollector, NoopCollector, SearchMetric};
use crate::node::Node;
use crate::search::{run_episodes, run_for};

/// One step of the moves played since the previous `simulate` call.
pub struct Segment<S: GameState> {
    /// The move that was played.
    pub mv: S::Move,
    /// Content hash of the state the move produced.
    pub state_hash: u64,
}

impl<S: GameState> Segment<S> {
    pub fn new(mv: S::Move, state_hash: u64) -> Self {
        Self { mv, state_hash }
    }
}

impl<S: GameState> Clone for Segment<S> {
    fn clone(&self) -> Self {
        Self {
            mv: self.mv.clone(),
            state_hash: self.state_hash,
        }
    }
}

impl<S: GameState> std::fmt::Debug for Segment<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segment")
            .field("mv", &self.mv)
            .field("state_hash", &self.state_hash)
            .finish()
    }
}

/// Parallel Monte Carlo Tree Search over one game.
pub struct Mcts<S: GameState> {
    config: SearchConfig<S>,
    root: Option<Arc<Node<S>>>,
    collector: Box<dyn Collector>,
}

impl<S: GameState> Mcts<S> {
    /// Build an engine from a validated configuration.
    pub fn new(config: SearchConfig<S>) -> Result<Self, ConfigError> {
        config.validate()?;
        let collector: Box<dyn Collector> = if config.metrics {
            Box::new(MetricCollector::new())
        } else {
            Box::new(NoopCollector)
        };
        Ok(Self {
            config,
            root: None,
            collector,
        })
    }

    /// Search from `state` and return the visit-count policy over the
    /// root's explored moves, plus the metrics of this search.
    ///
    /// `lineage` lists every move played on this game since the previous
    /// `simulate` call, oldest first, with the content hash of each
    /// resulting state. Pass an empty lineage on the first call.
    pub fn simulate(
        &mut self,
        state: &S,
        lineage: &[Segment<S>],
    ) -> (HashMap<S::Move, f64>, SearchMetric) {
        self.collector.start(
            self.config.workers,
            self.config.cutoff,
            self.config.evaluator.name(),
        );

        let root = self.find_subtree(state, lineage);
        self.root = Some(Arc::clone(&root));

        if self.config.episodes > 0 {
            run_episodes(
                self.config.workers,
                self.config.episodes,
                self.config.cutoff,
                &root,
                state,
                self.config.evaluator.as_ref(),
                self.collector.as_ref(),
                self.config.seed,
            );
        } else if let Some(duration) = self.config.duration {
            run_for(
                self.config.workers,
                duration,
                self.config.cutoff,
                &root,
                state,
                self.config.evaluator.as_ref(),
                self.collector.as_ref(),
                self.config.seed,
            );
        } else {
            unreachable!("budget enforced at construction");
        }

        let metric = self.collector.complete();
        let policy = root.as_decision().policy();
        (policy, metric)
    }

    /// Walk the previous tree along `lineage` and promote the surviving
    /// node to root, or discard everything and start fresh.
    fn find_subtree(&mut self, state: &S, lineage: &[Segment<S>]) -> Arc<Node<S>> {
        let Some(previous) = self.root.take() else {
            return self.reset(state);
        };

        let mut node = previous;
        for segment in lineage {
            let Some(child) = node.as_decision().child_for(&segment.mv) else {
                debug!(?segment, "lineage move not in tree, discarding");
                return self.reset(state);
            };

            let next = match child.as_ref() {
                Node::Decision(decision) if decision.hash() == segment.state_hash => {
                    Some(Arc::clone(&child))
                }
                Node::Decision(_) => None,
                Node::Chance(chance) => chance.outcome_for(segment.state_hash),
            };
            let Some(next) = next else {
                debug!(?segment, "lineage state not in tree, discarding");
                return self.reset(state);
            };
            node = next;
        }

        if node.as_decision().hash() != state.hash() {
            debug!("surviving node does not match the search state, discarding");
            return self.reset(state);
        }

        node.as_decision().detach();
        self.collector.set_tree_reused(true);
        debug!("reusing subtree");
        node
    }

    fn reset(&self, state: &S) -> Arc<Node<S>> {
        self.collector.set_tree_reused(false);
        Arc::new(Node::Decision(Decision::new(Weak::new(), state)))
    }
}

impl<S: GameState> std::fmt::Debug for Mcts<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mcts")
            .field("config", &self.config)
            .field("has_tree", &self.root.is_some())
            .finish()
    }
}
