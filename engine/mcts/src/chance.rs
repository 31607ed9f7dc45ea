//! Chance nodes: the pending outcome of a stochastic move.
//!
//! The parent decision node already realised an outcome when it played the
//! move; a chance node merely indexes realised outcomes by their content
//! hash so that repeated realisations of the same successor share one
//! subtree.

use std::sync::{Arc, RwLock, Weak};

use game_core::GameState;

use crate::decision::Decision;
use crate::node::Node;
use crate::uct::{oriented_reward, LOSS};

pub(crate) struct Chance<S: GameState> {
    /// The player who took the stochastic move.
    player: S::Player,
    inner: RwLock<ChanceState<S>>,
}

struct ChanceState<S: GameState> {
    parent: Weak<Node<S>>,
    /// Realised outcomes, each a decision node keyed by its state hash.
    outcomes: Vec<Arc<Node<S>>>,
    rewards: f64,
    visits: f64,
}

impl<S: GameState> Chance<S> {
    pub(crate) fn new(parent: Weak<Node<S>>, player: S::Player) -> Self {
        Self {
            player,
            inner: RwLock::new(ChanceState {
                parent,
                outcomes: Vec::new(),
                rewards: 0.0,
                visits: 0.0,
            }),
        }
    }

    /// One descent step: index the realised outcome in `state`.
    ///
    /// A known outcome counts as a selection and descent continues through
    /// it; an unseen one is attached as a fresh decision node and ends the
    /// descent.
    pub(crate) fn select_or_expand(
        &self,
        self_arc: &Arc<Node<S>>,
        state: S,
    ) -> (Arc<Node<S>>, S, bool) {
        let hash = state.hash();
        let mut inner = self.inner.write().expect("node lock poisoned");

        if let Some(child) = inner
            .outcomes
            .iter()
            .find(|outcome| outcome.as_decision().hash() == hash)
        {
            let child = Arc::clone(child);
            child.apply_loss();
            return (child, state, true);
        }

        let child = Arc::new(Node::Decision(Decision::new(
            Arc::downgrade(self_arc),
            &state,
        )));
        inner.outcomes.push(Arc::clone(&child));
        child.apply_loss();
        (child, state, false)
    }

    /// The outcome child with the given state hash, if realised before.
    pub(crate) fn outcome_for(&self, hash: u64) -> Option<Arc<Node<S>>> {
        let inner = self.inner.read().expect("node lock poisoned");
        inner
            .outcomes
            .iter()
            .find(|outcome| outcome.as_decision().hash() == hash)
            .cloned()
    }

    pub(crate) fn apply_loss(&self) {
        let mut inner = self.inner.write().expect("node lock poisoned");
        inner.rewards += LOSS;
        inner.visits += 1.0;
    }

    pub(crate) fn backup(
        &self,
        player: Option<&S::Player>,
        score: f64,
    ) -> Option<Arc<Node<S>>> {
        let mut inner = self.inner.write().expect("node lock poisoned");
        let parent = inner.parent.upgrade();

        if parent.is_some() {
            inner.rewards -= LOSS;
            inner.visits -= 1.0;
        }

        inner.rewards += oriented_reward(player, score, &self.player);
        inner.visits += 1.0;
        parent
    }

    pub(crate) fn stats(&self) -> (S::Player, f64, f64) {
        let inner = self.inner.read().expect("node lock poisoned");
        (self.player.clone(), inner.rewards, inner.visits)
    }
}
