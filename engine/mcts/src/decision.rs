//! Decision nodes: positions where the player to move chooses.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use game_core::{GameMove, GameState};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::chance::Chance;
use crate::node::Node;
use crate::uct::{oriented_reward, Uct, C_SQUARED, LOSS};

/// A decision node.
///
/// The legal moves known at construction are partitioned into an unexplored
/// set and a parallel `(explored, children)` pair; expansion moves one move
/// from the former to the latter. Both partitions empty means the position
/// was terminal when the node was built, and stays that way.
pub(crate) struct Decision<S: GameState> {
    player: S::Player,
    hash: u64,
    inner: RwLock<DecisionState<S>>,
}

struct DecisionState<S: GameState> {
    parent: Weak<Node<S>>,
    unexplored: Vec<S::Move>,
    explored: Vec<S::Move>,
    children: Vec<Arc<Node<S>>>,
    rewards: f64,
    visits: f64,
}

impl<S: GameState> Decision<S> {
    pub(crate) fn new(parent: Weak<Node<S>>, state: &S) -> Self {
        let unexplored = state.legal_moves();
        Self {
            player: state.player(),
            hash: state.hash(),
            inner: RwLock::new(DecisionState {
                parent,
                explored: Vec::with_capacity(unexplored.len()),
                children: Vec::with_capacity(unexplored.len()),
                unexplored,
                rewards: 0.0,
                visits: 0.0,
            }),
        }
    }

    /// Content hash of the position this node stands for.
    pub(crate) fn hash(&self) -> u64 {
        self.hash
    }

    /// One descent step. See [`Node::select_or_expand`] for the contract.
    pub(crate) fn select_or_expand(
        &self,
        self_arc: &Arc<Node<S>>,
        state: S,
        rng: &mut ChaCha20Rng,
    ) -> (Arc<Node<S>>, S, bool) {
        let mut inner = self.inner.write().expect("node lock poisoned");

        if inner.unexplored.is_empty() && inner.explored.is_empty() {
            // Terminal: no legal moves existed at construction.
            drop(inner);
            return (Arc::clone(self_arc), state, false);
        }

        if !inner.unexplored.is_empty() {
            let (child, child_state) = self.expand(&mut inner, self_arc, &state, rng);
            child.apply_loss();
            (child, child_state, false)
        } else {
            let (child, child_state) = self.select(&inner, &state, rng);
            child.apply_loss();
            (child, child_state, true)
        }
    }

    /// Attach a child for a uniformly-random unexplored move.
    fn expand(
        &self,
        inner: &mut DecisionState<S>,
        self_arc: &Arc<Node<S>>,
        state: &S,
        rng: &mut ChaCha20Rng,
    ) -> (Arc<Node<S>>, S) {
        let index = rng.gen_range(0..inner.unexplored.len());
        let mv = inner.unexplored.swap_remove(index);
        let child_state = state.play(&mv, rng);

        let child = if mv.is_stochastic() {
            Arc::new(Node::Chance(Chance::new(
                Arc::downgrade(self_arc),
                self.player.clone(),
            )))
        } else {
            Arc::new(Node::Decision(Decision::new(
                Arc::downgrade(self_arc),
                &child_state,
            )))
        };

        inner.explored.push(mv);
        inner.children.push(Arc::clone(&child));
        (child, child_state)
    }

    /// Pick the explored child maximising UCT and play its move.
    fn select(
        &self,
        inner: &DecisionState<S>,
        state: &S,
        rng: &mut ChaCha20Rng,
    ) -> (Arc<Node<S>>, S) {
        assert!(!inner.children.is_empty(), "selection with no children");

        // Under virtual loss a node can become fully expanded before its own
        // visit count catches up; the child count is a valid lower bound for
        // the descents that have passed through here.
        let parent_visits = inner.visits.max(inner.children.len() as f64);
        let policy = Uct::new(C_SQUARED, parent_visits);

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, child) in inner.children.iter().enumerate() {
            let (player, mut rewards, visits) = child.stats();
            if player != self.player {
                // The opponent moves next there: pick what they hate most.
                rewards = -rewards;
            }
            let score = policy.evaluate(rewards, visits);
            if score > best_score {
                best_score = score;
                best = index;
            }
        }

        let child_state = state.play(&inner.explored[best], rng);
        (Arc::clone(&inner.children[best]), child_state)
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

        // Virtual loss is never applied to the root, so never reversed there.
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

    /// Visit counts of the explored moves.
    pub(crate) fn policy(&self) -> HashMap<S::Move, f64> {
        let inner = self.inner.read().expect("node lock poisoned");
        inner
            .explored
            .iter()
            .cloned()
            .zip(inner.children.iter().map(|child| child.stats().2))
            .collect()
    }

    /// The child attached for `mv`, if that move has been explored.
    pub(crate) fn child_for(&self, mv: &S::Move) -> Option<Arc<Node<S>>> {
        let inner = self.inner.read().expect("node lock poisoned");
        inner
            .explored
            .iter()
            .position(|explored| explored == mv)
            .map(|index| Arc::clone(&inner.children[index]))
    }

    /// Drop the parent edge, making this node a root.
    pub(crate) fn detach(&self) {
        let mut inner = self.inner.write().expect("node lock poisoned");
        inner.parent = Weak::new();
    }
}
