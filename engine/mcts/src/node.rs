//! The two node kinds and their shared operation set.
//!
//! Decision nodes sit at positions where a player chooses; chance nodes sit
//! behind stochastic moves and group realised outcomes. Every node owns its
//! children through `Arc`s and points back at its parent through a `Weak`
//! held under the node's lock. Backup follows it upward; nothing ever
//! traverses it downward.

use std::sync::Arc;

use game_core::GameState;
use rand_chacha::ChaCha20Rng;

use crate::chance::Chance;
use crate::decision::Decision;

pub(crate) enum Node<S: GameState> {
    Decision(Decision<S>),
    Chance(Chance<S>),
}

impl<S: GameState> Node<S> {
    /// The decision variant, or a panic: callers reach for this only where
    /// the tree shape guarantees it (roots, chance outcomes).
    pub(crate) fn as_decision(&self) -> &Decision<S> {
        match self {
            Node::Decision(decision) => decision,
            Node::Chance(_) => panic!("expected a decision node"),
        }
    }

    /// One descent step, serialised on this node's lock.
    ///
    /// Returns `(child, child_state, was_selected)`:
    /// - terminal decision node: `(self, state, false)`; descent is over
    /// - expansion (unexplored move or unseen outcome): the new child with
    ///   one virtual loss applied, `false`;
    /// - selection (UCT pick or known outcome): the chosen child with one
    ///   virtual loss applied, `true`.
    pub(crate) fn select_or_expand(
        self: &Arc<Self>,
        state: S,
        rng: &mut ChaCha20Rng,
    ) -> (Arc<Node<S>>, S, bool) {
        match self.as_ref() {
            Node::Decision(decision) => decision.select_or_expand(self, state, rng),
            Node::Chance(chance) => chance.select_or_expand(self, state),
        }
    }

    /// Bias concurrent selectors away from this subtree while an episode is
    /// in flight below it. Reversed exactly once, in [`Node::backup`].
    pub(crate) fn apply_loss(&self) {
        match self {
            Node::Decision(decision) => decision.apply_loss(),
            Node::Chance(chance) => chance.apply_loss(),
        }
    }

    /// Fold a playout outcome into this node and return the parent to
    /// continue the ascent, or `None` at the root.
    pub(crate) fn backup(
        &self,
        player: Option<&S::Player>,
        score: f64,
    ) -> Option<Arc<Node<S>>> {
        match self {
            Node::Decision(decision) => decision.backup(player, score),
            Node::Chance(chance) => chance.backup(player, score),
        }
    }

    /// Read-lock snapshot of `(player, rewards, visits)`.
    pub(crate) fn stats(&self) -> (S::Player, f64, f64) {
        match self {
            Node::Decision(decision) => decision.stats(),
            Node::Chance(chance) => chance.stats(),
        }
    }
}
