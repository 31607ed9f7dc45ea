//! Game state and move contracts consumed by the search engine.
//!
//! A `GameState` is an immutable value: `play` never mutates the receiver
//! and instead returns the successor position. This is what lets search
//! workers share one root state and evolve private copies without
//! synchronisation.

use std::fmt::Debug;
use std::hash::Hash;

use rand_chacha::ChaCha20Rng;

/// An action a player can take from some game state.
///
/// Moves are used as map keys at decision points, hence the `Eq + Hash`
/// requirement.
pub trait GameMove: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Whether playing this move involves a random outcome (dice, draws).
    ///
    /// Stochastic moves are resolved inside [`GameState::play`]; the engine
    /// never samples outcomes itself. It only groups the realised successor
    /// states by their content hash.
    fn is_stochastic(&self) -> bool;
}

/// A complete, immutable game position.
pub trait GameState: Clone + Send + Sync + 'static {
    type Move: GameMove;
    type Player: Clone + Eq + Debug + Send + Sync + 'static;

    /// The player to act in this position.
    fn player(&self) -> Self::Player;

    /// All moves legal in this position. Empty exactly when the game is over.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play a move and return the successor position.
    ///
    /// Must be total on moves returned by [`legal_moves`](Self::legal_moves).
    /// Stochastic moves draw their outcome from `rng` here; deterministic
    /// moves must ignore it.
    fn play(&self, mv: &Self::Move, rng: &mut ChaCha20Rng) -> Self;

    /// A 64-bit content hash of the position.
    ///
    /// Two positions with equal content must hash equally within one
    /// process; the engine keys realised stochastic outcomes by this value
    /// and assumes collisions do not occur.
    fn hash(&self) -> u64;

    /// The winner, or `None` while the game is still running.
    ///
    /// `None` at a position with no legal moves is read as a draw.
    fn winner(&self) -> Option<Self::Player>;
}
