//! Random-policy playout from a descent terminus.

use game_core::{Evaluator, GameState};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::metrics::Collector;
use crate::uct::WIN;

/// Play uniformly-random legal moves from `state` until the game ends or
/// `cutoff` plies have been played.
///
/// A true terminal yields `(winner, WIN)` and counts as a full playout; a
/// cutoff yields the evaluator's score from the perspective of the player
/// to move.
pub(crate) fn rollout<S: GameState>(
    mut state: S,
    cutoff: usize,
    evaluator: &dyn Evaluator<S>,
    metrics: &dyn Collector,
    rng: &mut ChaCha20Rng,
) -> (Option<S::Player>, f64) {
    let mut depth = 0;
    let mut moves = state.legal_moves();
    while !moves.is_empty() && depth < cutoff {
        let mv = &moves[rng.gen_range(0..moves.len())];
        state = state.play(mv, rng);
        moves = state.legal_moves();
        depth += 1;
    }

    if moves.is_empty() {
        metrics.add_full_playout();
        return (state.winner(), WIN);
    }

    (Some(state.player()), evaluator.evaluate(&state))
}
