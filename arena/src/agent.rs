//! Agents: turning a visit-count policy into a move.

use std::collections::HashMap;

use game_core::GameState;
use mcts::{Mcts, SearchMetric, Segment};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::warn;

/// Something that picks a move for the side to act.
pub trait Agent<S: GameState> {
    /// Search from `state` and choose a move. `lineage` lists every move
    /// played on this game since this agent's previous call.
    fn find_move(&mut self, state: &S, lineage: &[Segment<S>]) -> (S::Move, SearchMetric);
}

/// Agent for actual game play: picks the most-visited root move.
pub struct SearchAgent<S: GameState> {
    mcts: Mcts<S>,
}

impl<S: GameState> SearchAgent<S> {
    pub fn new(mcts: Mcts<S>) -> Self {
        Self { mcts }
    }
}

impl<S: GameState> Agent<S> for SearchAgent<S> {
    fn find_move(&mut self, state: &S, lineage: &[Segment<S>]) -> (S::Move, SearchMetric) {
        let (policy, metric) = self.mcts.simulate(state, lineage);
        let mv = policy
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(mv, _)| mv)
            .unwrap_or_else(|| fallback_move(state));
        (mv, metric)
    }
}

/// Agent for self-play: samples from the temperature-adjusted policy, so
/// repeated games explore different lines.
pub struct TrainingAgent<S: GameState> {
    mcts: Mcts<S>,
    temperature: f64,
    rng: ChaCha20Rng,
}

impl<S: GameState> TrainingAgent<S> {
    pub fn new(mcts: Mcts<S>, temperature: f64, rng: ChaCha20Rng) -> Self {
        Self {
            mcts,
            temperature,
            rng,
        }
    }
}

impl<S: GameState> Agent<S> for TrainingAgent<S> {
    fn find_move(&mut self, state: &S, lineage: &[Segment<S>]) -> (S::Move, SearchMetric) {
        let (policy, metric) = self.mcts.simulate(state, lineage);
        if policy.is_empty() {
            return (fallback_move(state), metric);
        }
        let weighted = adjust_temperature(policy, self.temperature);
        (sample(weighted, &mut self.rng), metric)
    }
}

/// An empty policy means the search never expanded the root, which a
/// healthy engine only produces on a malformed call; fall back to the
/// first legal move rather than abort the game.
fn fallback_move<S: GameState>(state: &S) -> S::Move {
    warn!("empty policy, falling back to the first legal move");
    state
        .legal_moves()
        .into_iter()
        .next()
        .expect("no legal moves at all")
}

/// Raise visit counts to `1/temperature` and normalise into probabilities.
fn adjust_temperature<M: std::hash::Hash + Eq>(
    policy: HashMap<M, f64>,
    temperature: f64,
) -> Vec<(M, f64)> {
    let exponent = 1.0 / temperature;
    let mut adjusted: Vec<(M, f64)> = policy
        .into_iter()
        .map(|(mv, visits)| (mv, visits.powf(exponent)))
        .collect();
    let total: f64 = adjusted.iter().map(|(_, weight)| weight).sum();
    for (_, weight) in &mut adjusted {
        *weight /= total;
    }
    adjusted
}

fn sample<M>(weighted: Vec<(M, f64)>, rng: &mut ChaCha20Rng) -> M {
    let drawn: f64 = rng.gen();
    let mut cumulative = 0.0;
    let mut fallback = None;
    for (mv, probability) in weighted {
        cumulative += probability;
        if drawn < cumulative {
            return mv;
        }
        // Rounding can leave the draw past the last bucket.
        fallback = Some(mv);
    }
    fallback.expect("sampled from an empty policy")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_temperature_one_is_proportional() {
        let mut policy = HashMap::new();
        policy.insert("a", 30.0);
        policy.insert("b", 70.0);

        let adjusted = adjust_temperature(policy, 1.0);
        let lookup: HashMap<_, _> = adjusted.into_iter().collect();
        assert!((lookup["a"] - 0.3).abs() < 1e-9);
        assert!((lookup["b"] - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_low_temperature_sharpens() {
        let mut policy = HashMap::new();
        policy.insert("a", 30.0);
        policy.insert("b", 70.0);

        let adjusted = adjust_temperature(policy, 0.5);
        let lookup: HashMap<_, _> = adjusted.into_iter().collect();
        // Squaring the counts pushes mass towards the favourite.
        assert!(lookup["b"] > 0.8);
        assert!((lookup["a"] + lookup["b"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sampling_respects_weights() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut counts = HashMap::new();

        for _ in 0..1000 {
            let weighted = vec![("a", 0.2), ("b", 0.8)];
            *counts.entry(sample(weighted, &mut rng)).or_insert(0u32) += 1;
        }

        assert!(counts["b"] > counts["a"]);
        assert!(counts["a"] > 100);
    }
}
