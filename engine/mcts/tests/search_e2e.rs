//! End-to-end searches against the conquest game.

use std::sync::Arc;
use std::time::Duration;

use game_core::GameState;
use games_conquest::{ConquestMove, ConquestState, Map, ResourceEvaluator};
use mcts::{Mcts, SearchConfig, Segment};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn engine(workers: usize, episodes: u64) -> Mcts<ConquestState> {
    Mcts::new(
        SearchConfig::new(workers)
            .with_episodes(episodes)
            .with_cutoff(50)
            .with_evaluator(Arc::new(ResourceEvaluator::new()))
            .with_seed(99)
            .with_metrics(),
    )
    .unwrap()
}

#[test]
fn test_search_covers_the_opening_moves() {
    let mut mcts = engine(4, 400);
    let state = ConquestState::new(Map::frontier());

    let (policy, metric) = mcts.simulate(&state, &[]);

    // Four reinforcement options at the opening; enough episodes to have
    // tried every one of them.
    assert_eq!(policy.len(), 4);
    assert!(policy.values().all(|&visits| visits > 0.0));
    assert_eq!(policy.values().sum::<f64>(), 400.0);
    assert_eq!(metric.episodes, 400);
    assert_eq!(metric.workers, 4);
    assert_eq!(metric.cutoff, 50);
    assert_eq!(metric.evaluator, "resources");
    assert!(!metric.tree_reused);
}

#[test]
fn test_second_search_reuses_the_played_line() {
    let mut mcts = engine(2, 200);
    let state = ConquestState::new(Map::frontier());
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let (policy, _) = mcts.simulate(&state, &[]);

    // Play the most-visited move and tell the engine about it.
    let (best, _) = policy
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .expect("non-empty policy");
    let next_state = state.play(best, &mut rng);
    let lineage = vec![Segment::new(*best, next_state.hash())];

    let (next_policy, metric) = mcts.simulate(&next_state, &lineage);

    assert!(metric.tree_reused);
    // The reused subtree had visits before this search started.
    assert!(next_policy.values().sum::<f64>() >= 200.0);
}

#[test]
fn test_lineage_through_an_attack_outcome() {
    let mut mcts = engine(2, 500);
    let state = ConquestState::new(Map::frontier());
    let mut rng = ChaCha20Rng::seed_from_u64(5);

    // Reinforce, then attack: the attack's realised outcome sits under a
    // chance node keyed by its hash.
    let reinforce = ConquestMove::Reinforce { territory: 0 };
    let after_reinforce = state.play(&reinforce, &mut rng);

    mcts.simulate(&state, &[]);

    let attack = ConquestMove::Attack { from: 0, to: 1 };
    let after_attack = after_reinforce.play(&attack, &mut rng);
    let lineage = vec![
        Segment::new(reinforce, after_reinforce.hash()),
        Segment::new(attack, after_attack.hash()),
    ];

    // Whether this realisation was seen during the search decides reuse;
    // either way the next search must come back with a sound policy.
    let (policy, _) = mcts.simulate(&after_attack, &lineage);
    assert!(!policy.is_empty());
    assert!(policy.values().sum::<f64>() >= 500.0);
}

#[test]
fn test_duration_budget_runs_and_stops() {
    let mut mcts: Mcts<ConquestState> = Mcts::new(
        SearchConfig::new(2)
            .with_duration(Duration::from_millis(30))
            .with_cutoff(30)
            .with_metrics(),
    )
    .unwrap();
    let state = ConquestState::new(Map::frontier());

    let (policy, metric) = mcts.simulate(&state, &[]);

    assert!(metric.episodes > 0);
    assert!(metric.duration >= Duration::from_millis(30));
    assert_eq!(policy.values().sum::<f64>(), metric.episodes as f64);
}

#[test]
fn test_rejects_budgetless_configuration() {
    let result = Mcts::<ConquestState>::new(SearchConfig::new(2));
    assert!(result.is_err());
}
