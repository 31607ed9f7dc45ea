use game_core::{Evaluator, GameMove, GameState};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::eval::{BorderEvaluator, ResourceEvaluator};
use crate::map::Map;
use crate::moves::{ConquestMove, Phase};
use crate::state::{ConquestState, Player};

fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

#[test]
fn test_opening_position() {
    let state = ConquestState::new(Map::frontier());

    assert_eq!(state.player(), Player::One);
    assert_eq!(state.phase(), Phase::Reinforce);
    assert!(state.winner().is_none());

    // Interleaved ownership: neither side holds a full region.
    assert_eq!(state.owner(0), Player::One);
    assert_eq!(state.owner(1), Player::Two);
    assert_eq!(state.reinforcement_budget(Player::One), 3);
    assert_eq!(state.reinforcement_budget(Player::Two), 3);
}

#[test]
fn test_reinforce_places_full_budget() {
    let state = ConquestState::new(Map::frontier());
    let moves = state.legal_moves();

    // One reinforce option per owned territory, nothing else.
    assert_eq!(moves.len(), 4);
    assert!(moves
        .iter()
        .all(|mv| matches!(mv, ConquestMove::Reinforce { .. })));

    let next = state.play(&ConquestMove::Reinforce { territory: 0 }, &mut rng(1));
    assert_eq!(next.troops(0), 6);
    assert_eq!(next.phase(), Phase::Attack);
    assert_eq!(next.player(), Player::One);
}

#[test]
fn test_attack_phase_targets_adjacent_enemies() {
    let state = ConquestState::new(Map::frontier());
    let state = state.play(&ConquestMove::Reinforce { territory: 0 }, &mut rng(1));

    let moves = state.legal_moves();
    assert!(moves.contains(&ConquestMove::EndPhase));
    for mv in &moves {
        if let ConquestMove::Attack { from, to } = mv {
            assert_eq!(state.owner(*from), Player::One);
            assert_eq!(state.owner(*to), Player::Two);
            assert!(state.map().adjacent(*from, *to));
            assert!(state.troops(*from) >= 2);
        }
    }
}

#[test]
fn test_attack_is_the_only_stochastic_move() {
    assert!(ConquestMove::Attack { from: 0, to: 1 }.is_stochastic());
    assert!(!ConquestMove::Reinforce { territory: 0 }.is_stochastic());
    assert!(!ConquestMove::Fortify { from: 0, to: 2 }.is_stochastic());
    assert!(!ConquestMove::EndPhase.is_stochastic());
}

#[test]
fn test_attack_conserves_or_removes_troops() {
    let state = ConquestState::new(Map::frontier());
    let state = state.play(&ConquestMove::Reinforce { territory: 0 }, &mut rng(2));

    let before = state.troops(0) + state.troops(1);
    let next = state.play(&ConquestMove::Attack { from: 0, to: 1 }, &mut rng(2));
    let after = next.troops(0) + next.troops(1);

    // Six troops against three rolls three dice against two: the two
    // compared pairs each remove exactly one troop from one side.
    assert_eq!(before - after, 2);
    assert!(next.troops(0) >= 1);
}

#[test]
fn test_repeated_attacks_conquer_with_overwhelming_force() {
    let mut state = ConquestState::new(Map::frontier());
    state.troops[0] = 30;
    state.troops[1] = 1;
    state.phase = Phase::Attack;
    let mut rng = rng(3);

    while state.owner(1) == Player::Two && state.troops(0) >= 2 {
        state = state.play(&ConquestMove::Attack { from: 0, to: 1 }, &mut rng);
    }

    assert_eq!(state.owner(1), Player::One);
    // The survivors of the last exchange moved in; the source keeps at
    // least one troop behind.
    assert!(state.troops(1) >= 1);
    assert!(state.troops(0) >= 1);
}

#[test]
fn test_fortify_moves_stack_and_ends_turn() {
    let state = ConquestState::new(Map::frontier());
    let state = state.play(&ConquestMove::Reinforce { territory: 0 }, &mut rng(1));
    let state = state.play(&ConquestMove::EndPhase, &mut rng(1));
    assert_eq!(state.phase(), Phase::Fortify);

    // 0 and 4 are both player one's, and adjacent across the bridge.
    let before = state.troops(0);
    let next = state.play(&ConquestMove::Fortify { from: 0, to: 4 }, &mut rng(1));

    assert_eq!(next.troops(0), 1);
    assert_eq!(next.troops(4), 3 + before - 1);
    assert_eq!(next.player(), Player::Two);
    assert_eq!(next.phase(), Phase::Reinforce);
    assert!(next.reinforcements >= 3);
}

#[test]
fn test_region_bonus_feeds_reinforcements() {
    let mut state = ConquestState::new(Map::frontier());
    for territory in 0..4 {
        state.owner[territory] = Player::One;
    }

    // Four territories still floor at three, plus the North bonus of two.
    assert_eq!(state.reinforcement_budget(Player::One), 5);
}

#[test]
fn test_winner_owns_everything() {
    let mut state = ConquestState::new(Map::frontier());
    assert!(state.winner().is_none());
    assert!(!state.legal_moves().is_empty());

    for owner in state.owner.iter_mut() {
        *owner = Player::Two;
    }
    assert_eq!(state.winner(), Some(Player::Two));
    assert!(state.legal_moves().is_empty());
}

#[test]
fn test_content_hash_tracks_position() {
    let state = ConquestState::new(Map::frontier());
    let same = ConquestState::new(Map::frontier());
    assert_eq!(state.hash(), same.hash());

    let reinforced = state.play(&ConquestMove::Reinforce { territory: 0 }, &mut rng(1));
    assert_ne!(state.hash(), reinforced.hash());

    // Hash covers content, not identity: replaying the same move from the
    // same position lands on the same hash.
    let again = state.play(&ConquestMove::Reinforce { territory: 0 }, &mut rng(7));
    assert_eq!(reinforced.hash(), again.hash());
}

#[test]
fn test_play_leaves_the_receiver_untouched() {
    let state = ConquestState::new(Map::frontier());
    let hash = state.hash();

    let _ = state.play(&ConquestMove::Reinforce { territory: 2 }, &mut rng(1));

    assert_eq!(state.hash(), hash);
    assert_eq!(state.phase(), Phase::Reinforce);
}

#[test]
fn test_resource_evaluator_is_balanced_at_the_start() {
    let state = ConquestState::new(Map::frontier());
    let score = ResourceEvaluator::new().evaluate(&state);
    assert_eq!(score, 0.0);
}

#[test]
fn test_resource_evaluator_favors_the_stronger_side() {
    let mut state = ConquestState::new(Map::frontier());
    for territory in 0..6 {
        state.owner[territory] = Player::One;
    }

    let score = ResourceEvaluator::new().evaluate(&state);
    assert!(score > 0.0);
    assert!(score <= 1.0);

    // The same position scored from the other side flips sign.
    state.current = Player::Two;
    let flipped = ResourceEvaluator::new().evaluate(&state);
    assert!(flipped < 0.0);
}

#[test]
fn test_border_evaluator_rewards_stacked_borders() {
    let mut state = ConquestState::new(Map::frontier());
    // Pile troops on player one's contested territories.
    state.troops[0] = 10;
    state.troops[2] = 10;

    let resources = ResourceEvaluator::new().evaluate(&state);
    let borders = BorderEvaluator::new().evaluate(&state);
    assert!(borders > resources);
}

#[test]
fn test_evaluator_names() {
    let resources: &dyn Evaluator<ConquestState> = &ResourceEvaluator::new();
    let borders: &dyn Evaluator<ConquestState> = &BorderEvaluator::new();
    assert_eq!(resources.name(), "resources");
    assert_eq!(borders.name(), "borders");
}
