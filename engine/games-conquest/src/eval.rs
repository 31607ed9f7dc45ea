//! Heuristic position evaluators for rollout cutoffs.

use game_core::{Evaluator, GameState};

use crate::state::{ConquestState, Player};

/// Tallies each player's controlled resources (territories, troops, and
/// region bonuses) into a relative score in `[-1, +1]` from the current
/// player's perspective.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceEvaluator;

impl ResourceEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<ConquestState> for ResourceEvaluator {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn evaluate(&self, state: &ConquestState) -> f64 {
        let (territory_score, troop_score) = resource_scores(state);
        let bonus_score = bonus_score(state);
        (territory_score + troop_score + bonus_score) / 3.0
    }
}

/// [`ResourceEvaluator`] plus a border-strength term: troop surplus along
/// edges facing the enemy, which rewards connectedness and chokepoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorderEvaluator;

impl BorderEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<ConquestState> for BorderEvaluator {
    fn name(&self) -> &'static str {
        "borders"
    }

    fn evaluate(&self, state: &ConquestState) -> f64 {
        let (territory_score, troop_score) = resource_scores(state);
        let bonus_score = bonus_score(state);
        let border_score = border_score(state);
        (territory_score + troop_score + bonus_score + border_score) / 4.0
    }
}

fn resource_scores(state: &ConquestState) -> (f64, f64) {
    let current = state.player();
    let mut territories = [0.0f64; 2];
    let mut troops = [0.0f64; 2];

    for (index, &owner) in state.owner.iter().enumerate() {
        let side = side_of(owner, current);
        territories[side] += 1.0;
        troops[side] += f64::from(state.troops[index]);
    }

    (
        normalize(territories[0], territories[1]),
        normalize(troops[0], troops[1]),
    )
}

fn bonus_score(state: &ConquestState) -> f64 {
    let current = state.player();
    let mut bonuses = [0.0f64; 2];

    for region in &state.map.regions {
        let first = state.owner(region.territories[0]);
        if region
            .territories
            .iter()
            .all(|&territory| state.owner(territory) == first)
        {
            bonuses[side_of(first, current)] += f64::from(region.bonus);
        }
    }

    normalize(bonuses[0], bonuses[1])
}

fn border_score(state: &ConquestState) -> f64 {
    let current = state.player();
    let mut strength = [0.0f64; 2];

    for (index, &owner) in state.owner.iter().enumerate() {
        let mine = f64::from(state.troops[index]);
        for &neighbor in &state.map.territories[index].adjacent {
            if state.owner(neighbor) != owner {
                let theirs = f64::from(state.troops(neighbor));
                // Troop surplus along a contested edge mimics a line of
                // attack; one troop always stays behind.
                strength[side_of(owner, current)] += (mine - 1.0) - theirs;
            }
        }
    }

    // Border strength can go negative on both sides; scale by magnitude so
    // the term stays within [-1, +1].
    let magnitude = strength[0].abs() + strength[1].abs();
    if magnitude == 0.0 {
        return 0.0;
    }
    (strength[0] - strength[1]) / magnitude
}

fn side_of(owner: Player, current: Player) -> usize {
    if owner == current {
        0
    } else {
        1
    }
}

/// Relative score of `value` against `other`, in `[-1, +1]`.
fn normalize(value: f64, other: f64) -> f64 {
    let total = value + other;
    if total == 0.0 {
        return 0.0;
    }
    (value - other) / total
}
