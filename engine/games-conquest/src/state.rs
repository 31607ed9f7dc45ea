//! Game state and rules.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use game_core::GameState;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::map::{Map, TerritoryId};
use crate::moves::{ConquestMove, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player1"),
            Player::Two => write!(f, "Player2"),
        }
    }
}

/// A full game position.
///
/// The map is shared and immutable; everything else is the mutable position
/// the content hash covers.
#[derive(Clone, Debug)]
pub struct ConquestState {
    pub(crate) map: Arc<Map>,
    pub(crate) owner: Vec<Player>,
    pub(crate) troops: Vec<u16>,
    pub(crate) current: Player,
    pub(crate) phase: Phase,
    pub(crate) reinforcements: u8,
}

impl ConquestState {
    /// Opening position: territories interleaved between the players, three
    /// troops each, player one about to reinforce.
    pub fn new(map: Arc<Map>) -> Self {
        let owner: Vec<Player> = (0..map.len())
            .map(|territory| {
                if territory % 2 == 0 {
                    Player::One
                } else {
                    Player::Two
                }
            })
            .collect();
        let troops = vec![3; map.len()];

        let mut state = Self {
            map,
            owner,
            troops,
            current: Player::One,
            phase: Phase::Reinforce,
            reinforcements: 0,
        };
        state.reinforcements = state.reinforcement_budget(Player::One);
        state
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn owner(&self, territory: TerritoryId) -> Player {
        self.owner[territory as usize]
    }

    pub fn troops(&self, territory: TerritoryId) -> u16 {
        self.troops[territory as usize]
    }

    fn owned_by(&self, player: Player) -> impl Iterator<Item = TerritoryId> + '_ {
        self.owner
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == player)
            .map(|(territory, _)| territory as TerritoryId)
    }

    /// Troops granted at the start of a turn: one per three territories
    /// (minimum three) plus the bonus of each fully-held region.
    pub fn reinforcement_budget(&self, player: Player) -> u8 {
        let owned = self.owned_by(player).count() as u8;
        let mut budget = (owned / 3).max(3);
        for region in &self.map.regions {
            if region
                .territories
                .iter()
                .all(|&territory| self.owner(territory) == player)
            {
                budget += region.bonus;
            }
        }
        budget
    }

    fn conquered(&self) -> Option<Player> {
        let first = self.owner[0];
        self.owner
            .iter()
            .all(|&owner| owner == first)
            .then_some(first)
    }

    fn end_turn(&mut self) {
        self.current = self.current.opponent();
        self.phase = Phase::Reinforce;
        self.reinforcements = self.reinforcement_budget(self.current);
    }

    /// One exchange of dice: up to three attacking dice against up to two
    /// defending dice, highest pairs compared, ties to the defender. On
    /// conquest the surviving attacking dice move in.
    fn resolve_attack(&mut self, from: TerritoryId, to: TerritoryId, rng: &mut ChaCha20Rng) {
        let attacker_dice = (self.troops(from) - 1).min(3) as u8;
        let defender_dice = self.troops(to).min(2) as u8;

        let attack_rolls = roll(rng, attacker_dice);
        let defend_rolls = roll(rng, defender_dice);

        for (attack, defend) in attack_rolls.iter().zip(defend_rolls.iter()) {
            if attack > defend {
                self.troops[to as usize] -= 1;
            } else {
                self.troops[from as usize] -= 1;
            }
        }

        if self.troops(to) == 0 {
            self.owner[to as usize] = self.current;
            let moving = (attacker_dice as u16).min(self.troops(from) - 1);
            self.troops[from as usize] -= moving;
            self.troops[to as usize] = moving;
        }
    }
}

fn roll(rng: &mut ChaCha20Rng, count: u8) -> Vec<u8> {
    let mut dice: Vec<u8> = (0..count).map(|_| rng.gen_range(1..=6)).collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

impl GameState for ConquestState {
    type Move = ConquestMove;
    type Player = Player;

    fn player(&self) -> Player {
        self.current
    }

    fn legal_moves(&self) -> Vec<ConquestMove> {
        if self.conquered().is_some() {
            return Vec::new();
        }

        let mut moves = Vec::new();
        match self.phase {
            Phase::Reinforce => {
                for territory in self.owned_by(self.current) {
                    moves.push(ConquestMove::Reinforce { territory });
                }
            }
            Phase::Attack => {
                for from in self.owned_by(self.current) {
                    if self.troops(from) < 2 {
                        continue;
                    }
                    for &to in &self.map.territories[from as usize].adjacent {
                        if self.owner(to) != self.current {
                            moves.push(ConquestMove::Attack { from, to });
                        }
                    }
                }
                moves.push(ConquestMove::EndPhase);
            }
            Phase::Fortify => {
                for from in self.owned_by(self.current) {
                    if self.troops(from) < 2 {
                        continue;
                    }
                    for &to in &self.map.territories[from as usize].adjacent {
                        if self.owner(to) == self.current {
                            moves.push(ConquestMove::Fortify { from, to });
                        }
                    }
                }
                moves.push(ConquestMove::EndPhase);
            }
        }
        moves
    }

    fn play(&self, mv: &ConquestMove, rng: &mut ChaCha20Rng) -> Self {
        let mut next = self.clone();
        match *mv {
            ConquestMove::Reinforce { territory } => {
                next.troops[territory as usize] += next.reinforcements as u16;
                next.reinforcements = 0;
                next.phase = Phase::Attack;
            }
            ConquestMove::Attack { from, to } => {
                next.resolve_attack(from, to, rng);
            }
            ConquestMove::Fortify { from, to } => {
                let moving = next.troops(from) - 1;
                next.troops[from as usize] -= moving;
                next.troops[to as usize] += moving;
                next.end_turn();
            }
            ConquestMove::EndPhase => match next.phase {
                Phase::Attack => next.phase = Phase::Fortify,
                Phase::Reinforce | Phase::Fortify => next.end_turn(),
            },
        }
        next
    }

    fn hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.owner.hash(&mut hasher);
        self.troops.hash(&mut hasher);
        self.current.hash(&mut hasher);
        self.phase.hash(&mut hasher);
        self.reinforcements.hash(&mut hasher);
        hasher.finish()
    }

    fn winner(&self) -> Option<Player> {
        self.conquered()
    }
}
