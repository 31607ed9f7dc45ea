//! Moves and turn phases.

use game_core::GameMove;

use crate::map::TerritoryId;

/// The three phases of a turn, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Place this turn's reinforcements.
    Reinforce,
    /// Launch any number of attacks.
    Attack,
    /// Optionally shift troops along one owned edge, then yield the turn.
    Fortify,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConquestMove {
    /// Place all remaining reinforcements on one owned territory.
    Reinforce { territory: TerritoryId },
    /// Roll dice against an adjacent enemy territory.
    Attack { from: TerritoryId, to: TerritoryId },
    /// Move all but one troop along an owned edge and end the turn.
    Fortify { from: TerritoryId, to: TerritoryId },
    /// Leave the current phase without acting further.
    EndPhase,
}

impl GameMove for ConquestMove {
    fn is_stochastic(&self) -> bool {
        matches!(self, ConquestMove::Attack { .. })
    }
}
