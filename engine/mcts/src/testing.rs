//! Mock games for engine unit tests.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use game_core::{Evaluator, GameMove, GameState};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub(crate) fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Evaluator returning a constant score, for cutoff tests.
pub(crate) struct FixedEvaluator(pub(crate) f64);

impl<S: GameState> Evaluator<S> for FixedEvaluator {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn evaluate(&self, _state: &S) -> f64 {
        self.0
    }
}

/// Deterministic two-move game.
///
/// Every non-terminal state offers `ToOne` (player 1 moves next) and `ToTwo`
/// (player 2 moves next). After `horizon` plies the game ends and player 1
/// wins, whatever was played.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DepthGame {
    pub(crate) depth: u8,
    pub(crate) to_move: u8,
    pub(crate) horizon: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum DepthMove {
    ToOne,
    ToTwo,
}

impl DepthGame {
    pub(crate) fn new(horizon: u8) -> Self {
        Self {
            depth: 0,
            to_move: 1,
            horizon,
        }
    }

    fn over(&self) -> bool {
        self.depth >= self.horizon
    }
}

impl GameMove for DepthMove {
    fn is_stochastic(&self) -> bool {
        false
    }
}

impl GameState for DepthGame {
    type Move = DepthMove;
    type Player = u8;

    fn player(&self) -> u8 {
        self.to_move
    }

    fn legal_moves(&self) -> Vec<DepthMove> {
        if self.over() {
            Vec::new()
        } else {
            vec![DepthMove::ToOne, DepthMove::ToTwo]
        }
    }

    fn play(&self, mv: &DepthMove, _rng: &mut ChaCha20Rng) -> Self {
        Self {
            depth: self.depth + 1,
            to_move: match mv {
                DepthMove::ToOne => 1,
                DepthMove::ToTwo => 2,
            },
            horizon: self.horizon,
        }
    }

    fn hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        Hash::hash(self, &mut hasher);
        hasher.finish()
    }

    fn winner(&self) -> Option<u8> {
        self.over().then_some(1)
    }
}

/// One forced move into a terminal win for player 1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct OneMoveGame {
    pub(crate) done: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct OnlyMove;

impl OneMoveGame {
    pub(crate) fn new() -> Self {
        Self { done: false }
    }
}

impl GameMove for OnlyMove {
    fn is_stochastic(&self) -> bool {
        false
    }
}

impl GameState for OneMoveGame {
    type Move = OnlyMove;
    type Player = u8;

    fn player(&self) -> u8 {
        1
    }

    fn legal_moves(&self) -> Vec<OnlyMove> {
        if self.done {
            Vec::new()
        } else {
            vec![OnlyMove]
        }
    }

    fn play(&self, _mv: &OnlyMove, _rng: &mut ChaCha20Rng) -> Self {
        Self { done: true }
    }

    fn hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        Hash::hash(self, &mut hasher);
        hasher.finish()
    }

    fn winner(&self) -> Option<u8> {
        self.done.then_some(1)
    }
}

/// Stochastic game whose `Flip` move realises two outcomes alternately.
///
/// The alternation counter is shared across clones and excluded from the
/// content hash, so successive plays of `Flip` from the same position
/// produce the two outcome states in a fixed order. `Steady` loses on the
/// spot for player 1, which keeps UCT pointed at `Flip`.
#[derive(Clone, Debug)]
pub(crate) struct CoinGame {
    pub(crate) stage: CoinStage,
    counter: Arc<AtomicUsize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CoinStage {
    Root,
    Outcome(u8),
    Done(u8),
    SteadyLoss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CoinMove {
    Flip,
    Steady,
    Finish,
}

impl CoinGame {
    pub(crate) fn new() -> Self {
        Self {
            stage: CoinStage::Root,
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn at_stage(&self, stage: CoinStage) -> Self {
        Self {
            stage,
            counter: Arc::clone(&self.counter),
        }
    }
}

impl GameMove for CoinMove {
    fn is_stochastic(&self) -> bool {
        matches!(self, CoinMove::Flip)
    }
}

impl GameState for CoinGame {
    type Move = CoinMove;
    type Player = u8;

    fn player(&self) -> u8 {
        match self.stage {
            CoinStage::Root => 1,
            CoinStage::Outcome(_) | CoinStage::SteadyLoss => 2,
            CoinStage::Done(_) => 1,
        }
    }

    fn legal_moves(&self) -> Vec<CoinMove> {
        match self.stage {
            CoinStage::Root => vec![CoinMove::Flip, CoinMove::Steady],
            CoinStage::Outcome(_) => vec![CoinMove::Finish],
            CoinStage::Done(_) | CoinStage::SteadyLoss => Vec::new(),
        }
    }

    fn play(&self, mv: &CoinMove, _rng: &mut ChaCha20Rng) -> Self {
        match (self.stage, mv) {
            (CoinStage::Root, CoinMove::Flip) => {
                let variant = (self.counter.fetch_add(1, Ordering::Relaxed) % 2) as u8;
                self.at_stage(CoinStage::Outcome(variant))
            }
            (CoinStage::Root, CoinMove::Steady) => self.at_stage(CoinStage::SteadyLoss),
            (CoinStage::Outcome(variant), CoinMove::Finish) => self.at_stage(CoinStage::Done(variant)),
            (stage, mv) => panic!("illegal move {mv:?} at {stage:?}"),
        }
    }

    fn hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        Hash::hash(&self.stage, &mut hasher);
        hasher.finish()
    }

    fn winner(&self) -> Option<u8> {
        match self.stage {
            CoinStage::Done(_) => Some(1),
            CoinStage::SteadyLoss => Some(2),
            _ => None,
        }
    }
}
