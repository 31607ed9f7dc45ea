//! Selection-policy primitives shared by both node kinds.

/// Exploration constant, squared, in the UCT formula.
pub const C_SQUARED: f64 = 2.0;

/// Reward credited for a won playout.
pub const WIN: f64 = 1.0;

/// Reward credited for a lost playout.
pub const LOSS: f64 = -WIN;

/// Default rollout depth bound, high enough to mean "play until the end".
pub const MAX_CUTOFF: usize = 10_000;

/// UCT score with the parent-dependent part precomputed.
///
/// Built once per selection step so `c² · ln(N)` is shared across all of a
/// parent's children.
pub(crate) struct Uct {
    numerator: f64,
}

impl Uct {
    pub(crate) fn new(c_squared: f64, parent_visits: f64) -> Self {
        assert!(
            parent_visits > 0.0,
            "cannot compute UCT with zero parent visits"
        );
        Self {
            numerator: c_squared * parent_visits.ln(),
        }
    }

    /// `q/n + sqrt(c² · ln(N) / n)` for a child with reward sum `q` and
    /// visit count `n`.
    pub(crate) fn evaluate(&self, rewards: f64, visits: f64) -> f64 {
        assert!(visits > 0.0, "cannot compute UCT with zero child visits");
        rewards / visits + (self.numerator / visits).sqrt()
    }
}

/// Orient a playout score onto a node.
///
/// `player` is the perspective the score was reported from (`None` for a
/// drawn playout). A node owned by the same player takes the score as-is;
/// any other node takes its negation. This is where the two-player zero-sum
/// assumption lives.
pub(crate) fn oriented_reward<P: PartialEq>(
    player: Option<&P>,
    score: f64,
    node_player: &P,
) -> f64 {
    match player {
        Some(p) if *p == *node_player => score,
        _ => -score,
    }
}
