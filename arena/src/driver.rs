//! Local game loop: two agents over one canonical state.

use std::time::{Duration, Instant, SystemTime};

use game_core::GameState;
use mcts::{SearchMetric, Segment};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::agent::Agent;

/// Everything recorded about one finished game.
pub struct GameReport<S: GameState> {
    pub starting_player: S::Player,
    /// `None` when the turn cap stopped an undecided game.
    pub winner: Option<S::Player>,
    pub started_at: SystemTime,
    pub finished_at: SystemTime,
    pub duration: Duration,
    pub moves: Vec<MoveReport<S::Player>>,
}

/// Per-move record: who searched, and what the search reported.
pub struct MoveReport<P> {
    pub step: usize,
    pub player: P,
    pub metric: SearchMetric,
}

/// Alternate the two agents from `initial` until a winner emerges or
/// `max_turns` moves have been played.
///
/// Each agent keeps a pending-lineage buffer that accumulates every move
/// played, its own and the opponent's, and is drained into its next
/// search, so both engines can re-root their trees along the line actually
/// played.
pub fn run_game<S: GameState>(
    initial: S,
    players: [S::Player; 2],
    agents: &mut [Box<dyn Agent<S>>; 2],
    max_turns: usize,
    rng: &mut ChaCha20Rng,
) -> GameReport<S> {
    let started_at = SystemTime::now();
    let clock = Instant::now();

    let starting_player = initial.player();
    let mut state = initial;
    let mut pending: [Vec<Segment<S>>; 2] = [Vec::new(), Vec::new()];
    let mut moves = Vec::new();

    for step in 0..max_turns {
        if state.winner().is_some() {
            break;
        }

        let player = state.player();
        let seat = players
            .iter()
            .position(|candidate| *candidate == player)
            .expect("player without a seat");

        let lineage = std::mem::take(&mut pending[seat]);
        let (mv, metric) = agents[seat].find_move(&state, &lineage);
        debug!(step, player = ?player, mv = ?mv, "move chosen");

        state = state.play(&mv, rng);
        let segment = Segment::new(mv, state.hash());
        for buffer in &mut pending {
            buffer.push(segment.clone());
        }

        moves.push(MoveReport {
            step,
            player,
            metric,
        });
    }

    let winner = state.winner();
    match &winner {
        Some(player) => info!(winner = ?player, moves = moves.len(), "game over"),
        None => info!(moves = moves.len(), "turn cap reached with no winner"),
    }

    GameReport {
        starting_player,
        winner,
        started_at,
        finished_at: SystemTime::now(),
        duration: clock.elapsed(),
        moves,
    }
}
