//! Scripted matchups.

use anyhow::Result;
use games_conquest::{ConquestState, Map, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::config::ExperimentConfig;
use crate::driver::run_game;
use crate::records::{ExperimentWriter, GameRow, MoveRow};

/// Run every matchup of the experiment and persist the results.
pub fn run_experiment(config: &ExperimentConfig, writer: &ExperimentWriter) -> Result<()> {
    writer.write_agents(&config.agents)?;
    info!(experiment = %config.name, "stored agent configs");

    let mut game_rows = Vec::new();
    let mut move_rows = Vec::new();
    let mut count = 0u32;

    for (index, (first, second)) in config.matchups.iter().enumerate() {
        info!(
            matchup = index + 1,
            total = config.matchups.len(),
            agent1 = first,
            agent2 = second,
            "starting matchup"
        );

        let spec1 = config.agent(*first);
        let spec2 = config.agent(*second);

        for game in 0..config.games_per_matchup {
            count += 1;
            // Fresh engines per game: trees never leak across games.
            let mut agents = [spec1.build_agent()?, spec2.build_agent()?];
            let mut rng = ChaCha20Rng::from_entropy();

            let report = run_game(
                ConquestState::new(Map::frontier()),
                [Player::One, Player::Two],
                &mut agents,
                config.max_turns,
                &mut rng,
            );

            info!(
                game = game + 1,
                of = config.games_per_matchup,
                winner = %report
                    .winner
                    .map(|player| player.to_string())
                    .unwrap_or_else(|| "none".into()),
                "completed game"
            );

            move_rows.extend(
                report
                    .moves
                    .iter()
                    .map(|mv| MoveRow::from_report(count, mv)),
            );
            game_rows.push(GameRow::from_report(count, *first, *second, &report));
        }
    }

    writer.write_games(&game_rows)?;
    writer.write_moves(&move_rows)?;
    info!(
        games = game_rows.len(),
        moves = move_rows.len(),
        out = %writer.base_dir().display(),
        "experiment complete"
    );
    Ok(())
}
