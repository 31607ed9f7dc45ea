//! CSV persistence for experiment results.
//!
//! Each experiment run gets its own timestamped directory holding three
//! files: `agents.csv` (the configurations), `games.csv` (one row per
//! game), and `moves.csv` (one row per search).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use games_conquest::{ConquestState, Player};

use crate::config::AgentSpec;
use crate::driver::{GameReport, MoveReport};

/// One row of `games.csv`.
pub struct GameRow {
    pub id: u32,
    pub agent1: u32,
    pub agent2: u32,
    pub starting_player: String,
    pub winner: String,
    pub started_at: u64,
    pub finished_at: u64,
    pub duration_ms: u128,
    pub moves: usize,
}

impl GameRow {
    pub fn from_report(id: u32, agent1: u32, agent2: u32, report: &GameReport<ConquestState>) -> Self {
        Self {
            id,
            agent1,
            agent2,
            starting_player: report.starting_player.to_string(),
            winner: report
                .winner
                .map(|player| player.to_string())
                .unwrap_or_default(),
            started_at: unix_seconds(report.started_at),
            finished_at: unix_seconds(report.finished_at),
            duration_ms: report.duration.as_millis(),
            moves: report.moves.len(),
        }
    }
}

/// One row of `moves.csv`.
pub struct MoveRow {
    pub game: u32,
    pub step: usize,
    pub player: String,
    pub workers: usize,
    pub duration_ms: u128,
    pub episodes: u64,
    pub full_playouts: u64,
    pub cutoff: usize,
    pub evaluator: String,
    pub tree_reused: bool,
}

impl MoveRow {
    pub fn from_report(game: u32, report: &MoveReport<Player>) -> Self {
        Self {
            game,
            step: report.step,
            player: report.player.to_string(),
            workers: report.metric.workers,
            duration_ms: report.metric.duration.as_millis(),
            episodes: report.metric.episodes,
            full_playouts: report.metric.full_playouts,
            cutoff: report.metric.cutoff,
            evaluator: report.metric.evaluator.to_string(),
            tree_reused: report.metric.tree_reused,
        }
    }
}

/// Writes one experiment run under `<out>/<experiment>/<unix-timestamp>/`.
pub struct ExperimentWriter {
    base: PathBuf,
}

impl ExperimentWriter {
    pub fn new(out_dir: &Path, experiment: &str) -> Result<Self> {
        let timestamp = unix_seconds(SystemTime::now());
        let base = out_dir.join(experiment).join(timestamp.to_string());
        fs::create_dir_all(&base)
            .with_context(|| format!("creating experiment directory {}", base.display()))?;
        Ok(Self { base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn write_agents(&self, agents: &[AgentSpec]) -> Result<()> {
        let mut out = self.file("agents.csv")?;
        writeln!(out, "id,workers,duration_ms,episodes,cutoff,evaluator")?;
        for agent in agents {
            writeln!(
                out,
                "{},{},{},{},{},{}",
                agent.id,
                agent.workers,
                agent.duration_ms,
                agent.episodes,
                agent.cutoff.map(|c| c.to_string()).unwrap_or_default(),
                agent.evaluator,
            )?;
        }
        Ok(out.flush()?)
    }

    pub fn write_games(&self, rows: &[GameRow]) -> Result<()> {
        let mut out = self.file("games.csv")?;
        writeln!(
            out,
            "id,agent1,agent2,starting_player,winner,started_at,finished_at,duration_ms,moves"
        )?;
        for row in rows {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{}",
                row.id,
                row.agent1,
                row.agent2,
                row.starting_player,
                row.winner,
                row.started_at,
                row.finished_at,
                row.duration_ms,
                row.moves,
            )?;
        }
        Ok(out.flush()?)
    }

    pub fn write_moves(&self, rows: &[MoveRow]) -> Result<()> {
        let mut out = self.file("moves.csv")?;
        writeln!(
            out,
            "game,step,player,workers,duration_ms,episodes,full_playouts,cutoff,evaluator,tree_reused"
        )?;
        for row in rows {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{}",
                row.game,
                row.step,
                row.player,
                row.workers,
                row.duration_ms,
                row.episodes,
                row.full_playouts,
                row.cutoff,
                row.evaluator,
                row.tree_reused,
            )?;
        }
        Ok(out.flush()?)
    }

    fn file(&self, name: &str) -> Result<BufWriter<File>> {
        let path = self.base.join(name);
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        Ok(BufWriter::new(file))
    }
}

fn unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
