//! Experiment definitions.
//!
//! An experiment is a set of agent configurations, a list of matchups
//! between them, and a game count per matchup. Definitions load from TOML:
//!
//! ```toml
//! name = "volume"
//! games_per_matchup = 10
//! matchups = [[1, 2], [1, 3]]
//!
//! [[agents]]
//! id = 1
//! workers = 32
//! episodes = 100
//!
//! [[agents]]
//! id = 2
//! workers = 32
//! episodes = 50
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use game_core::NeutralEvaluator;
use games_conquest::{BorderEvaluator, ConquestState, ResourceEvaluator};
use mcts::{Mcts, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;

use crate::agent::{Agent, SearchAgent, TrainingAgent};

fn default_games_per_matchup() -> u32 {
    10
}

fn default_max_turns() -> usize {
    500
}

fn default_workers() -> usize {
    32
}

fn default_evaluator() -> String {
    "resources".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    #[serde(default = "default_games_per_matchup")]
    pub games_per_matchup: u32,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    pub agents: Vec<AgentSpec>,
    pub matchups: Vec<(u32, u32)>,
}

/// One agent configuration, identified by `id` in matchups and records.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub id: u32,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Fixed-work budget; mutually exclusive with `duration_ms`.
    #[serde(default)]
    pub episodes: u64,
    /// Fixed-time budget in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    /// Rollout depth cap; omitted means rollouts run to the end.
    #[serde(default)]
    pub cutoff: Option<usize>,
    #[serde(default = "default_evaluator")]
    pub evaluator: String,
    /// When set, sample moves at this temperature instead of playing the
    /// most-visited one.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Seed for reproducible searches; omitted means fresh entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ExperimentConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading experiment config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing experiment config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in experiment run when no config file is given: ten games
    /// between two equal fixed-work agents.
    pub fn demo() -> Self {
        let agent = |id| AgentSpec {
            id,
            workers: 8,
            episodes: 100,
            duration_ms: 0,
            cutoff: Some(50),
            evaluator: default_evaluator(),
            temperature: None,
            seed: None,
        };
        Self {
            name: "demo".into(),
            games_per_matchup: default_games_per_matchup(),
            max_turns: default_max_turns(),
            agents: vec![agent(1), agent(2)],
            matchups: vec![(1, 2)],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.agents.is_empty() {
            bail!("experiment {:?} defines no agents", self.name);
        }
        if self.matchups.is_empty() {
            bail!("experiment {:?} defines no matchups", self.name);
        }

        let mut ids = HashSet::new();
        for agent in &self.agents {
            if !ids.insert(agent.id) {
                bail!("duplicate agent id {}", agent.id);
            }
            match (agent.episodes > 0, agent.duration_ms > 0) {
                (false, false) => bail!("agent {} has no search budget", agent.id),
                (true, true) => {
                    bail!("agent {} sets both episodes and duration", agent.id)
                }
                _ => {}
            }
        }
        for (first, second) in &self.matchups {
            for id in [first, second] {
                if !ids.contains(id) {
                    bail!("matchup references unknown agent id {id}");
                }
            }
        }
        Ok(())
    }

    pub fn agent(&self, id: u32) -> &AgentSpec {
        self.agents
            .iter()
            .find(|agent| agent.id == id)
            .expect("matchup ids validated against agents")
    }
}

impl AgentSpec {
    fn search_config(&self) -> Result<SearchConfig<ConquestState>> {
        let mut config = SearchConfig::new(self.workers).with_metrics();
        if self.episodes > 0 {
            config = config.with_episodes(self.episodes);
        }
        if self.duration_ms > 0 {
            config = config.with_duration(Duration::from_millis(self.duration_ms));
        }
        if let Some(cutoff) = self.cutoff {
            config = config.with_cutoff(cutoff);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config = match self.evaluator.as_str() {
            "resources" => config.with_evaluator(Arc::new(ResourceEvaluator::new())),
            "borders" => config.with_evaluator(Arc::new(BorderEvaluator::new())),
            "neutral" => config.with_evaluator(Arc::new(NeutralEvaluator::new())),
            other => bail!("agent {} names unknown evaluator {other:?}", self.id),
        };
        Ok(config)
    }

    /// Build a fresh agent for one game.
    pub fn build_agent(&self) -> Result<Box<dyn Agent<ConquestState>>> {
        let mcts = Mcts::new(self.search_config()?)
            .with_context(|| format!("building agent {}", self.id))?;
        Ok(match self.temperature {
            Some(temperature) => {
                let rng = match self.seed {
                    Some(seed) => ChaCha20Rng::seed_from_u64(seed),
                    None => ChaCha20Rng::from_entropy(),
                };
                Box::new(TrainingAgent::new(mcts, temperature, rng))
            }
            None => Box::new(SearchAgent::new(mcts)),
        })
    }
}
