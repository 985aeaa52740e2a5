//! Subcommands

use anyhow::{Context, Result};
use clap::Subcommand;
use pushbox_core::{
    Action, EvaluatorConfig, LevelKey, Reward, SimulationState, TaskOutcome, all_levels,
    create_initial_state, get_level_config, level_config_by_name,
};
use pushbox_eval::{StrategyHasher, TaskEvaluator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Print the level catalog as JSON
    Levels,
    /// Classify a single snapshot as continuing, success or failure
    Check {
        /// Level key (tutorial, friction, obstacle, barrier)
        #[arg(short, long)]
        level: String,
        /// JSON file holding one simulation snapshot
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Evaluate a batch of finished episodes
    Evaluate {
        /// JSON file holding an array of episodes
        #[arg(short, long)]
        episodes: PathBuf,
        /// JSON evaluator configuration; omitted fields keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the strategy fingerprint of an action list
    Hash {
        /// JSON file holding an array of actions
        #[arg(short, long)]
        actions: PathBuf,
    },
}

/// One episode in an `evaluate` input file
#[derive(Debug, Deserialize)]
struct EpisodeInput {
    level: String,
    /// Defaults to the level's starting snapshot
    #[serde(default)]
    initial: Option<SimulationState>,
    #[serde(rename = "final")]
    final_state: SimulationState,
}

#[derive(Debug, Serialize)]
struct EpisodeReport {
    level: LevelKey,
    outcome: TaskOutcome,
    reward: Reward,
}

pub fn run(mode: Mode) -> Result<()> {
    match mode {
        Mode::Levels => print_levels(),
        Mode::Check { level, state } => check(&level, &state),
        Mode::Evaluate { episodes, config } => evaluate(&episodes, config.as_deref()),
        Mode::Hash { actions } => hash(&actions),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_levels() -> Result<()> {
    let catalog: serde_json::Map<String, serde_json::Value> = all_levels()
        .map(|(key, level)| -> Result<(String, serde_json::Value)> {
            Ok((key.to_string(), serde_json::to_value(level)?))
        })
        .collect::<Result<_>>()?;
    print_json(&catalog)
}

fn check(level_key: &str, state_path: &Path) -> Result<()> {
    let level = level_config_by_name(level_key)?;
    let state: SimulationState = read_json(state_path)?;
    let verdict = TaskEvaluator::new().evaluate_state(&state, level);
    print_json(&serde_json::json!({
        "success": verdict.success,
        "failure": verdict.failure,
        "reason": verdict.reason.to_string(),
    }))
}

fn evaluate(episodes_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EvaluatorConfig::from_json(&text)?
        }
        None => EvaluatorConfig::default(),
    };
    let mut evaluator = TaskEvaluator::with_config(config)?;

    let episodes: Vec<EpisodeInput> = read_json(episodes_path)?;
    let mut reports = Vec::with_capacity(episodes.len());
    for (index, episode) in episodes.into_iter().enumerate() {
        let key: LevelKey = episode.level.parse()?;
        let level = get_level_config(key);
        let initial = episode
            .initial
            .unwrap_or_else(|| create_initial_state(level));

        let verdict = evaluator.evaluate_state(&episode.final_state, level);
        if !verdict.is_terminal() {
            warn!(index, "Final snapshot of episode is not terminal");
        }

        let (outcome, reward) =
            evaluator.evaluate_episode_detailed(&initial, &episode.final_state, level);
        debug!(index, strategy_hash = %outcome.strategy_hash, "Scored episode");
        reports.push(EpisodeReport {
            level: key,
            outcome,
            reward,
        });
    }

    print_json(&serde_json::json!({
        "episodes": reports,
        "metrics": evaluator.get_metrics(),
    }))
}

fn hash(actions_path: &Path) -> Result<()> {
    let actions: Vec<Action> = read_json(actions_path)?;
    print_json(&serde_json::json!({
        "signature": StrategyHasher::signature(&actions),
        "hash": StrategyHasher::hash(&actions),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_input_without_initial() {
        let json = r#"[{
            "level": "tutorial",
            "final": {
                "box": {
                    "position": {"x": 600, "y": 300},
                    "mass": 10, "friction": 0.5, "restitution": 0.3
                },
                "goal": {"position": {"x": 600, "y": 300}},
                "step": 12,
                "elapsedTime": 9.5,
                "actionsTaken": [{"type": "push", "forceX": 0.05}]
            }
        }]"#;
        let episodes: Vec<EpisodeInput> = serde_json::from_str(json).unwrap();

        assert_eq!(episodes.len(), 1);
        assert!(episodes[0].initial.is_none());
        assert_eq!(episodes[0].final_state.step, 12);
        assert_eq!(episodes[0].level.parse::<LevelKey>().unwrap(), LevelKey::Tutorial);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        use clap::Parser;

        let cli = crate::Cli::try_parse_from([
            "pushbox",
            "-v",
            "evaluate",
            "--episodes",
            "runs.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.mode,
            Mode::Evaluate { ref episodes, config: None } if episodes == Path::new("runs.json")
        ));
    }
}
