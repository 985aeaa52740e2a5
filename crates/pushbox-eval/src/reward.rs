//! Episode reward calculation

use pushbox_core::reward::components;
use pushbox_core::{LevelConfig, Reward, RewardWeights, TaskOutcome};
use std::collections::HashSet;
use tracing::{debug, info};

/// Scores finished episodes and remembers which strategies have been seen.
///
/// The known-strategy set only grows, except through [`reset_novelty`].
///
/// [`reset_novelty`]: RewardCalculator::reset_novelty
#[derive(Debug, Clone, Default)]
pub struct RewardCalculator {
    weights: RewardWeights,
    known_strategies: HashSet<String>,
}

impl RewardCalculator {
    pub fn new(weights: RewardWeights) -> Self {
        Self {
            weights,
            known_strategies: HashSet::new(),
        }
    }

    /// Scalar reward for an outcome
    pub fn calculate(&self, outcome: &TaskOutcome, level: &LevelConfig) -> f64 {
        self.breakdown(outcome, level).value
    }

    /// Reward with each additive term named. Every term is evaluated
    /// independently; none short-circuits another.
    pub fn breakdown(&self, outcome: &TaskOutcome, _level: &LevelConfig) -> Reward {
        let w = &self.weights;
        let mut reward = Reward::default();

        if outcome.goal_reached {
            reward.add(components::GOAL, w.goal_bonus);
            let time_bonus = w.time_bonus_base - f64::from(outcome.steps) * w.time_bonus_per_step;
            reward.add(components::TIME_BONUS, time_bonus.max(0.0));
            if outcome.smooth_movement {
                reward.add(components::SMOOTH, w.smooth_bonus);
            }
        }

        reward.add(
            components::PROGRESS,
            outcome.distance_improvement * w.progress_factor,
        );

        if outcome.is_novel_strategy {
            reward.add(components::NOVELTY, w.novelty_bonus);
        }
        if outcome.box_out_of_bounds {
            reward.add(components::OUT_OF_BOUNDS, -w.out_of_bounds_penalty);
        }
        if outcome.excessive_force {
            reward.add(components::EXCESSIVE_FORCE, -w.excessive_force_penalty);
        }
        if outcome.timeout {
            reward.add(components::TIMEOUT, -w.timeout_penalty);
        }

        reward
    }

    /// True if the fingerprint has not been registered yet
    pub fn is_novel(&self, strategy_hash: &str) -> bool {
        !self.known_strategies.contains(strategy_hash)
    }

    /// Remember a fingerprint. Call after scoring, so an episode is not judged
    /// against its own hash. Returns whether it was newly inserted.
    pub fn register(&mut self, strategy_hash: &str) -> bool {
        let inserted = self.known_strategies.insert(strategy_hash.to_string());
        if inserted {
            debug!(strategy_hash, "Registered new strategy");
        }
        inserted
    }

    /// Number of distinct fingerprints registered
    pub fn known_strategies(&self) -> usize {
        self.known_strategies.len()
    }

    /// Forget every registered fingerprint
    pub fn reset_novelty(&mut self) {
        info!(
            cleared = self.known_strategies.len(),
            "Resetting known strategies"
        );
        self.known_strategies.clear();
    }

    pub fn weights(&self) -> &RewardWeights {
        &self.weights
    }
}
