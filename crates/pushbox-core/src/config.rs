//! Evaluator configuration

use serde::{Deserialize, Serialize};

use crate::error::{PushboxError, Result};

/// Thresholds and bounds used to judge and score episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Box-to-goal distance below which the goal counts as reached
    pub success_distance: f64,
    /// Box y coordinate beyond which it has fallen out of the playfield
    pub max_y: f64,
    pub min_x: f64,
    pub max_x: f64,
    /// Total push force above which the episode is penalised
    pub excessive_force: f64,
    /// Largest change in force magnitude between consecutive pushes still
    /// considered smooth
    pub smoothness_tolerance: f64,
    pub reward: RewardWeights,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            success_distance: 30.0,
            max_y: 600.0,
            min_x: -100.0,
            max_x: 900.0,
            excessive_force: 5.0,
            smoothness_tolerance: 0.1,
            reward: RewardWeights::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Reject configurations the evaluator cannot apply meaningfully
    pub fn validate(&self) -> Result<()> {
        let w = &self.reward;
        let values = [
            ("success_distance", self.success_distance),
            ("max_y", self.max_y),
            ("min_x", self.min_x),
            ("max_x", self.max_x),
            ("excessive_force", self.excessive_force),
            ("smoothness_tolerance", self.smoothness_tolerance),
            ("reward.goal_bonus", w.goal_bonus),
            ("reward.time_bonus_base", w.time_bonus_base),
            ("reward.time_bonus_per_step", w.time_bonus_per_step),
            ("reward.smooth_bonus", w.smooth_bonus),
            ("reward.progress_factor", w.progress_factor),
            ("reward.novelty_bonus", w.novelty_bonus),
            ("reward.out_of_bounds_penalty", w.out_of_bounds_penalty),
            ("reward.excessive_force_penalty", w.excessive_force_penalty),
            ("reward.timeout_penalty", w.timeout_penalty),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(PushboxError::InvalidConfig(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.success_distance < 0.0 {
            return Err(PushboxError::InvalidConfig(format!(
                "success_distance must be non-negative, got {}",
                self.success_distance
            )));
        }
        if self.min_x >= self.max_x {
            return Err(PushboxError::InvalidConfig(format!(
                "min_x ({}) must be less than max_x ({})",
                self.min_x, self.max_x
            )));
        }
        if self.excessive_force < 0.0 || self.smoothness_tolerance < 0.0 {
            return Err(PushboxError::InvalidConfig(
                "force thresholds must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Weights of the additive reward terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub goal_bonus: f64,
    /// Time bonus is `max(0, time_bonus_base - steps * time_bonus_per_step)`
    pub time_bonus_base: f64,
    pub time_bonus_per_step: f64,
    pub smooth_bonus: f64,
    /// Multiplier on distance improvement, applied to every episode
    pub progress_factor: f64,
    pub novelty_bonus: f64,
    pub out_of_bounds_penalty: f64,
    pub excessive_force_penalty: f64,
    pub timeout_penalty: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            goal_bonus: 100.0,
            time_bonus_base: 50.0,
            time_bonus_per_step: 2.0,
            smooth_bonus: 20.0,
            progress_factor: 0.1,
            novelty_bonus: 30.0,
            out_of_bounds_penalty: 50.0,
            excessive_force_penalty: 10.0,
            timeout_penalty: 20.0,
        }
    }
}
