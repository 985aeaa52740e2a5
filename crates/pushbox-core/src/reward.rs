//! Reward types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scalar reward with its decomposition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reward {
    /// Total scalar reward
    pub value: f64,
    /// Non-zero terms that make up `value`
    #[serde(default)]
    pub components: RewardComponents,
}

/// Decomposed reward components
pub type RewardComponents = HashMap<String, f64>;

impl Reward {
    /// Add a named term, skipping zero contributions
    pub fn add(&mut self, name: &str, amount: f64) {
        if amount != 0.0 {
            self.value += amount;
            *self.components.entry(name.to_string()).or_insert(0.0) += amount;
        }
    }

    /// Look up a component, zero if absent
    pub fn component(&self, name: &str) -> f64 {
        self.components.get(name).copied().unwrap_or(0.0)
    }
}

/// Component names used by the reward calculator
pub mod components {
    pub const GOAL: &str = "goal";
    pub const TIME_BONUS: &str = "time_bonus";
    pub const SMOOTH: &str = "smooth";
    pub const PROGRESS: &str = "progress";
    pub const NOVELTY: &str = "novelty";
    pub const OUT_OF_BOUNDS: &str = "out_of_bounds";
    pub const EXCESSIVE_FORCE: &str = "excessive_force";
    pub const TIMEOUT: &str = "timeout";
}
