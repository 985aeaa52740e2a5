//! Aggregate statistics across episodes

use serde::{Deserialize, Serialize};

/// Running statistics over every episode seen by one evaluator.
///
/// Averages are running means over all episodes, successful or not, and read
/// as zero before the first episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    pub total_episodes: u64,
    pub success_count: u64,
    pub success_rate: f64,

    pub avg_steps_to_goal: f64,
    pub avg_force_used: f64,
    pub avg_completion_time: f64,

    /// Episodes whose strategy fingerprint was new
    pub novel_actions: u64,
    /// Size of the known-strategy set after the last novel episode
    pub unique_strategies: u64,
    /// Fraction of episodes with smooth movement
    pub smoothness_score: f64,

    pub total_reward: f64,
    pub avg_reward: f64,
    pub max_reward: f64,
}
