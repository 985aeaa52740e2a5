//! Running aggregate statistics

use pushbox_core::{EpisodeMetrics, TaskOutcome};
use tracing::info;

/// Folds episode results into [`EpisodeMetrics`] one at a time, without
/// keeping history.
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    metrics: EpisodeMetrics,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished episode.
    ///
    /// `known_strategies` is the size of the novelty set after any
    /// registration for this episode.
    pub fn update(&mut self, outcome: &TaskOutcome, reward: f64, known_strategies: usize) {
        let m = &mut self.metrics;

        m.total_episodes += 1;
        if outcome.goal_reached {
            m.success_count += 1;
        }
        let n = m.total_episodes as f64;
        m.success_rate = m.success_count as f64 / n;

        m.avg_steps_to_goal = running_mean(m.avg_steps_to_goal, f64::from(outcome.steps), n);
        m.avg_force_used = running_mean(m.avg_force_used, outcome.total_force, n);
        m.avg_completion_time = running_mean(m.avg_completion_time, outcome.completion_time, n);
        let smooth = if outcome.smooth_movement { 1.0 } else { 0.0 };
        m.smoothness_score = running_mean(m.smoothness_score, smooth, n);

        m.total_reward += reward;
        m.avg_reward = m.total_reward / n;
        m.max_reward = m.max_reward.max(reward);

        if outcome.is_novel_strategy {
            m.novel_actions += 1;
            m.unique_strategies = known_strategies as u64;
        }
    }

    /// Snapshot of the current aggregate
    pub fn snapshot(&self) -> EpisodeMetrics {
        self.metrics.clone()
    }

    pub fn metrics(&self) -> &EpisodeMetrics {
        &self.metrics
    }

    /// Zero every counter and average
    pub fn reset(&mut self) {
        info!(
            total_episodes = self.metrics.total_episodes,
            "Resetting episode metrics"
        );
        self.metrics = EpisodeMetrics::default();
    }
}

/// `(old * (n - 1) + value) / n`, with `n` counting the new value
fn running_mean(old: f64, value: f64, n: f64) -> f64 {
    (old * (n - 1.0) + value) / n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(goal_reached: bool, steps: u32) -> TaskOutcome {
        TaskOutcome {
            goal_reached,
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_metrics_are_zero() {
        let metrics = MetricsAggregator::new().snapshot();
        assert_eq!(metrics, EpisodeMetrics::default());
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.avg_reward, 0.0);
    }

    #[test]
    fn test_running_means() {
        let mut aggregator = MetricsAggregator::new();
        for (steps, success) in [(10, true), (12, true), (14, true), (30, false), (30, false)] {
            aggregator.update(&outcome(success, steps), 1.0, 0);
        }
        let m = aggregator.metrics();

        assert_eq!(m.total_episodes, 5);
        assert_eq!(m.success_count, 3);
        assert!((m.success_rate - 0.6).abs() < 1e-12);
        assert!((m.avg_steps_to_goal - 19.2).abs() < 1e-9);
        assert!((m.avg_reward - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_time_and_smoothness() {
        let mut aggregator = MetricsAggregator::new();
        let smooth = TaskOutcome {
            total_force: 2.0,
            completion_time: 10.0,
            smooth_movement: true,
            ..Default::default()
        };
        let jerky = TaskOutcome {
            total_force: 6.0,
            completion_time: 20.0,
            ..Default::default()
        };
        aggregator.update(&smooth, 0.0, 0);
        aggregator.update(&jerky, 0.0, 0);
        let m = aggregator.metrics();

        assert_eq!(m.avg_force_used, 4.0);
        assert_eq!(m.avg_completion_time, 15.0);
        assert_eq!(m.smoothness_score, 0.5);
    }

    #[test]
    fn test_reward_totals_and_max() {
        let mut aggregator = MetricsAggregator::new();
        aggregator.update(&outcome(false, 5), -60.0, 0);
        assert_eq!(aggregator.metrics().max_reward, 0.0);

        aggregator.update(&outcome(true, 5), 219.0, 0);
        aggregator.update(&outcome(false, 5), -20.0, 0);
        let m = aggregator.metrics();

        assert_eq!(m.total_reward, 139.0);
        assert_eq!(m.max_reward, 219.0);
        assert!((m.avg_reward - 139.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_reward_starts_at_zero() {
        let mut aggregator = MetricsAggregator::new();
        aggregator.update(&outcome(false, 30), -43.15, 0);
        aggregator.update(&outcome(false, 30), -73.15, 0);
        let m = aggregator.metrics();

        assert_eq!(m.max_reward, 0.0);
        assert!((m.total_reward + 116.3).abs() < 1e-9);
    }

    #[test]
    fn test_novelty_counts() {
        let mut aggregator = MetricsAggregator::new();
        let novel = TaskOutcome {
            is_novel_strategy: true,
            ..Default::default()
        };
        aggregator.update(&novel, 0.0, 1);
        aggregator.update(&outcome(false, 1), 0.0, 1);
        aggregator.update(&novel, 0.0, 2);

        assert_eq!(aggregator.metrics().novel_actions, 2);
        assert_eq!(aggregator.metrics().unique_strategies, 2);
    }

    #[test]
    fn test_reset() {
        let mut aggregator = MetricsAggregator::new();
        aggregator.update(&outcome(true, 3), 150.0, 1);
        aggregator.reset();

        assert_eq!(aggregator.snapshot(), EpisodeMetrics::default());
    }
}
