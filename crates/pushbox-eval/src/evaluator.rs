//! Episode orchestration

use pushbox_core::{
    Action, EpisodeMetrics, EvaluatorConfig, LevelConfig, Result, Reward, SimulationState,
    StateVerdict, TaskOutcome,
};
use tracing::{debug, info};

use crate::metrics::MetricsAggregator;
use crate::reward::RewardCalculator;
use crate::state_eval::StateEvaluator;
use crate::strategy::StrategyHasher;

/// Turns simulation snapshots into verdicts, outcomes, rewards and running
/// metrics.
///
/// Owns its novelty set and metrics. `evaluate_episode` takes `&mut self`;
/// wrap the evaluator in a [`SharedEvaluator`](crate::SharedEvaluator) to
/// drive it from several tasks.
#[derive(Debug, Clone)]
pub struct TaskEvaluator {
    config: EvaluatorConfig,
    states: StateEvaluator,
    rewards: RewardCalculator,
    metrics: MetricsAggregator,
}

impl Default for TaskEvaluator {
    fn default() -> Self {
        Self::build(EvaluatorConfig::default())
    }
}

impl TaskEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with custom thresholds and weights
    pub fn with_config(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EvaluatorConfig) -> Self {
        Self {
            states: StateEvaluator::new(&config),
            rewards: RewardCalculator::new(config.reward.clone()),
            metrics: MetricsAggregator::new(),
            config,
        }
    }

    /// Per-step terminal check. Pure; touches no evaluator state.
    pub fn evaluate_state(&self, state: &SimulationState, level: &LevelConfig) -> StateVerdict {
        let verdict = self.states.evaluate(state, level);
        if verdict.is_terminal() {
            debug!(step = state.step, reason = %verdict.reason, "Episode terminal");
        }
        verdict
    }

    /// Score a finished episode and fold it into the running metrics
    pub fn evaluate_episode(
        &mut self,
        initial: &SimulationState,
        final_state: &SimulationState,
        level: &LevelConfig,
    ) -> (TaskOutcome, f64) {
        let (outcome, reward) = self.evaluate_episode_detailed(initial, final_state, level);
        (outcome, reward.value)
    }

    /// Like [`evaluate_episode`](Self::evaluate_episode), returning the reward
    /// decomposition as well
    pub fn evaluate_episode_detailed(
        &mut self,
        initial: &SimulationState,
        final_state: &SimulationState,
        level: &LevelConfig,
    ) -> (TaskOutcome, Reward) {
        let outcome = self.build_outcome(initial, final_state, level);
        let reward = self.rewards.breakdown(&outcome, level);

        if outcome.is_novel_strategy {
            self.rewards.register(&outcome.strategy_hash);
        }
        self.metrics
            .update(&outcome, reward.value, self.rewards.known_strategies());

        info!(
            level = level.name,
            goal_reached = outcome.goal_reached,
            steps = outcome.steps,
            novel = outcome.is_novel_strategy,
            reward = reward.value,
            "Episode evaluated"
        );

        (outcome, reward)
    }

    /// Derive the outcome record. Failure flags are recomputed from the final
    /// snapshot rather than taken from any earlier step verdict.
    fn build_outcome(
        &self,
        initial: &SimulationState,
        final_state: &SimulationState,
        level: &LevelConfig,
    ) -> TaskOutcome {
        let initial_distance = initial.distance_to_goal();
        let final_distance = final_state.distance_to_goal();

        let actions = &final_state.actions_taken;
        let strategy_hash = StrategyHasher::hash(actions);
        let is_novel_strategy = self.rewards.is_novel(&strategy_hash);

        let total_force = total_force(actions);

        TaskOutcome {
            goal_reached: self.states.goal_reached(final_state),
            box_out_of_bounds: self.states.out_of_bounds(final_state),
            timeout: StateEvaluator::timed_out(final_state, level),
            initial_distance,
            final_distance,
            distance_improvement: initial_distance - final_distance,
            steps: final_state.step,
            total_force,
            excessive_force: total_force > self.config.excessive_force,
            smooth_movement: is_smooth(actions, self.config.smoothness_tolerance),
            path_length: 0.0,
            strategy_hash,
            is_novel_strategy,
            completion_time: final_state.elapsed_time,
        }
    }

    /// Fingerprint of an action sequence
    pub fn compute_strategy_hash(&self, actions: &[Action]) -> String {
        StrategyHasher::hash(actions)
    }

    /// Snapshot of the running metrics
    pub fn get_metrics(&self) -> EpisodeMetrics {
        self.metrics.snapshot()
    }

    /// Zero the running metrics. The novelty set is left alone.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Forget every registered strategy. Metrics are left alone.
    pub fn reset_novelty(&mut self) {
        self.rewards.reset_novelty();
    }

    pub fn known_strategies(&self) -> usize {
        self.rewards.known_strategies()
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn state_evaluator(&self) -> StateEvaluator {
        self.states
    }
}

/// Sum of push-force magnitudes
fn total_force(actions: &[Action]) -> f64 {
    actions.iter().filter_map(Action::force_magnitude).sum()
}

/// Fewer than two pushes is smooth; otherwise every change in force magnitude
/// between consecutive pushes must stay under `tolerance`
fn is_smooth(actions: &[Action], tolerance: f64) -> bool {
    let magnitudes: Vec<f64> = actions.iter().filter_map(Action::force_magnitude).collect();
    if magnitudes.len() < 2 {
        return true;
    }
    let max_change = magnitudes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .fold(0.0, f64::max);
    max_change < tolerance
}
