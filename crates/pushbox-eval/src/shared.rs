//! Shared evaluator handle

use pushbox_core::{EpisodeMetrics, LevelConfig, Reward, SimulationState, StateVerdict, TaskOutcome};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::evaluator::TaskEvaluator;
use crate::state_eval::StateEvaluator;

/// Cloneable handle to one [`TaskEvaluator`], for sessions running on
/// several tasks.
///
/// Episode evaluation holds the lock from the novelty check through metrics
/// update, so concurrent episodes cannot both claim the same new strategy or
/// lose a metrics update. Step checks never take the lock.
#[derive(Debug, Clone)]
pub struct SharedEvaluator {
    inner: Arc<Mutex<TaskEvaluator>>,
    states: StateEvaluator,
}

impl SharedEvaluator {
    pub fn new(evaluator: TaskEvaluator) -> Self {
        Self {
            states: evaluator.state_evaluator(),
            inner: Arc::new(Mutex::new(evaluator)),
        }
    }

    /// Per-step terminal check, lock-free
    pub fn evaluate_state(&self, state: &SimulationState, level: &LevelConfig) -> StateVerdict {
        self.states.evaluate(state, level)
    }

    pub async fn evaluate_episode(
        &self,
        initial: &SimulationState,
        final_state: &SimulationState,
        level: &LevelConfig,
    ) -> (TaskOutcome, f64) {
        let mut evaluator = self.inner.lock().await;
        evaluator.evaluate_episode(initial, final_state, level)
    }

    pub async fn evaluate_episode_detailed(
        &self,
        initial: &SimulationState,
        final_state: &SimulationState,
        level: &LevelConfig,
    ) -> (TaskOutcome, Reward) {
        let mut evaluator = self.inner.lock().await;
        evaluator.evaluate_episode_detailed(initial, final_state, level)
    }

    pub async fn get_metrics(&self) -> EpisodeMetrics {
        self.inner.lock().await.get_metrics()
    }

    pub async fn reset_metrics(&self) {
        self.inner.lock().await.reset_metrics();
    }

    pub async fn reset_novelty(&self) {
        self.inner.lock().await.reset_novelty();
    }
}

impl Default for SharedEvaluator {
    fn default() -> Self {
        Self::new(TaskEvaluator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pushbox_core::{Action, LevelKey, Point, create_initial_state, get_level_config};

    fn episode(actions: Vec<Action>) -> (SimulationState, SimulationState) {
        let level = get_level_config(LevelKey::Friction);
        let initial = create_initial_state(level);
        let mut done = initial.clone();
        done.box_state.position = Point::new(590.0, 300.0);
        done.step = 6;
        done.actions_taken = actions;
        (initial, done)
    }

    #[tokio::test]
    async fn test_concurrent_episodes_are_serialized() {
        let shared = SharedEvaluator::default();
        let level = get_level_config(LevelKey::Friction);

        let mut handles = Vec::new();
        for i in 0..32 {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                // Four distinct strategies, each submitted eight times
                let fx = if i % 2 == 0 { 1.0 } else { -1.0 };
                let fy = if i % 4 < 2 { 1.0 } else { -1.0 };
                let (initial, done) = episode(vec![Action::push(fx, fy)]);
                shared.evaluate_episode(&initial, &done, level).await
            }));
        }

        let mut novel = 0;
        for handle in handles {
            let (outcome, _) = handle.await.unwrap();
            if outcome.is_novel_strategy {
                novel += 1;
            }
        }

        let metrics = shared.get_metrics().await;
        assert_eq!(novel, 4);
        assert_eq!(metrics.total_episodes, 32);
        assert_eq!(metrics.success_count, 32);
        assert_eq!(metrics.novel_actions, 4);
        assert_eq!(metrics.unique_strategies, 4);
    }

    #[test]
    fn test_state_check_without_runtime() {
        let shared = SharedEvaluator::default();
        let level = get_level_config(LevelKey::Friction);
        let (initial, done) = episode(vec![]);

        assert!(!shared.evaluate_state(&initial, level).is_terminal());
        assert!(shared.evaluate_state(&done, level).success);
    }

    #[test]
    fn test_resets_through_handle() {
        let shared = SharedEvaluator::default();
        let level = get_level_config(LevelKey::Friction);
        let (initial, done) = episode(vec![Action::Wait { duration: 1.0 }]);

        tokio_test::block_on(async {
            shared.evaluate_episode(&initial, &done, level).await;
            shared.reset_metrics().await;
            assert_eq!(shared.get_metrics().await.total_episodes, 0);

            let (outcome, _) = shared.evaluate_episode(&initial, &done, level).await;
            assert!(!outcome.is_novel_strategy);

            shared.reset_novelty().await;
            let (outcome, reward) = shared.evaluate_episode_detailed(&initial, &done, level).await;
            assert!(outcome.is_novel_strategy);
            assert_eq!(reward.component("novelty"), 30.0);
        });
    }
}
