//! Per-step terminal check

use pushbox_core::{
    EvaluatorConfig, LevelConfig, SimulationState, StateVerdict, TerminationReason,
};

/// Decides whether an episode is finished and why.
///
/// Pure and `Copy`; safe to call from any thread without coordination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateEvaluator {
    success_distance: f64,
    max_y: f64,
    min_x: f64,
    max_x: f64,
}

impl Default for StateEvaluator {
    fn default() -> Self {
        Self::new(&EvaluatorConfig::default())
    }
}

impl StateEvaluator {
    pub fn new(config: &EvaluatorConfig) -> Self {
        Self {
            success_distance: config.success_distance,
            max_y: config.max_y,
            min_x: config.min_x,
            max_x: config.max_x,
        }
    }

    /// Classify a snapshot. Checks run in a fixed order and the first match wins.
    pub fn evaluate(&self, state: &SimulationState, level: &LevelConfig) -> StateVerdict {
        if self.goal_reached(state) {
            return StateVerdict::success(TerminationReason::GoalReached);
        }
        if self.below_playfield(state) {
            return StateVerdict::failure(TerminationReason::FellOutOfBounds);
        }
        if state.step >= level.max_steps {
            return StateVerdict::failure(TerminationReason::StepLimit);
        }
        if self.outside_horizontally(state) {
            return StateVerdict::failure(TerminationReason::OutOfBoundsHorizontal);
        }
        if Self::timed_out(state, level) {
            return StateVerdict::failure(TerminationReason::Timeout);
        }
        StateVerdict::continuing()
    }

    /// Box within the success distance of the goal centre. The goal radius is
    /// not consulted.
    pub fn goal_reached(&self, state: &SimulationState) -> bool {
        state.distance_to_goal() < self.success_distance
    }

    /// Box below the bottom edge or beyond either side
    pub fn out_of_bounds(&self, state: &SimulationState) -> bool {
        self.below_playfield(state) || self.outside_horizontally(state)
    }

    pub fn timed_out(state: &SimulationState, level: &LevelConfig) -> bool {
        state.elapsed_time > level.time_limit
    }

    fn below_playfield(&self, state: &SimulationState) -> bool {
        state.box_state.position.y > self.max_y
    }

    fn outside_horizontally(&self, state: &SimulationState) -> bool {
        let x = state.box_state.position.x;
        x < self.min_x || x > self.max_x
    }
}
