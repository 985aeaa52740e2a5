//! Per-episode outcome record

use serde::{Deserialize, Serialize};

/// Everything derived from one finished episode.
///
/// Built once by the task evaluator and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub goal_reached: bool,
    pub box_out_of_bounds: bool,
    pub timeout: bool,

    pub initial_distance: f64,
    pub final_distance: f64,
    /// `initial_distance - final_distance`
    pub distance_improvement: f64,

    pub steps: u32,
    /// Sum of push-force magnitudes
    pub total_force: f64,
    pub excessive_force: bool,
    pub smooth_movement: bool,
    /// Reserved; snapshots carry no trajectory to measure
    pub path_length: f64,

    pub strategy_hash: String,
    pub is_novel_strategy: bool,
    /// Elapsed simulated time at the final snapshot
    pub completion_time: f64,
}
