//! Simulation snapshot types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Action;

/// 2D coordinate in screen units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// 2D velocity vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// The movable box at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxState {
    pub position: Point,
    #[serde(default)]
    pub velocity: Velocity,
    pub mass: f64,
    pub friction: f64,
    pub restitution: f64,
}

/// Target location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalState {
    pub position: Point,
    /// Carried for display; success is judged against a fixed distance
    #[serde(default = "default_goal_radius")]
    pub radius: f64,
}

pub(crate) fn default_goal_radius() -> f64 {
    30.0
}

impl GoalState {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            radius: default_goal_radius(),
        }
    }
}

/// One full snapshot of the simulation, as supplied by the session driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    #[serde(rename = "box")]
    pub box_state: BoxState,
    pub goal: GoalState,
    /// Placed barriers, opaque to the evaluator
    #[serde(default)]
    pub barriers: Vec<serde_json::Value>,
    #[serde(default)]
    pub step: u32,
    #[serde(default, alias = "elapsedTime")]
    pub elapsed_time: f64,
    /// Append-only record of actions taken so far
    #[serde(default, alias = "actionsTaken")]
    pub actions_taken: Vec<Action>,
}

impl SimulationState {
    /// Current distance between box and goal
    pub fn distance_to_goal(&self) -> f64 {
        self.box_state.position.distance_to(&self.goal.position)
    }
}

/// Why an episode ended, or that it has not
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    GoalReached,
    FellOutOfBounds,
    StepLimit,
    OutOfBoundsHorizontal,
    Timeout,
    Continuing,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TerminationReason::GoalReached => "goal reached",
            TerminationReason::FellOutOfBounds => "box fell out of bounds",
            TerminationReason::StepLimit => "step limit exceeded",
            TerminationReason::OutOfBoundsHorizontal => "box left the playfield horizontally",
            TerminationReason::Timeout => "time limit exceeded",
            TerminationReason::Continuing => "continuing",
        };
        f.write_str(reason)
    }
}

/// Result of a per-step terminal check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateVerdict {
    pub success: bool,
    pub failure: bool,
    pub reason: TerminationReason,
}

impl StateVerdict {
    pub fn success(reason: TerminationReason) -> Self {
        Self {
            success: true,
            failure: false,
            reason,
        }
    }

    pub fn failure(reason: TerminationReason) -> Self {
        Self {
            success: false,
            failure: true,
            reason,
        }
    }

    pub fn continuing() -> Self {
        Self {
            success: false,
            failure: false,
            reason: TerminationReason::Continuing,
        }
    }

    /// Whether the session should stop stepping
    pub fn is_terminal(&self) -> bool {
        self.success || self.failure
    }
}
