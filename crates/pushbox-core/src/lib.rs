//! # pushbox-core
//!
//! Core types for the pushbox episode evaluation engine.
//!
//! This crate provides the data model shared by the evaluator and its callers:
//! - Simulation snapshots and actions
//! - The static level catalog
//! - Outcome, reward and metrics records
//! - Evaluator configuration

pub mod action;
pub mod config;
pub mod error;
pub mod level;
pub mod metrics;
pub mod outcome;
pub mod reward;
pub mod state;

pub use action::Action;
pub use config::{EvaluatorConfig, RewardWeights};
pub use error::{PushboxError, Result};
pub use level::{
    LevelConfig, LevelKey, Obstacle, ObstacleKind, all_levels, create_initial_state,
    get_level_config, level_config_by_name,
};
pub use metrics::EpisodeMetrics;
pub use outcome::TaskOutcome;
pub use reward::{Reward, RewardComponents};
pub use state::{
    BoxState, GoalState, Point, SimulationState, StateVerdict, TerminationReason, Velocity,
};
