//! # pushbox-eval
//!
//! Episode evaluation engine for the pushbox puzzle.
//!
//! This crate provides:
//! - `StateEvaluator` for per-step terminal checks
//! - `StrategyHasher` for reproducible strategy fingerprints
//! - `RewardCalculator` and its novelty set
//! - `MetricsAggregator` for running statistics
//! - `TaskEvaluator`, which ties them together per episode
//! - `SharedEvaluator`, a lock-guarded handle for concurrent sessions

pub mod evaluator;
pub mod metrics;
pub mod reward;
pub mod shared;
pub mod state_eval;
pub mod strategy;

pub use evaluator::TaskEvaluator;
pub use metrics::MetricsAggregator;
pub use reward::RewardCalculator;
pub use shared::SharedEvaluator;
pub use state_eval::StateEvaluator;
pub use strategy::StrategyHasher;
