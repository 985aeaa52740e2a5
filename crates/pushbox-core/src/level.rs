//! Level catalog
//!
//! Levels are compiled into the binary and never mutated. Evaluators borrow
//! them; nothing owns a catalog entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PushboxError, Result};
use crate::state::{BoxState, GoalState, Point, SimulationState, Velocity};

/// Identifier of a predefined level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LevelKey {
    Tutorial,
    Friction,
    Obstacle,
    Barrier,
}

impl LevelKey {
    pub const ALL: [LevelKey; 4] = [
        LevelKey::Tutorial,
        LevelKey::Friction,
        LevelKey::Obstacle,
        LevelKey::Barrier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelKey::Tutorial => "tutorial",
            LevelKey::Friction => "friction",
            LevelKey::Obstacle => "obstacle",
            LevelKey::Barrier => "barrier",
        }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelKey {
    type Err = PushboxError;

    fn from_str(s: &str) -> Result<Self> {
        LevelKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| PushboxError::InvalidLevel(s.to_string()))
    }
}

/// Static scenery placed in a level
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Obstacle {
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Wall,
    Pit,
}

/// Immutable configuration of one level
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LevelConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub box_position: Point,
    pub goal_position: Point,
    pub box_mass: f64,
    pub friction: f64,
    pub restitution: f64,
    /// Seconds of simulated time before the episode times out
    pub time_limit: f64,
    pub max_steps: u32,
    pub available_barriers: u32,
    pub obstacles: &'static [Obstacle],
}

static LEVELS: [(LevelKey, LevelConfig); 4] = [
    (
        LevelKey::Tutorial,
        LevelConfig {
            name: "Basics: straight line",
            description: "Push the box right into the goal",
            box_position: Point::new(200.0, 300.0),
            goal_position: Point::new(600.0, 300.0),
            box_mass: 10.0,
            friction: 0.5,
            restitution: 0.3,
            time_limit: 60.0,
            max_steps: 20,
            available_barriers: 0,
            obstacles: &[],
        },
    ),
    (
        LevelKey::Friction,
        LevelConfig {
            name: "Physics: friction",
            description: "Control a slippery box",
            box_position: Point::new(200.0, 300.0),
            goal_position: Point::new(600.0, 300.0),
            box_mass: 10.0,
            friction: 0.1,
            restitution: 0.3,
            time_limit: 80.0,
            max_steps: 30,
            available_barriers: 0,
            obstacles: &[],
        },
    ),
    (
        LevelKey::Obstacle,
        LevelConfig {
            name: "Obstacle: avoid the wall",
            description: "Get around the wall to reach the goal",
            box_position: Point::new(200.0, 300.0),
            goal_position: Point::new(600.0, 300.0),
            box_mass: 10.0,
            friction: 0.5,
            restitution: 0.3,
            time_limit: 100.0,
            max_steps: 40,
            available_barriers: 0,
            obstacles: &[Obstacle {
                kind: ObstacleKind::Wall,
                x: 400.0,
                y: 200.0,
                width: 20.0,
                height: 400.0,
            }],
        },
    ),
    (
        LevelKey::Barrier,
        LevelConfig {
            name: "Strategy: build a chute",
            description: "Use barriers to slide the box safely into the goal",
            box_position: Point::new(200.0, 100.0),
            goal_position: Point::new(600.0, 500.0),
            box_mass: 10.0,
            friction: 0.3,
            restitution: 0.3,
            time_limit: 120.0,
            max_steps: 50,
            available_barriers: 3,
            obstacles: &[Obstacle {
                kind: ObstacleKind::Pit,
                x: 400.0,
                y: 550.0,
                width: 100.0,
                height: 50.0,
            }],
        },
    ),
];

/// Look up a level by key
pub fn get_level_config(key: LevelKey) -> &'static LevelConfig {
    // Every key has an entry; the table is indexed in declaration order.
    &LEVELS[key as usize].1
}

/// Look up a level by its string key, failing with `InvalidLevel` if unknown
pub fn level_config_by_name(key: &str) -> Result<&'static LevelConfig> {
    key.parse().map(get_level_config)
}

/// All levels in declaration order
pub fn all_levels() -> impl Iterator<Item = (LevelKey, &'static LevelConfig)> {
    LEVELS.iter().map(|(key, level)| (*key, level))
}

/// Build the step-0 snapshot for a level
pub fn create_initial_state(level: &LevelConfig) -> SimulationState {
    SimulationState {
        box_state: BoxState {
            position: level.box_position,
            velocity: Velocity::default(),
            mass: level.box_mass,
            friction: level.friction,
            restitution: level.restitution,
        },
        goal: GoalState::at(level.goal_position),
        barriers: Vec::new(),
        step: 0,
        elapsed_time: 0.0,
        actions_taken: Vec::new(),
    }
}
