//! Action types

use serde::{Deserialize, Deserializer, Serialize};

/// An action taken by the agent during an episode.
///
/// Numeric fields absent from the wire format, or sent as `null`, default to
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Apply a force to the box
    Push {
        #[serde(
            default,
            rename = "forceX",
            alias = "force_x",
            deserialize_with = "null_as_zero"
        )]
        force_x: f64,
        #[serde(
            default,
            rename = "forceY",
            alias = "force_y",
            deserialize_with = "null_as_zero"
        )]
        force_y: f64,
        #[serde(default, deserialize_with = "null_as_zero")]
        duration: f64,
    },
    /// Place a barrier segment
    Barrier {
        #[serde(default, deserialize_with = "null_as_zero")]
        x: f64,
        #[serde(default, deserialize_with = "null_as_zero")]
        y: f64,
        #[serde(default, deserialize_with = "null_as_zero")]
        angle: f64,
    },
    /// Let the simulation run without intervening
    Wait {
        #[serde(default, deserialize_with = "null_as_zero")]
        duration: f64,
    },
    /// Look at part of the scene
    Observe {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        focus: Option<String>,
    },
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Action {
    /// Push with the given force components and no duration
    pub fn push(force_x: f64, force_y: f64) -> Self {
        Action::Push {
            force_x,
            force_y,
            duration: 0.0,
        }
    }

    /// Lowercase type tag, as used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Push { .. } => "push",
            Action::Barrier { .. } => "barrier",
            Action::Wait { .. } => "wait",
            Action::Observe { .. } => "observe",
        }
    }

    /// Force components if this is a push
    pub fn force(&self) -> Option<(f64, f64)> {
        match self {
            Action::Push {
                force_x, force_y, ..
            } => Some((*force_x, *force_y)),
            _ => None,
        }
    }

    /// Euclidean magnitude of the push force, `None` for other actions
    pub fn force_magnitude(&self) -> Option<f64> {
        self.force().map(|(fx, fy)| fx.hypot(fy))
    }
}
