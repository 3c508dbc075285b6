//! Encoding of simulator state into observation vectors.
use quadhover_core::HoverError;
use quadhover_sim::{Pose, Simulator, Vec3};
use serde::{Deserialize, Serialize};

/// Simulator state captured right after one sub-step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    /// Pose.
    pub pose: Pose,

    /// Linear velocity.
    pub velocity: Vec3,

    /// Angular velocity.
    pub angular_velocity: Vec3,
}

impl Snapshot {
    /// Captures the current state of a simulator.
    pub fn capture<S: Simulator>(sim: &S) -> Self {
        Self {
            pose: *sim.pose(),
            velocity: *sim.velocity(),
            angular_velocity: *sim.angular_velocity(),
        }
    }
}

/// How an observation is built from the snapshots of one agent step.
///
/// No normalization is applied; values are in simulator units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EncoderStrategy {
    /// Position and linear velocity of the latest snapshot (6 components).
    PositionVelocity,

    /// Position of the latest snapshot (3 components).
    PositionOnly,

    /// Full poses of all `repeat` snapshots of an agent step, oldest first
    /// (`6 * repeat` components).
    RepeatedPose {
        /// The number of simulator sub-steps per agent step.
        repeat: usize,
    },
}

impl EncoderStrategy {
    /// Length of the observation vector.
    pub fn state_size(&self) -> usize {
        match self {
            Self::PositionVelocity => 6,
            Self::PositionOnly => 3,
            Self::RepeatedPose { repeat } => repeat.saturating_mul(6),
        }
    }

    /// Builds an observation from the snapshots of one agent step, oldest first.
    pub fn encode(&self, history: &[Snapshot]) -> Result<Vec<f64>, HoverError> {
        let latest = history
            .last()
            .ok_or_else(|| HoverError::shape_mismatch("snapshot history", 1, 0))?;

        let obs = match self {
            Self::PositionVelocity => {
                let mut obs = latest.pose.position().as_slice().to_vec();
                obs.extend_from_slice(latest.velocity.as_slice());
                obs
            }
            Self::PositionOnly => latest.pose.position().as_slice().to_vec(),
            Self::RepeatedPose { repeat } => {
                if history.len() != *repeat {
                    return Err(HoverError::shape_mismatch(
                        "snapshot history",
                        *repeat,
                        history.len(),
                    ));
                }
                history
                    .iter()
                    .flat_map(|s| s.pose.as_slice().iter().copied())
                    .collect()
            }
        };
        debug_assert_eq!(obs.len(), self.state_size());

        Ok(obs)
    }
}
