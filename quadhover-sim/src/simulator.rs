//! The simulator contract.
use anyhow::Result;
use nalgebra::Vector3;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// A 3-vector in world or body frame.
pub type Vec3 = Vector3<f64>;

/// Position `(x, y, z)` in meters and Euler angles `(roll, pitch, yaw)` in radians.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose(pub [f64; 6]);

impl Pose {
    /// Constructs a pose from a position and Euler angles.
    pub fn new(position: Vec3, angles: Vec3) -> Self {
        Self([
            position.x, position.y, position.z, angles.x, angles.y, angles.z,
        ])
    }

    /// Position in world frame.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Euler angles.
    pub fn angles(&self) -> Vec3 {
        Vec3::new(self.0[3], self.0[4], self.0[5])
    }

    /// Height above the ground, i.e. the world-frame `z`.
    pub fn height(&self) -> f64 {
        self.0[2]
    }

    /// All six components.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; 6]> for Pose {
    fn from(v: [f64; 6]) -> Self {
        Self(v)
    }
}

/// The reason an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The simulated time exceeded the configured runtime.
    TimeLimit,

    /// The vehicle hit a boundary of the world, including the ground.
    Boundary,
}

/// A rigid-body simulator driven by per-rotor commands.
///
/// The state exposed through the accessors always reflects the most recent
/// call of [`Simulator::advance`] (or [`Simulator::reset`]).
pub trait Simulator {
    /// Configuration, including the initial conditions and the episode runtime.
    type Config: Clone + Debug + PartialEq + Serialize + DeserializeOwned;

    /// Builds a simulator at its initial conditions.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Integrates one physics step with the given rotor commands.
    ///
    /// Returns `true` if the episode has ended.
    fn advance(&mut self, rotor_commands: &[f64]) -> bool;

    /// Reinitializes the simulator to the configured initial conditions.
    fn reset(&mut self);

    /// Current pose.
    fn pose(&self) -> &Pose;

    /// Current linear velocity in world frame.
    fn velocity(&self) -> &Vec3;

    /// Current angular velocity of the Euler angles.
    fn angular_velocity(&self) -> &Vec3;

    /// Simulated time since the last reset in seconds.
    fn time(&self) -> f64;

    /// The number of independently commandable rotors.
    fn rotor_count(&self) -> usize;

    /// Why the episode ended, or `None` while it is running.
    fn termination(&self) -> Option<Termination>;
}
