//! Configuration of [`PhysicsSim`](super::PhysicsSim).
use crate::{Pose, Vec3};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Initial conditions and runtime of [`PhysicsSim`](super::PhysicsSim).
///
/// Unset initial conditions fall back to a vehicle at rest 10 m above the origin.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PhysicsSimConfig {
    /// Initial pose.
    pub init_pose: Option<Pose>,

    /// Initial linear velocity.
    pub init_velocities: Option<Vec3>,

    /// Initial angular velocity of the Euler angles.
    pub init_angle_velocities: Option<Vec3>,

    /// Episode time limit in seconds.
    pub runtime: f64,
}

impl Default for PhysicsSimConfig {
    fn default() -> Self {
        Self {
            init_pose: None,
            init_velocities: None,
            init_angle_velocities: None,
            runtime: 5.0,
        }
    }
}

impl PhysicsSimConfig {
    /// Sets the initial pose.
    pub fn init_pose(mut self, pose: impl Into<Pose>) -> Self {
        self.init_pose = Some(pose.into());
        self
    }

    /// Sets the initial linear velocity.
    pub fn init_velocities(mut self, v: impl Into<Vec3>) -> Self {
        self.init_velocities = Some(v.into());
        self
    }

    /// Sets the initial angular velocity.
    pub fn init_angle_velocities(mut self, v: impl Into<Vec3>) -> Self {
        self.init_angle_velocities = Some(v.into());
        self
    }

    /// Sets the episode time limit in seconds.
    pub fn runtime(mut self, runtime: f64) -> Self {
        self.runtime = runtime;
        self
    }

    /// Checks that the runtime and all initial conditions are finite and
    /// that the runtime is positive.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.runtime.is_finite() && self.runtime > 0.0,
            "runtime must be finite and positive, got {}",
            self.runtime
        );
        ensure!(
            self.init_pose
                .map_or(true, |p| p.as_slice().iter().all(|x| x.is_finite())),
            "init_pose must be finite"
        );
        ensure!(
            self.init_velocities.map_or(true, |v| v.iter().all(|x| x.is_finite())),
            "init_velocities must be finite"
        );
        ensure!(
            self.init_angle_velocities
                .map_or(true, |v| v.iter().all(|x| x.is_finite())),
            "init_angle_velocities must be finite"
        );
        Ok(())
    }

    /// Constructs [`PhysicsSimConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PhysicsSimConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
