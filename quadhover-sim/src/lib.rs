#![warn(missing_docs)]
//! Simulators consumed by quadhover environments.
//!
//! [`Simulator`] is the contract between a task layer and a rigid-body
//! simulator: the task hands over rotor commands, the simulator integrates one
//! physics step and exposes the resulting [`Pose`], linear and angular
//! velocity, and whether (and why, see [`Termination`]) the episode ended.
//!
//! [`PhysicsSim`] is the reference implementation, a quadcopter with four
//! rotors flying in a bounded box above the ground.
//!
//! ```
//! use quadhover_sim::{PhysicsSim, PhysicsSimConfig, Simulator};
//!
//! let mut sim = PhysicsSim::build(&PhysicsSimConfig::default()).unwrap();
//! let n = PhysicsSim::hover_rotor_speed();
//! let done = sim.advance(&[n; 4]);
//! assert!(!done);
//! assert!((sim.pose().height() - 10.0).abs() < 1e-9);
//! ```
mod config;
mod physics;
mod simulator;
pub use config::PhysicsSimConfig;
pub use physics::PhysicsSim;
pub use simulator::{Pose, Simulator, Termination, Vec3};
