#![warn(missing_docs)]
//! Quadcopter hover and waypoint tasks for reinforcement learning.
//!
//! [`HoverEnv`] implements [`quadhover_core::Env`] on top of any
//! [`quadhover_sim::Simulator`]. Each task combines:
//!
//! * an [`EncoderStrategy`], turning simulator state into observations,
//! * a [`RewardStrategy`], shaping the reward from the distance to a goal,
//! * an action repeat, applying every action for several simulator steps.
//!
//! All of them are fixed in [`HoverEnvConfig`] when the environment is built.
//!
//! ```no_run
//! use anyhow::Result;
//! use quadhover_core::{DefaultEvaluator, Evaluator};
//! use quadhover_env::{ConstantPolicy, HoverEnv, HoverEnvConfig};
//!
//! fn main() -> Result<()> {
//!     let config = HoverEnvConfig::velocity_hover();
//!     let mut evaluator = DefaultEvaluator::<HoverEnv>::new(&config, 5)?;
//!     let record = evaluator.evaluate(&mut ConstantPolicy::hover())?;
//!     println!("{:?}", record.get_scalar("Episode return")?);
//!     Ok(())
//! }
//! ```
mod act;
mod encoder;
mod env;
mod obs;
mod policy;
pub mod reward;
pub use act::RotorAct;
pub use encoder::{EncoderStrategy, Snapshot};
pub use env::{HoverEnv, HoverEnvConfig, HoverInfo, MAX_ACTION_REPEAT};
pub use obs::HoverObs;
pub use policy::{ConstantPolicy, RandomPolicy};
pub use reward::RewardStrategy;
