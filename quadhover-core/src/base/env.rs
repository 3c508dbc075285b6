//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// An episode starts with [`Env::reset`] and continues with [`Env::step`]
/// until a returned [`Step`] reports [`Step::is_done`]. Calling `step` in
/// any other phase is a contract violation and is rejected with an error.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [Step] object.
    type Info: Info;

    /// Builds an environment.
    ///
    /// Invalid configurations are rejected here rather than during an episode.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Performs an environment step.
    ///
    /// Along with the [`Step`], it returns a [`Record`] holding diagnostic
    /// values measured during the step.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step and resets the environment if the episode ends.
    ///
    /// The observation after the reset is stored in [`Step::init_obs`].
    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (mut step, record) = self.step(a)?;
        if step.is_done() {
            step.init_obs = Some(self.reset()?);
        }
        Ok((step, record))
    }
}
