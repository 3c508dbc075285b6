//! Configuration of [`HoverEnv`](super::HoverEnv).
use crate::{reward::DEFAULT_MAX_DISTANCE, EncoderStrategy, RewardStrategy};
use anyhow::Result;
use quadhover_core::HoverError;
use quadhover_sim::{PhysicsSim, Simulator, Vec3};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug},
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Upper bound of `action_repeat`.
pub const MAX_ACTION_REPEAT: usize = 1000;

/// Configurations of [`HoverEnv`](super::HoverEnv).
///
/// The configuration is fixed when the environment is built. Presets for the
/// common tasks are [`HoverEnvConfig::velocity_hover`],
/// [`HoverEnvConfig::limit_hover`], [`HoverEnvConfig::sigmoid_hover`] and
/// [`HoverEnvConfig::waypoint`].
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HoverEnvConfig<S: Simulator = PhysicsSim> {
    /// Configuration of the simulator, including the episode runtime.
    pub sim_config: S::Config,

    /// Target position. If `None`, the initial position of the simulator is used.
    pub goal: Option<Vec3>,

    /// Observation encoder.
    pub encoder: EncoderStrategy,

    /// Reward shaping.
    pub reward: RewardStrategy,

    /// Lower bound of the rotor commands expected from an agent.
    pub action_low: f64,

    /// Upper bound of the rotor commands expected from an agent.
    pub action_high: f64,

    /// The number of rotor commands in an action.
    pub action_size: usize,

    /// The number of simulator steps an action is applied for.
    pub action_repeat: usize,
}

impl<S: Simulator> Clone for HoverEnvConfig<S> {
    fn clone(&self) -> Self {
        Self {
            sim_config: self.sim_config.clone(),
            goal: self.goal,
            encoder: self.encoder,
            reward: self.reward,
            action_low: self.action_low,
            action_high: self.action_high,
            action_size: self.action_size,
            action_repeat: self.action_repeat,
        }
    }
}

impl<S: Simulator> Debug for HoverEnvConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverEnvConfig")
            .field("sim_config", &self.sim_config)
            .field("goal", &self.goal)
            .field("encoder", &self.encoder)
            .field("reward", &self.reward)
            .field("action_low", &self.action_low)
            .field("action_high", &self.action_high)
            .field("action_size", &self.action_size)
            .field("action_repeat", &self.action_repeat)
            .finish()
    }
}

impl<S: Simulator> PartialEq for HoverEnvConfig<S> {
    fn eq(&self, other: &Self) -> bool {
        self.sim_config == other.sim_config
            && self.goal == other.goal
            && self.encoder == other.encoder
            && self.reward == other.reward
            && self.action_low == other.action_low
            && self.action_high == other.action_high
            && self.action_size == other.action_size
            && self.action_repeat == other.action_repeat
    }
}

impl<S> Default for HoverEnvConfig<S>
where
    S: Simulator,
    S::Config: Default,
{
    fn default() -> Self {
        Self {
            sim_config: Default::default(),
            goal: None,
            encoder: EncoderStrategy::PositionVelocity,
            reward: RewardStrategy::VelocityHover,
            action_low: 350.0,
            action_high: 450.0,
            action_size: 4,
            action_repeat: 1,
        }
    }
}

impl<S> HoverEnvConfig<S>
where
    S: Simulator,
    S::Config: Default,
{
    /// Hovering at the initial position, rewarded by distance and discounted by speed.
    pub fn velocity_hover() -> Self {
        Self::default()
    }

    /// Hovering at the initial position, with a reward reaching zero at `max_distance`.
    ///
    /// [`HoverEnvConfig::default_limit_hover`] uses [`DEFAULT_MAX_DISTANCE`].
    pub fn limit_hover(max_distance: f64) -> Self {
        Self::default()
            .encoder(EncoderStrategy::PositionOnly)
            .reward(RewardStrategy::LimitHover { max_distance })
    }

    /// Hovering at the initial position with a sigmoid reward over the full rotor range.
    pub fn sigmoid_hover() -> Self {
        Self::default()
            .encoder(EncoderStrategy::PositionOnly)
            .reward(RewardStrategy::SigmoidHover)
            .action_range(0.0, 900.0)
    }

    /// Reaching the point 10 m above the origin with three simulator steps per action.
    pub fn waypoint() -> Self {
        Self::default()
            .repeated_pose(3)
            .reward(RewardStrategy::LinearManhattan)
            .action_range(0.0, 900.0)
            .goal([0.0, 0.0, 10.0])
    }
}

impl<S: Simulator> HoverEnvConfig<S> {
    /// Sets the configuration of the simulator.
    pub fn sim_config(mut self, sim_config: S::Config) -> Self {
        self.sim_config = sim_config;
        self
    }

    /// Sets the target position.
    pub fn goal(mut self, goal: impl Into<Vec3>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Sets the observation encoder.
    pub fn encoder(mut self, encoder: EncoderStrategy) -> Self {
        self.encoder = encoder;
        self
    }

    /// Sets the reward shaping.
    pub fn reward(mut self, reward: RewardStrategy) -> Self {
        self.reward = reward;
        self
    }

    /// Sets the bounds of rotor commands.
    pub fn action_range(mut self, low: f64, high: f64) -> Self {
        self.action_low = low;
        self.action_high = high;
        self
    }

    /// Sets the number of rotor commands in an action.
    pub fn action_size(mut self, action_size: usize) -> Self {
        self.action_size = action_size;
        self
    }

    /// Sets the number of simulator steps per action.
    pub fn action_repeat(mut self, action_repeat: usize) -> Self {
        self.action_repeat = action_repeat;
        self
    }

    /// Observes the poses of all `repeat` simulator steps of an action.
    ///
    /// Sets both the encoder and the action repeat.
    pub fn repeated_pose(self, repeat: usize) -> Self {
        self.encoder(EncoderStrategy::RepeatedPose { repeat })
            .action_repeat(repeat)
    }

    /// Length of observations.
    pub fn state_size(&self) -> usize {
        self.encoder.state_size()
    }

    /// Checks the consistency of the configuration.
    ///
    /// The agreement of `action_size` with the simulator is checked when the
    /// environment is built.
    pub fn validate(&self) -> Result<(), HoverError> {
        let invalid = |msg: String| Err(HoverError::InvalidConfig(msg));

        if !(self.action_low.is_finite() && self.action_high.is_finite()) {
            return invalid(format!(
                "action bounds must be finite, got [{}, {}]",
                self.action_low, self.action_high
            ));
        }
        if self.action_low >= self.action_high {
            return invalid(format!(
                "action_low must be less than action_high, got [{}, {}]",
                self.action_low, self.action_high
            ));
        }
        if self.action_size == 0 {
            return invalid("action_size must be positive".to_string());
        }
        if self.action_repeat == 0 {
            return invalid("action_repeat must be positive".to_string());
        }
        if self.action_repeat > MAX_ACTION_REPEAT {
            return invalid(format!(
                "action_repeat must be at most {}, got {}",
                MAX_ACTION_REPEAT, self.action_repeat
            ));
        }
        if let EncoderStrategy::RepeatedPose { repeat } = self.encoder {
            if repeat != self.action_repeat {
                return invalid(format!(
                    "RepeatedPose repeat ({}) differs from action_repeat ({})",
                    repeat, self.action_repeat
                ));
            }
        }
        if let Some(goal) = &self.goal {
            if goal.iter().any(|x| !x.is_finite()) {
                return invalid(format!("goal must be finite, got {:?}", goal));
            }
        }
        self.reward.validate()
    }

    /// Constructs [`HoverEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`HoverEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

impl HoverEnvConfig<PhysicsSim> {
    /// [`HoverEnvConfig::limit_hover`] with [`DEFAULT_MAX_DISTANCE`].
    pub fn default_limit_hover() -> Self {
        Self::limit_hover(DEFAULT_MAX_DISTANCE)
    }
}
