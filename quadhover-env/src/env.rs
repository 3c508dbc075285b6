//! Quadcopter task environment.
mod config;
use crate::{EncoderStrategy, HoverObs, RewardStrategy, RotorAct, Snapshot};
use anyhow::Result;
pub use config::{HoverEnvConfig, MAX_ACTION_REPEAT};
use log::{debug, info, trace};
use quadhover_core::{
    record::{Record, RecordValue},
    Env, HoverError, Info, Step,
};
use quadhover_sim::{PhysicsSim, Simulator, Termination, Vec3};

/// Information attached to every [`Step`] of [`HoverEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct HoverInfo {
    /// The number of agent steps taken in the episode, including this one.
    pub n_steps: usize,

    /// Simulated time at the end of the step in seconds.
    pub sim_time: f64,

    /// Distance between the vehicle and the goal at the end of the step.
    pub distance: f64,

    /// Why the episode ended, if it did.
    pub termination: Option<Termination>,
}

impl Info for HoverInfo {}

#[derive(Clone, Debug, Default)]
struct EpisodeState {
    n_steps: usize,
    episode_return: f64,
}

#[derive(Clone, Debug)]
enum Phase {
    Idle,
    Running(EpisodeState),
}

/// An episodic quadcopter task on top of a [`Simulator`].
///
/// An agent sends one rotor speed per rotor. The command is applied for
/// `action_repeat` consecutive simulator steps; the rewards of the sub-steps
/// are summed and the observation is encoded from the snapshots taken after
/// each of them. An episode ends when the simulator reports a termination,
/// after which [`Env::reset`] must be called before stepping again.
///
/// ```
/// use quadhover_core::Env;
/// use quadhover_env::{HoverEnv, HoverEnvConfig, RotorAct};
/// use quadhover_sim::PhysicsSim;
///
/// let mut env = HoverEnv::<PhysicsSim>::build(&HoverEnvConfig::velocity_hover()).unwrap();
/// let obs = env.reset().unwrap();
/// assert_eq!(obs.as_slice(), &[0.0, 0.0, 10.0, 0.0, 0.0, 0.0]);
///
/// let hover = RotorAct::from([PhysicsSim::hover_rotor_speed(); 4]);
/// let (step, _record) = env.step(&hover).unwrap();
/// assert!(!step.is_done());
/// ```
pub struct HoverEnv<S: Simulator = PhysicsSim> {
    sim: S,
    goal: Vec3,
    encoder: EncoderStrategy,
    reward: RewardStrategy,
    action_low: f64,
    action_high: f64,
    action_size: usize,
    action_repeat: usize,
    phase: Phase,
    history: Vec<Snapshot>,
}

impl<S: Simulator> HoverEnv<S> {
    /// Replaces the goal and starts a new episode.
    ///
    /// The goal must have three finite components.
    pub fn reset_with_goal(&mut self, goal: &[f64]) -> Result<HoverObs> {
        if goal.len() != 3 {
            return Err(HoverError::shape_mismatch("goal", 3, goal.len()).into());
        }
        if goal.iter().any(|x| !x.is_finite()) {
            let msg = format!("goal must be finite, got {:?}", goal);
            return Err(HoverError::InvalidConfig(msg).into());
        }
        self.goal = Vec3::from_column_slice(goal);
        debug!("Goal set to {:?}", self.goal);
        self.reset()
    }

    /// Target position.
    pub fn goal(&self) -> &Vec3 {
        &self.goal
    }

    /// Lower bound of rotor commands.
    pub fn action_low(&self) -> f64 {
        self.action_low
    }

    /// Upper bound of rotor commands.
    pub fn action_high(&self) -> f64 {
        self.action_high
    }

    /// The number of rotor commands in an action.
    pub fn action_size(&self) -> usize {
        self.action_size
    }

    /// Length of observations.
    pub fn state_size(&self) -> usize {
        self.encoder.state_size()
    }

    /// The number of simulator steps per agent step.
    pub fn action_repeat(&self) -> usize {
        self.action_repeat
    }

    /// Returns `true` between a reset and the end of the episode.
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// The underlying simulator.
    pub fn simulator(&self) -> &S {
        &self.sim
    }

    fn initial_history_len(&self) -> usize {
        match self.encoder {
            EncoderStrategy::RepeatedPose { repeat } => repeat,
            _ => 1,
        }
    }
}

impl<S: Simulator> Env for HoverEnv<S> {
    type Config = HoverEnvConfig<S>;
    type Obs = HoverObs;
    type Act = RotorAct;
    type Info = HoverInfo;

    fn build(config: &Self::Config) -> Result<Self> {
        config.validate()?;
        let sim = S::build(&config.sim_config)?;

        if sim.rotor_count() != config.action_size {
            return Err(
                HoverError::shape_mismatch("rotor count", config.action_size, sim.rotor_count())
                    .into(),
            );
        }

        let goal = config.goal.unwrap_or_else(|| sim.pose().position());
        info!(
            "Build HoverEnv: encoder = {:?}, reward = {:?}, action_repeat = {}, goal = {:?}",
            config.encoder, config.reward, config.action_repeat, goal
        );

        Ok(Self {
            sim,
            goal,
            encoder: config.encoder,
            reward: config.reward,
            action_low: config.action_low,
            action_high: config.action_high,
            action_size: config.action_size,
            action_repeat: config.action_repeat,
            phase: Phase::Idle,
            history: Vec::new(),
        })
    }

    fn reset(&mut self) -> Result<HoverObs> {
        self.sim.reset();
        let snapshot = Snapshot::capture(&self.sim);
        self.history.clear();
        self.history.resize(self.initial_history_len(), snapshot);

        let obs = self.encoder.encode(&self.history)?;
        self.phase = Phase::Running(EpisodeState::default());
        trace!("Reset, obs = {:?}", obs);

        Ok(obs.into())
    }

    fn step(&mut self, act: &RotorAct) -> Result<(Step<Self>, Record)> {
        let mut state = match &self.phase {
            Phase::Idle => {
                return Err(HoverError::InvalidState(
                    "step() requires reset() before the first step and after the end of an episode"
                        .to_string(),
                )
                .into())
            }
            Phase::Running(state) => state.clone(),
        };
        let commands = act.as_slice();
        if commands.len() != self.action_size {
            return Err(
                HoverError::shape_mismatch("action", self.action_size, commands.len()).into(),
            );
        }

        // Every sub-step is simulated even after a termination.
        let mut reward = 0.0;
        let mut done = false;
        self.history.clear();
        for _ in 0..self.action_repeat {
            done |= self.sim.advance(commands);
            let snapshot = Snapshot::capture(&self.sim);
            reward += self
                .reward
                .evaluate(&snapshot.pose, &snapshot.velocity, &self.goal);
            self.history.push(snapshot);
        }
        let obs = self.encoder.encode(&self.history)?;

        let termination = self.sim.termination();
        let is_truncated = done && termination == Some(Termination::TimeLimit);
        let is_terminated = done && !is_truncated;

        let pose = *self.sim.pose();
        let distance = (pose.position() - self.goal).norm();
        state.n_steps += 1;
        state.episode_return += reward;

        let mut record = Record::from_slice(&[
            ("distance", RecordValue::Scalar(distance)),
            ("speed", RecordValue::Scalar(self.sim.velocity().norm())),
            ("height", RecordValue::Scalar(pose.height())),
            ("sim_time", RecordValue::Scalar(self.sim.time())),
        ]);
        if let Some(t) = termination {
            record.insert("termination", RecordValue::String(format!("{:?}", t)));
        }
        trace!("Step {}: reward = {}, obs = {:?}", state.n_steps, reward, obs);

        let info = HoverInfo {
            n_steps: state.n_steps,
            sim_time: self.sim.time(),
            distance,
            termination,
        };

        if done {
            debug!(
                "Episode ended after {} steps ({:?}), return = {}",
                state.n_steps, termination, state.episode_return
            );
            self.phase = Phase::Idle;
        } else {
            self.phase = Phase::Running(state);
        }

        let step = Step::new(obs.into(), act.clone(), reward, is_terminated, is_truncated, info);
        Ok((step, record))
    }
}
