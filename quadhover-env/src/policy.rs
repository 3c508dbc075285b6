//! Reference policies for [`HoverEnv`].
use crate::{HoverEnv, HoverObs, RotorAct};
use quadhover_core::Policy;
use quadhover_sim::{PhysicsSim, Simulator};

/// Always commands the same rotor speeds.
#[derive(Clone, Debug)]
pub struct ConstantPolicy {
    act: RotorAct,
}

impl ConstantPolicy {
    /// Commands `speeds` at every step.
    pub fn new(speeds: Vec<f64>) -> Self {
        Self {
            act: RotorAct::new(speeds),
        }
    }

    /// Commands the speed at which the four rotors of [`PhysicsSim`] balance gravity.
    pub fn hover() -> Self {
        Self::new(vec![PhysicsSim::hover_rotor_speed(); 4])
    }
}

impl<S: Simulator> Policy<HoverEnv<S>> for ConstantPolicy {
    fn sample(&mut self, _obs: &HoverObs) -> RotorAct {
        self.act.clone()
    }
}

/// Samples rotor speeds uniformly from `[low, high)`.
pub struct RandomPolicy {
    rng: fastrand::Rng,
    n_rotors: usize,
    low: f64,
    high: f64,
}

impl RandomPolicy {
    /// Constructs a policy with a seeded generator.
    pub fn new(n_rotors: usize, low: f64, high: f64, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            n_rotors,
            low,
            high,
        }
    }

    /// Uses the action metadata of an environment.
    pub fn for_env<S: Simulator>(env: &HoverEnv<S>, seed: u64) -> Self {
        Self::new(env.action_size(), env.action_low(), env.action_high(), seed)
    }
}

impl<S: Simulator> Policy<HoverEnv<S>> for RandomPolicy {
    fn sample(&mut self, _obs: &HoverObs) -> RotorAct {
        let speeds = (0..self.n_rotors)
            .map(|_| self.low + (self.high - self.low) * self.rng.f64())
            .collect::<Vec<_>>();
        RotorAct::new(speeds)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_random_policy_in_range_and_seeded() {
        let obs = HoverObs::from(vec![0.0; 6]);
        let mut p1 = RandomPolicy::new(4, 350.0, 450.0, 42);
        let mut p2 = RandomPolicy::new(4, 350.0, 450.0, 42);

        for _ in 0..100 {
            let a1 = <RandomPolicy as Policy<HoverEnv>>::sample(&mut p1, &obs);
            let a2 = <RandomPolicy as Policy<HoverEnv>>::sample(&mut p2, &obs);
            assert_eq!(a1, a2);
            assert_eq!(a1.as_slice().len(), 4);
            assert!(a1.as_slice().iter().all(|v| (350.0..450.0).contains(v)));
        }
    }

    #[test]
    fn test_hover_policy() {
        let mut p = ConstantPolicy::hover();
        let a = <ConstantPolicy as Policy<HoverEnv>>::sample(&mut p, &HoverObs::from(vec![]));
        assert_eq!(a.as_slice(), &[PhysicsSim::hover_rotor_speed(); 4]);
    }
}
