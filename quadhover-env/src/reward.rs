//! Reward shaping strategies.
use quadhover_core::HoverError;
use quadhover_sim::{Pose, Vec3};
use serde::{Deserialize, Serialize};

/// Default normalizing distance of [`RewardStrategy::LimitHover`] in meters.
pub const DEFAULT_MAX_DISTANCE: f64 = 5.0;

/// Scale dividing distance and speed before clamping to `[0, 1]` in
/// [`RewardStrategy::VelocityHover`].
const VELOCITY_HOVER_SCALE: f64 = 10.0;

/// Floor applied to the normalized speed and distance in
/// [`RewardStrategy::VelocityHover`].
const VELOCITY_HOVER_FLOOR: f64 = 0.1;

/// Distance at which the sigmoid rewards cross their midpoint.
const SIGMOID_OFFSET: f64 = 6.0;

/// Slope of [`RewardStrategy::TanhHover`].
const TANH_SLOPE: f64 = 0.3;

/// Per-meter penalty of [`RewardStrategy::LinearManhattan`].
const MANHATTAN_SLOPE: f64 = 0.3;

/// Maps the state of the vehicle and the goal position to a scalar reward.
///
/// `d` is the Euclidean distance between position and goal and `v` the norm
/// of the linear velocity. Except for [`RewardStrategy::LinearManhattan`], a
/// pose at or below the ground yields the strategy's crash reward without
/// looking at `d` or `v`.
///
/// | Strategy | Crash | Reward |
/// |---|---|---|
/// | `VelocityHover` | 0 | `(1 - d'^0.4) * (1 - max(v', 0.1))^(1 / max(d', 0.1))`, `d' = clamp(d/10)`, `v' = clamp(v/10)` |
/// | `LimitHover` | -10 | `clamp(1 - (d / max_distance)^0.4, 0, 1)` |
/// | `SigmoidHover` | 0 | `1 / (1 + exp(d - 6))` |
/// | `SigmoidHoverBipolar` | -1000 | `2 / (1 + exp(d - 6)) - 1` |
/// | `TanhHover` | 0 | `1 - tanh(0.3 d)` |
/// | `LinearManhattan` | - | `1 - 0.3 * sum_i |p_i - g_i|` |
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RewardStrategy {
    /// Rewards closeness to the goal, discounted by speed.
    VelocityHover,

    /// Rewards closeness to the goal within `max_distance`.
    LimitHover {
        /// Distance at which the reward reaches zero.
        max_distance: f64,
    },

    /// Sigmoid of the distance, in `(0, 1)`.
    SigmoidHover,

    /// Sigmoid of the distance rescaled to `(-1, 1)` with a severe crash penalty.
    SigmoidHoverBipolar,

    /// Hyperbolic tangent of the distance, in `(0, 1]`.
    TanhHover,

    /// Linear in the Manhattan distance, unbounded below.
    LinearManhattan,
}

impl Default for RewardStrategy {
    fn default() -> Self {
        Self::VelocityHover
    }
}

/// Distance term and velocity discount of [`RewardStrategy::VelocityHover`].
fn velocity_hover_terms(d: f64, v: f64) -> (f64, f64) {
    let d = (d / VELOCITY_HOVER_SCALE).clamp(0.0, 1.0);
    let v = (v / VELOCITY_HOVER_SCALE).clamp(0.0, 1.0);
    let dist_reward = 1.0 - d.powf(0.4);
    let vel_discount =
        (1.0 - v.max(VELOCITY_HOVER_FLOOR)).powf(1.0 / d.max(VELOCITY_HOVER_FLOOR));
    (dist_reward, vel_discount)
}

fn sigmoid_of_distance(d: f64) -> f64 {
    1.0 / (1.0 + (d - SIGMOID_OFFSET).exp())
}

impl RewardStrategy {
    /// The reward returned when the vehicle is at or below the ground, or
    /// `None` if the strategy has no crash rule.
    pub fn crash_reward(&self) -> Option<f64> {
        match self {
            Self::VelocityHover => Some(0.0),
            Self::LimitHover { .. } => Some(-10.0),
            Self::SigmoidHover => Some(0.0),
            Self::SigmoidHoverBipolar => Some(-1000.0),
            Self::TanhHover => Some(0.0),
            Self::LinearManhattan => None,
        }
    }

    /// Checks parameters that would otherwise appear in a denominator.
    pub fn validate(&self) -> Result<(), HoverError> {
        if let Self::LimitHover { max_distance } = self {
            if !(max_distance.is_finite() && *max_distance > 0.0) {
                return Err(HoverError::InvalidConfig(format!(
                    "max_distance must be finite and positive, got {}",
                    max_distance
                )));
            }
        }
        Ok(())
    }

    /// Returns the reward of the given state.
    ///
    /// This is a pure function of its arguments.
    pub fn evaluate(&self, pose: &Pose, velocity: &Vec3, goal: &Vec3) -> f64 {
        if let Some(r) = self.crash_reward() {
            if pose.height() <= 0.0 {
                return r;
            }
        }

        let offset = pose.position() - goal;
        let d = offset.norm();

        match self {
            Self::VelocityHover => {
                let (dist_reward, vel_discount) = velocity_hover_terms(d, velocity.norm());
                dist_reward * vel_discount
            }
            Self::LimitHover { max_distance } => {
                (1.0 - (d / max_distance).powf(0.4)).clamp(0.0, 1.0)
            }
            Self::SigmoidHover => sigmoid_of_distance(d),
            Self::SigmoidHoverBipolar => 2.0 * sigmoid_of_distance(d) - 1.0,
            Self::TanhHover => 1.0 - (TANH_SLOPE * d).tanh(),
            Self::LinearManhattan => 1.0 - MANHATTAN_SLOPE * offset.lp_norm(1),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL: [RewardStrategy; 6] = [
        RewardStrategy::VelocityHover,
        RewardStrategy::LimitHover {
            max_distance: DEFAULT_MAX_DISTANCE,
        },
        RewardStrategy::SigmoidHover,
        RewardStrategy::SigmoidHoverBipolar,
        RewardStrategy::TanhHover,
        RewardStrategy::LinearManhattan,
    ];

    fn goal() -> Vec3 {
        Vec3::new(0.0, 0.0, 10.0)
    }

    fn rest() -> Vec3 {
        Vec3::zeros()
    }

    fn at(x: f64, y: f64, z: f64) -> Pose {
        Pose([x, y, z, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_distance_term_is_one_at_goal() {
        for v in [0.0, 0.05, 3.0, 50.0].iter() {
            let (dist_reward, _) = velocity_hover_terms(0.0, *v);
            assert_eq!(dist_reward, 1.0);
        }
    }

    #[test]
    fn test_velocity_hover_floor_at_goal() {
        // At the goal and at rest both floors apply: 0.9^(1 / 0.1).
        let r = RewardStrategy::VelocityHover.evaluate(&at(0.0, 0.0, 10.0), &rest(), &goal());
        assert!((r - 0.9f64.powi(10)).abs() < 1e-12);

        // Faster motion is discounted more.
        let v = Vec3::new(5.0, 0.0, 0.0);
        let fast = RewardStrategy::VelocityHover.evaluate(&at(0.0, 0.0, 10.0), &v, &goal());
        assert!(fast < r);
        assert!((fast - 0.5f64.powi(10)).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_hover_far_away() {
        // Normalized distance saturates at 1, so the distance term vanishes.
        let r = RewardStrategy::VelocityHover.evaluate(&at(0.0, 0.0, 30.0), &rest(), &goal());
        assert_eq!(r, 0.0);
    }

    #[test]
    fn test_crash_rewards() {
        let expected = [Some(0.0), Some(-10.0), Some(0.0), Some(-1000.0), Some(0.0), None];
        for (strategy, expected) in ALL.iter().zip(expected.iter()) {
            assert_eq!(strategy.crash_reward(), *expected);
            if let Some(crash) = expected {
                for z in [0.0, -0.5].iter() {
                    for v in [rest(), Vec3::new(40.0, -3.0, 100.0)].iter() {
                        let r = strategy.evaluate(&at(0.0, 0.0, *z), v, &goal());
                        assert_eq!(r, *crash, "{:?}", strategy);
                    }
                }
            }
        }
    }

    #[test]
    fn test_linear_manhattan_has_no_crash_rule() {
        let r = RewardStrategy::LinearManhattan.evaluate(&at(1.0, -2.0, 0.0), &rest(), &goal());
        assert!((r - (1.0 - 0.3 * 13.0)).abs() < 1e-12);
    }

    #[test]
    fn test_limit_hover_is_clamped() {
        let strategy = RewardStrategy::LimitHover { max_distance: 5.0 };
        for z in [0.01, 1.0, 5.0, 9.0, 10.0, 12.0, 15.0, 40.0, 1e6].iter() {
            let r = strategy.evaluate(&at(0.0, 0.0, *z), &rest(), &goal());
            assert!((0.0..=1.0).contains(&r), "z = {}, r = {}", z, r);
        }
        assert_eq!(strategy.evaluate(&at(0.0, 0.0, 10.0), &rest(), &goal()), 1.0);
        assert_eq!(strategy.evaluate(&at(0.0, 0.0, 16.0), &rest(), &goal()), 0.0);
    }

    #[test]
    fn test_sigmoid_decreasing_in_distance() {
        let mut prev = f64::INFINITY;
        for d in (0..200).map(|i| i as f64 * 0.25) {
            let r = RewardStrategy::SigmoidHover.evaluate(&at(d, 0.0, 10.0), &rest(), &goal());
            assert!(r < prev);
            prev = r;
        }
        let far = RewardStrategy::SigmoidHover.evaluate(&at(1e4, 0.0, 10.0), &rest(), &goal());
        assert!(far.is_finite() && far < 1e-12);
        assert!((sigmoid_of_distance(6.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_bipolar_and_tanh_ranges() {
        let bipolar = RewardStrategy::SigmoidHoverBipolar;
        let near = bipolar.evaluate(&at(0.0, 0.0, 10.0), &rest(), &goal());
        let far = bipolar.evaluate(&at(1e4, 0.0, 10.0), &rest(), &goal());
        assert!(near > 0.99 && near < 1.0);
        assert_eq!(far, -1.0);

        let tanh = RewardStrategy::TanhHover;
        assert_eq!(tanh.evaluate(&at(0.0, 0.0, 10.0), &rest(), &goal()), 1.0);
        let r = tanh.evaluate(&at(3.0, 4.0, 10.0), &rest(), &goal());
        assert!((r - (1.0 - 1.5f64.tanh())).abs() < 1e-12);
    }

    #[test]
    fn test_rewards_are_finite() {
        let poses = [at(0.0, 0.0, 10.0), at(150.0, -150.0, 300.0), at(1e-9, 0.0, 1e-9)];
        let velocities = [rest(), Vec3::new(1e3, -1e3, 1e3)];
        for strategy in ALL.iter() {
            for pose in poses.iter() {
                for v in velocities.iter() {
                    assert!(strategy.evaluate(pose, v, &goal()).is_finite());
                }
            }
        }
    }

    #[test]
    fn test_validate_max_distance() {
        assert!(RewardStrategy::LimitHover { max_distance: 5.0 }.validate().is_ok());
        assert!(RewardStrategy::LimitHover { max_distance: 0.0 }.validate().is_err());
        assert!(RewardStrategy::LimitHover {
            max_distance: f64::NAN
        }
        .validate()
        .is_err());
        assert!(RewardStrategy::SigmoidHover.validate().is_ok());
    }
}
