//! Reference quadcopter rigid-body simulator.
use crate::{PhysicsSimConfig, Pose, Simulator, Termination, Vec3};
use anyhow::Result;
use log::{debug, info};
use nalgebra::Rotation3;
use std::f64::consts::TAU;

/// Gravitational acceleration along world `z` in m/s^2.
pub const GRAVITY: f64 = -9.81;

/// Air density in kg/m^3.
const RHO: f64 = 1.2;

/// Mass in kg.
const MASS: f64 = 0.958;

/// Integration time step in seconds.
pub const DT: f64 = 1.0 / 50.0;

/// Drag coefficient of the frame.
const C_D: f64 = 0.3;

/// Distance from the center of mass to each rotor in meters.
const L_TO_ROTOR: f64 = 0.4;

/// Propeller diameter in meters.
const PROPELLER_SIZE: f64 = 0.1;

/// Thrust coefficient of a propeller at zero advance ratio.
const C_T0: f64 = 0.12;

/// Frame width, length and height in meters.
const DIMS: [f64; 3] = [0.51, 0.51, 0.235];

/// Side length of the world box in meters.
const ENV_BOUNDS: f64 = 300.0;

const LOWER_BOUNDS: [f64; 3] = [-ENV_BOUNDS / 2.0, -ENV_BOUNDS / 2.0, 0.0];

const UPPER_BOUNDS: [f64; 3] = [ENV_BOUNDS / 2.0, ENV_BOUNDS / 2.0, ENV_BOUNDS];

const DEFAULT_POSE: [f64; 6] = [0.0, 0.0, 10.0, 0.0, 0.0, 0.0];

const N_ROTORS: usize = 4;

/// A quadcopter with four fixed-pitch rotors in a bounded world.
///
/// Each call of [`Simulator::advance`] integrates [`DT`] seconds. Leaving the
/// world box, which includes touching the ground, clamps the position to the
/// box and ends the episode with [`Termination::Boundary`]. Exceeding the
/// configured runtime ends it with [`Termination::TimeLimit`]. Once ended, an
/// episode stays ended until [`Simulator::reset`].
#[derive(Debug, Clone)]
pub struct PhysicsSim {
    config: PhysicsSimConfig,
    pose: Pose,
    v: Vec3,
    angular_v: Vec3,
    linear_accel: Vec3,
    prop_wind_speed: [f64; N_ROTORS],
    time: f64,
    termination: Option<Termination>,
}

impl PhysicsSim {
    /// Rotor speed that balances gravity when all four rotors spin at it
    /// and the vehicle is level and at rest.
    pub fn hover_rotor_speed() -> f64 {
        let thrust_per_rotor = MASS * -GRAVITY / N_ROTORS as f64;
        (thrust_per_rotor / (C_T0 * RHO * PROPELLER_SIZE.powi(4))).sqrt()
    }

    /// Linear acceleration of the last step in world frame.
    pub fn linear_accel(&self) -> &Vec3 {
        &self.linear_accel
    }

    fn dims() -> Vec3 {
        Vec3::from(DIMS)
    }

    fn areas() -> Vec3 {
        let [width, length, height] = DIMS;
        Vec3::new(length * height, width * height, width * length)
    }

    fn moments_of_inertia() -> Vec3 {
        let [width, length, height] = DIMS;
        Vec3::new(
            height.powi(2) + width.powi(2),
            height.powi(2) + length.powi(2),
            width.powi(2) + length.powi(2),
        ) * (MASS / 12.0)
    }

    /// Rotation taking body-frame vectors into the earth frame.
    fn body_to_earth(&self) -> Rotation3<f64> {
        let a = self.pose.angles();
        Rotation3::from_euler_angles(a.x, a.y, a.z)
    }

    fn body_velocity(&self) -> Vec3 {
        self.body_to_earth().inverse_transform_vector(&self.v)
    }

    fn linear_drag(&self) -> Vec3 {
        // The signed square keeps drag opposed to motion.
        self.body_velocity()
            .zip_map(&Self::areas(), |v, a| 0.5 * RHO * v * v.abs() * a * C_D)
    }

    fn linear_forces(&self, thrusts: &[f64; N_ROTORS]) -> Vec3 {
        let body_forces = Vec3::new(0.0, 0.0, thrusts.iter().sum()) - self.linear_drag();
        let mut forces = self.body_to_earth() * body_forces;
        forces.z += MASS * GRAVITY;
        forces
    }

    fn moments(&self, thrusts: &[f64; N_ROTORS]) -> Vec3 {
        let thrust_moment = Vec3::new(
            (thrusts[3] - thrusts[2]) * L_TO_ROTOR,
            (thrusts[1] - thrusts[0]) * L_TO_ROTOR,
            0.0,
        );
        let lever = Self::areas().component_mul(&Self::dims().component_mul(&Self::dims()));
        let drag = self
            .angular_v
            .zip_map(&lever, |w, k| C_D * 0.5 * RHO * w * w.abs() * k);
        thrust_moment - drag
    }

    /// Airspeed through each propeller disc along body `z`.
    fn update_prop_wind_speed(&mut self) {
        let bz = self.body_velocity().z;
        let phi_dot = self.angular_v.x;
        let theta_dot = self.angular_v.y;
        let s = [
            theta_dot * L_TO_ROTOR,
            -theta_dot * L_TO_ROTOR,
            phi_dot * L_TO_ROTOR,
            -phi_dot * L_TO_ROTOR,
        ];
        for (w, s) in self.prop_wind_speed.iter_mut().zip(s.iter()) {
            *w = s + bz;
        }
    }

    /// Net thrust of each propeller given its speed and inflow.
    fn propeller_thrusts(&self, rotor_speeds: &[f64]) -> [f64; N_ROTORS] {
        let mut thrusts = [0.0; N_ROTORS];
        for (i, t) in thrusts.iter_mut().enumerate() {
            let n = rotor_speeds.get(i).copied().unwrap_or(0.0);
            // A stopped rotor has an undefined advance ratio and produces no thrust.
            if n == 0.0 {
                continue;
            }
            let j = self.prop_wind_speed[i] / n * PROPELLER_SIZE;
            let j = j.max(0.0);
            let c_t = (C_T0 - 0.07 * j - 0.1 * j * j).max(0.0);
            *t = c_t * RHO * n * n * PROPELLER_SIZE.powi(4);
        }
        thrusts
    }

    fn terminate(&mut self, reason: Termination) {
        if self.termination.is_none() {
            debug!("PhysicsSim terminated at t = {:.2}: {:?}", self.time, reason);
            self.termination = Some(reason);
        }
    }
}

impl Simulator for PhysicsSim {
    type Config = PhysicsSimConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        config.validate()?;
        info!("Initialize PhysicsSim, runtime = {}", config.runtime);
        let mut sim = Self {
            config: config.clone(),
            pose: Pose(DEFAULT_POSE),
            v: Vec3::zeros(),
            angular_v: Vec3::zeros(),
            linear_accel: Vec3::zeros(),
            prop_wind_speed: [0.0; N_ROTORS],
            time: 0.0,
            termination: None,
        };
        sim.reset();
        Ok(sim)
    }

    fn advance(&mut self, rotor_speeds: &[f64]) -> bool {
        self.update_prop_wind_speed();
        let thrusts = self.propeller_thrusts(rotor_speeds);

        self.linear_accel = self.linear_forces(&thrusts) / MASS;
        let mut position =
            self.pose.position() + self.v * DT + self.linear_accel * (0.5 * DT * DT);
        self.v += self.linear_accel * DT;

        let angular_accels = self
            .moments(&thrusts)
            .component_div(&Self::moments_of_inertia());
        let angles = (self.pose.angles()
            + self.angular_v * DT
            + angular_accels * (0.5 * DT * DT))
            .map(|a| a.rem_euclid(TAU));
        self.angular_v += angular_accels * DT;

        let mut out_of_bounds = false;
        for i in 0..3 {
            if position[i] <= LOWER_BOUNDS[i] {
                position[i] = LOWER_BOUNDS[i];
                out_of_bounds = true;
            } else if position[i] > UPPER_BOUNDS[i] {
                position[i] = UPPER_BOUNDS[i];
                out_of_bounds = true;
            }
        }
        self.pose = Pose::new(position, angles);
        self.time += DT;

        if out_of_bounds {
            self.terminate(Termination::Boundary);
        }
        if self.time > self.config.runtime {
            self.terminate(Termination::TimeLimit);
        }
        self.termination.is_some()
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.pose = self.config.init_pose.unwrap_or(Pose(DEFAULT_POSE));
        self.v = self.config.init_velocities.unwrap_or_else(Vec3::zeros);
        self.angular_v = self
            .config
            .init_angle_velocities
            .unwrap_or_else(Vec3::zeros);
        self.linear_accel = Vec3::zeros();
        self.prop_wind_speed = [0.0; N_ROTORS];
        self.termination = None;
    }

    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn velocity(&self) -> &Vec3 {
        &self.v
    }

    fn angular_velocity(&self) -> &Vec3 {
        &self.angular_v
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn rotor_count(&self) -> usize {
        N_ROTORS
    }

    fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn sim(config: PhysicsSimConfig) -> PhysicsSim {
        PhysicsSim::build(&config).unwrap()
    }

    fn assert_close(a: &Vec3, b: &Vec3) {
        assert!((a - b).norm() < 1e-12, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_initial_conditions() {
        let s = sim(PhysicsSimConfig::default());
        assert_eq!(s.pose(), &Pose(DEFAULT_POSE));
        assert_eq!(s.velocity(), &Vec3::zeros());
        assert_eq!(s.angular_velocity(), &Vec3::zeros());
        assert_eq!(s.time(), 0.0);
        assert_eq!(s.termination(), None);
    }

    #[test]
    fn test_hover_keeps_position() {
        let mut s = sim(PhysicsSimConfig::default());
        let n = PhysicsSim::hover_rotor_speed();
        for _ in 0..50 {
            assert!(!s.advance(&[n; 4]));
        }
        let p = s.pose().position();
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
        assert!((p.z - 10.0).abs() < 1e-6);
        assert!(s.velocity().iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn test_free_fall() {
        let mut s = sim(PhysicsSimConfig::default());
        s.advance(&[0.0; 4]);
        let z = s.pose().height();
        assert!((z - (10.0 + 0.5 * GRAVITY * DT * DT)).abs() < 1e-12);
        assert!((s.velocity().z - GRAVITY * DT).abs() < 1e-12);
        assert!((s.linear_accel().z - GRAVITY).abs() < 1e-12);
    }

    #[test]
    fn test_body_velocity_follows_yaw() {
        // Yawing the body by 90 degrees makes the earth x axis the body -y axis.
        let config = PhysicsSimConfig::default()
            .init_pose([0.0, 0.0, 10.0, 0.0, 0.0, FRAC_PI_2])
            .init_velocities([1.0, 0.0, 0.0]);
        let s = sim(config);
        assert_close(&s.body_velocity(), &Vec3::new(0.0, -1.0, 0.0));

        let r = s.body_to_earth();
        assert_close(&(r * s.body_velocity()), s.velocity());
    }

    #[test]
    fn test_ground_impact_is_sticky() {
        let config = PhysicsSimConfig::default().init_pose([0.0, 0.0, 0.001, 0.0, 0.0, 0.0]);
        let mut s = sim(config);
        assert!(s.advance(&[0.0; 4]));
        assert_eq!(s.pose().height(), 0.0);
        assert_eq!(s.termination(), Some(Termination::Boundary));

        // Full thrust lifts the vehicle again, but the episode stays ended.
        assert!(s.advance(&[900.0; 4]));
        assert!(s.pose().height() > 0.0);
        assert_eq!(s.termination(), Some(Termination::Boundary));

        s.reset();
        assert_eq!(s.termination(), None);
        assert_eq!(s.pose().height(), 0.001);
    }

    #[test]
    fn test_time_limit() {
        let config = PhysicsSimConfig::default().runtime(0.1);
        let mut s = sim(config);
        let n = PhysicsSim::hover_rotor_speed();
        let mut steps = 0;
        while !s.advance(&[n; 4]) {
            steps += 1;
        }
        // 0.1 s at 50 Hz; the step pushing time past the runtime ends the episode.
        assert_eq!(steps, 5);
        assert_eq!(s.termination(), Some(Termination::TimeLimit));
    }

    #[test]
    fn test_differential_thrust_rolls() {
        let mut s = sim(PhysicsSimConfig::default());
        let n = PhysicsSim::hover_rotor_speed();
        s.advance(&[n, n, n, n * 1.1]);
        assert!(s.angular_velocity().x > 0.0);
        assert_eq!(s.angular_velocity().y, 0.0);
    }
}
