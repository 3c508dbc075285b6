//! Utilities for interaction of policies and environments.
use crate::{
    record::{RecordValue, Recorder},
    Env, Policy,
};
use anyhow::Result;

/// Runs episodes with a policy and returns the return of each episode.
///
/// Every step record is extended with `"episode"` and `"step"` indices and
/// the policy-side `"reward"`, then written to `recorder`.
pub fn eval_with_recorder<E, P, R>(
    env: &mut E,
    policy: &mut P,
    n_episodes: usize,
    recorder: &mut R,
) -> Result<Vec<f64>>
where
    E: Env,
    P: Policy<E>,
    R: Recorder,
{
    let mut rs = Vec::with_capacity(n_episodes);

    for episode in 0..n_episodes {
        let mut obs = env.reset()?;
        let mut r_sum = 0.0;
        let mut n_steps = 0usize;

        loop {
            let act = policy.sample(&obs);
            let (step, mut record) = env.step(&act)?;
            r_sum += step.reward;
            record.insert("episode", RecordValue::Scalar(episode as f64));
            record.insert("step", RecordValue::Scalar(n_steps as f64));
            record.insert("reward", RecordValue::Scalar(step.reward));
            recorder.write(record);
            n_steps += 1;

            if step.is_done() {
                break;
            }
            obs = step.obs;
        }

        rs.push(r_sum);
    }

    Ok(rs)
}
