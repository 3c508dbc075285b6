use anyhow::Result;
use quadhover_core::{
    record::{BufferedRecorder, NullRecorder},
    util::eval_with_recorder,
    DefaultEvaluator, Env, Evaluator as _,
};
use quadhover_env::{ConstantPolicy, HoverEnv, HoverEnvConfig, RandomPolicy};
use quadhover_sim::PhysicsSimConfig;
use test_log::test;

fn short_runtime() -> PhysicsSimConfig {
    PhysicsSimConfig::default().runtime(0.1)
}

#[test]
fn test_evaluate_hover_policy() -> Result<()> {
    let config: HoverEnvConfig = HoverEnvConfig::velocity_hover().sim_config(short_runtime());
    let mut evaluator = DefaultEvaluator::<HoverEnv>::new(&config, 2)?;
    let record = evaluator.evaluate(&mut ConstantPolicy::hover())?;

    assert_eq!(record.get_scalar("Episode length")?, 6.0);
    let ret = record.get_scalar("Episode return")?;
    assert!((ret - 6.0 * 0.9f64.powi(10)).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_random_policy_rollouts_are_recorded() -> Result<()> {
    let config: HoverEnvConfig = HoverEnvConfig::waypoint().sim_config(short_runtime());
    let mut env = HoverEnv::build(&config)?;
    let mut policy = RandomPolicy::for_env(&env, 42);
    let mut recorder = BufferedRecorder::new();

    let returns = eval_with_recorder(&mut env, &mut policy, 3, &mut recorder)?;
    assert_eq!(returns.len(), 3);
    assert!(returns.iter().all(|r| r.is_finite()));

    // Two agent steps of three simulator steps each per episode.
    assert_eq!(recorder.len(), 6);
    for record in recorder.iter() {
        for key in ["episode", "step", "reward", "distance", "speed", "height", "sim_time"].iter() {
            assert!(record.get_scalar(key).is_ok(), "missing {}", key);
        }
    }

    let rewards: f64 = recorder
        .iter()
        .map(|r| r.get_scalar("reward").unwrap())
        .sum();
    assert!((rewards - returns.iter().sum::<f64>()).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_presets_build() -> Result<()> {
    let configs: [HoverEnvConfig; 4] = [
        HoverEnvConfig::velocity_hover(),
        HoverEnvConfig::default_limit_hover(),
        HoverEnvConfig::sigmoid_hover(),
        HoverEnvConfig::waypoint(),
    ];
    let sizes = [6, 3, 3, 18];

    for (config, size) in configs.iter().zip(sizes.iter()) {
        let mut env = HoverEnv::build(config)?;
        assert_eq!(env.state_size(), *size);
        assert_eq!(env.action_size(), 4);
        assert!(env.action_low() < env.action_high());
        assert_eq!(env.reset()?.len(), *size);
    }
    Ok(())
}

#[test]
fn test_sigmoid_hover_returns_are_bounded() -> Result<()> {
    let config: HoverEnvConfig = HoverEnvConfig::sigmoid_hover().sim_config(short_runtime());
    let mut env = HoverEnv::build(&config)?;
    let mut policy = RandomPolicy::for_env(&env, 7);

    // Six steps per episode, each rewarded in (0, 1).
    let returns = eval_with_recorder(&mut env, &mut policy, 4, &mut NullRecorder::default())?;
    assert!(returns.iter().all(|r| *r > 0.0 && *r < 6.0));
    Ok(())
}
