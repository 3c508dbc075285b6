use anyhow::Result;
use quadhover_core::{record::BufferedRecorder, util, DefaultEvaluator, Env as _, Evaluator as _};
use quadhover_env::{ConstantPolicy, HoverEnv, HoverEnvConfig, RandomPolicy};

type Env = HoverEnv;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: HoverEnvConfig = HoverEnvConfig::velocity_hover();
    let mut evaluator = DefaultEvaluator::<Env>::new(&config, 3)?;
    let record = evaluator.evaluate(&mut ConstantPolicy::hover())?;
    log::info!(
        "Hover policy: return = {:.3}, length = {}",
        record.get_scalar("Episode return")?,
        record.get_scalar("Episode length")?
    );

    let config: HoverEnvConfig = HoverEnvConfig::waypoint();
    let mut env = Env::build(&config)?;
    let mut policy = RandomPolicy::for_env(&env, 42);
    let mut recorder = BufferedRecorder::new();
    let returns = util::eval_with_recorder(&mut env, &mut policy, 5, &mut recorder)?;

    for (ix, r) in returns.iter().enumerate() {
        log::info!("Random policy on waypoint, episode {}: return = {:.3}", ix, r);
    }
    let closest = recorder
        .iter()
        .filter_map(|r| r.get_scalar("distance").ok())
        .fold(f64::INFINITY, f64::min);
    log::info!("Closest approach to the goal: {:.3} m", closest);

    Ok(())
}
