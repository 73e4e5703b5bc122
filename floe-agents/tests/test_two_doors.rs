mod common;
use anyhow::Result;
use common::{
    assert_close, run_episodes, TwoDoors, TwoDoorsConfig, END, LEFT, RIGHT, START,
};
use floe_agents::{
    explorer::{EpsilonGreedy, EpsilonSchedule},
    monte_carlo::{MonteCarlo, MonteCarloConfig},
    td_lambda::{TdLambda, TdLambdaConfig},
    td_zero::{TdZero, TdZeroConfig},
};
use floe_core::{
    record::BufferedRecorder, Agent, Configurable, DefaultEvaluator, Env, Policy, Trainer,
    TrainerConfig,
};
use test_log::test;

const DETERMINISTIC_CASES: [(&str, f64, f64); 4] = [
    ("always left", 1.0, 0.0),
    ("always right", 0.0, 1.0),
    ("both rewarded", 1.0, 1.0),
    ("none rewarded", 0.0, 0.0),
];

fn check_learned<A: Agent<TwoDoors>>(
    agent: &A,
    name: &str,
    p_left: f64,
    p_right: f64,
    tol: f64,
) -> Result<()> {
    let values = agent.dump_values()?;
    assert_close(p_left, values[START][LEFT], tol, &format!("{}: START-LEFT", name));
    assert_close(p_right, values[START][RIGHT], tol, &format!("{}: START-RIGHT", name));
    assert_eq!(values[END], vec![0.0, 0.0], "{}: END", name);
    Ok(())
}

fn random_explorer() -> EpsilonGreedy {
    EpsilonGreedy::with_schedule(EpsilonSchedule::Constant { eps: 1.0 })
}

#[test]
fn test_two_doors_deterministic_monte_carlo() -> Result<()> {
    for (name, p_left, p_right) in DETERMINISTIC_CASES.iter() {
        let config = MonteCarloConfig::default().discount_factor(1.0);
        let mut agent = MonteCarlo::<TwoDoors>::build(config)?;
        let mut env = TwoDoors::build(&TwoDoorsConfig::new(*p_left, *p_right), 0)?;
        run_episodes(&mut agent, &mut env, 1000)?;
        check_learned(&agent, name, *p_left, *p_right, 0.05)?;
    }
    Ok(())
}

#[test]
fn test_two_doors_deterministic_td_zero() -> Result<()> {
    for (name, p_left, p_right) in DETERMINISTIC_CASES.iter() {
        let config = TdZeroConfig::default().discount_factor(1.0).step_size(0.4);
        let mut agent = TdZero::<TwoDoors>::build(config)?;
        let mut env = TwoDoors::build(&TwoDoorsConfig::new(*p_left, *p_right), 0)?;
        run_episodes(&mut agent, &mut env, 1000)?;
        check_learned(&agent, name, *p_left, *p_right, 0.05)?;
    }
    Ok(())
}

#[test]
fn test_two_doors_deterministic_td_lambda() -> Result<()> {
    for (name, p_left, p_right) in DETERMINISTIC_CASES.iter() {
        let config = TdLambdaConfig::default()
            .discount_factor(1.0)
            .step_size(0.4)
            .trace_decay(0.8);
        let mut agent = TdLambda::<TwoDoors>::build(config)?;
        let mut env = TwoDoors::build(&TwoDoorsConfig::new(*p_left, *p_right), 0)?;
        run_episodes(&mut agent, &mut env, 1000)?;
        check_learned(&agent, name, *p_left, *p_right, 0.05)?;
    }
    Ok(())
}

#[test]
fn test_two_doors_stochastic_monte_carlo() -> Result<()> {
    let config = MonteCarloConfig::default()
        .discount_factor(1.0)
        .explorer(random_explorer());
    let mut agent = MonteCarlo::<TwoDoors>::build(config)?;
    let mut env = TwoDoors::build(&TwoDoorsConfig::new(0.7, 0.3), 1)?;
    run_episodes(&mut agent, &mut env, 4000)?;
    check_learned(&agent, "prefer left", 0.7, 0.3, 0.05)?;
    assert_eq!(Policy::<TwoDoors>::sample(&mut agent, START)?, LEFT);

    // the incremental mean divides by the number of selections
    let counts = agent.counts().unwrap();
    assert_eq!(counts.get(START, LEFT)? + counts.get(START, RIGHT)?, 4000);
    Ok(())
}

#[test]
fn test_two_doors_stochastic_td_zero() -> Result<()> {
    let config = TdZeroConfig::default()
        .discount_factor(1.0)
        .step_size(0.002)
        .explorer(random_explorer());
    let mut agent = TdZero::<TwoDoors>::build(config)?;
    let mut env = TwoDoors::build(&TwoDoorsConfig::new(0.7, 0.3), 2)?;
    run_episodes(&mut agent, &mut env, 10_000)?;
    check_learned(&agent, "prefer left", 0.7, 0.3, 0.06)?;
    Ok(())
}

#[test]
fn test_two_doors_stochastic_td_lambda() -> Result<()> {
    let config = TdLambdaConfig::default()
        .discount_factor(1.0)
        .step_size(0.002)
        .explorer(random_explorer());
    let mut agent = TdLambda::<TwoDoors>::build(config)?;
    let mut env = TwoDoors::build(&TwoDoorsConfig::new(0.5, 0.5), 3)?;
    run_episodes(&mut agent, &mut env, 10_000)?;
    check_learned(&agent, "both half", 0.5, 0.5, 0.06)?;
    Ok(())
}

#[test]
fn test_reported_returns() -> Result<()> {
    let mut env = TwoDoors::build(&TwoDoorsConfig::new(1.0, 1.0), 0)?;

    let mut mc = MonteCarlo::<TwoDoors>::build(MonteCarloConfig::default().discount_factor(0.5))?;
    let returns = run_episodes(&mut mc, &mut env, 10)?;
    assert!(returns.iter().all(|r| *r == 1.0), "{:?}", returns);

    let mut td = TdZero::<TwoDoors>::build(TdZeroConfig::default())?;
    let returns = run_episodes(&mut td, &mut env, 10)?;
    assert!(returns.iter().all(|r| *r == 1.0), "{:?}", returns);
    assert_eq!(Agent::<TwoDoors>::episodes(&td), 10);
    Ok(())
}

#[test]
fn test_same_seed_same_values() -> Result<()> {
    let run = |seed: u64| -> Result<Vec<Vec<f64>>> {
        let config = TdLambdaConfig::default().seed(seed);
        let mut agent = TdLambda::<TwoDoors>::build(config)?;
        let mut env = TwoDoors::build(&TwoDoorsConfig::new(0.6, 0.4), 0)?;
        run_episodes(&mut agent, &mut env, 200)?;
        Ok(agent.dump_values()?)
    };
    assert_eq!(run(5)?, run(5)?);
    Ok(())
}

#[test]
fn test_trainer_solves_two_doors() -> Result<()> {
    let env_config = TwoDoorsConfig::new(1.0, 0.0);
    let config = TrainerConfig::default()
        .max_episodes(2000)
        .max_steps(10)
        .report_interval(100)
        .window(10)
        .solved_threshold(Some(0.95))
        .eval_interval(100);
    let mut trainer = Trainer::<TwoDoors>::build(config, env_config.clone());
    let mut agent = MonteCarlo::<TwoDoors>::build(MonteCarloConfig::default())?;
    let mut recorder = BufferedRecorder::new();
    let mut evaluator = DefaultEvaluator::<TwoDoors>::new(&env_config, 0, 10, 10)?;
    let summary = trainer.train(&mut agent, &mut recorder, &mut evaluator)?;

    assert!(summary.is_solved);
    assert!(summary.average_return >= 0.95);
    assert_eq!(summary.episodes, Agent::<TwoDoors>::episodes(&agent));

    // greedy evaluation always opens the rewarded door
    let record = floe_core::Evaluator::evaluate(&mut evaluator, &mut agent)?;
    assert_eq!(record.get_scalar("eval_return")?, 1.0);
    Ok(())
}
