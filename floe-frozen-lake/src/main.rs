use anyhow::Result;
use clap::{Parser, ValueEnum};
use floe_agents::{
    monte_carlo::MonteCarloConfig, td_lambda::TdLambdaConfig, td_zero::TdZeroConfig,
};
use floe_core::{
    record::{AggregateRecorder, LogRecorder, NullRecorder},
    util::format_values,
    TrainerConfig,
};
use floe_frozen_lake::{AgentConfig, FrozenLakeConfig, RunConfig};
use log::info;
use std::path::PathBuf;

const MAX_EPISODES: usize = 100_000;
const MAX_STEPS: usize = 100;
const DISCOUNT_FACTOR: f64 = 0.9;
const STEP_SIZE: f64 = 0.1;
const TRACE_DECAY: f64 = 0.8;
const REPORT_INTERVAL: usize = 1000;
const EVAL_INTERVAL: usize = 5000;
const N_EPISODES_PER_EVAL: usize = 100;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AgentKind {
    MonteCarlo,
    TdZero,
    TdLambda,
}

/// Train a tabular agent on Frozen Lake
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Learning rule
    #[arg(short, long, value_enum, default_value_t = AgentKind::TdLambda)]
    agent: AgentKind,

    /// Maximum number of episodes
    #[arg(short, long, default_value_t = MAX_EPISODES)]
    episodes: usize,

    /// Step budget of an episode
    #[arg(long, default_value_t = MAX_STEPS)]
    max_steps: usize,

    /// Discount factor
    #[arg(long, default_value_t = DISCOUNT_FACTOR)]
    gamma: f64,

    /// Step size of TD agents
    #[arg(long, default_value_t = STEP_SIZE)]
    alpha: f64,

    /// Trace decay of TD(lambda)
    #[arg(long, default_value_t = TRACE_DECAY)]
    lambda: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Ice is not slippery
    #[arg(long, default_value_t = false)]
    not_slippery: bool,

    /// YAML file of a run configuration, overrides the other options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save the run configuration to a YAML file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Do not report progress during training
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn agent_config(args: &Args) -> AgentConfig {
    match args.agent {
        AgentKind::MonteCarlo => AgentConfig::MonteCarlo(
            MonteCarloConfig::default()
                .discount_factor(args.gamma)
                .seed(args.seed),
        ),
        AgentKind::TdZero => AgentConfig::TdZero(
            TdZeroConfig::default()
                .discount_factor(args.gamma)
                .step_size(args.alpha)
                .seed(args.seed),
        ),
        AgentKind::TdLambda => AgentConfig::TdLambda(
            TdLambdaConfig::default()
                .discount_factor(args.gamma)
                .step_size(args.alpha)
                .trace_decay(args.lambda)
                .seed(args.seed),
        ),
    }
}

fn run_config(args: &Args) -> Result<RunConfig> {
    if let Some(path) = &args.config {
        return RunConfig::load(path);
    }

    let env = if args.not_slippery {
        FrozenLakeConfig::not_slippery()
    } else {
        FrozenLakeConfig::default()
    };
    let trainer = TrainerConfig::default()
        .max_episodes(args.episodes)
        .max_steps(args.max_steps)
        .report_interval(REPORT_INTERVAL)
        .eval_interval(EVAL_INTERVAL)
        .solved_threshold(Some(env.solved_threshold()))
        .seed(args.seed as i64);
    Ok(RunConfig {
        env,
        trainer,
        agent: agent_config(args),
        eval_episodes: N_EPISODES_PER_EVAL,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = run_config(&args)?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }
    if config.env.is_slippery {
        info!("The ice is slippery");
    } else {
        info!("The ice is NOT slippery");
    }

    let mut recorder: Box<dyn AggregateRecorder> = if args.quiet {
        Box::new(NullRecorder::new())
    } else {
        Box::new(LogRecorder::new())
    };
    let summary = config.run(recorder.as_mut())?;
    println!("{}", format_values(&summary.values));
    println!(
        "Average return of {:.3} in episode {}",
        summary.train.average_return, summary.train.episodes
    );
    if summary.train.is_solved {
        println!("Solved!");
    }

    Ok(())
}
