//! Configuration of a training run on [`FrozenLake`].
use crate::{FrozenLake, FrozenLakeConfig};
use anyhow::Result;
use floe_agents::{
    monte_carlo::{MonteCarlo, MonteCarloConfig},
    td_lambda::{TdLambda, TdLambdaConfig},
    td_zero::{TdZero, TdZeroConfig},
};
use floe_core::{
    record::AggregateRecorder, Agent, Configurable, DefaultEvaluator, TrainSummary, Trainer,
    TrainerConfig,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Learning rule and its configuration.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum AgentConfig {
    /// Monte Carlo return averaging.
    MonteCarlo(MonteCarloConfig),

    /// One-step temporal difference.
    TdZero(TdZeroConfig),

    /// TD(λ).
    TdLambda(TdLambdaConfig),
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::TdLambda(TdLambdaConfig::default())
    }
}

/// Everything needed for a training run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RunConfig {
    /// The lake.
    pub env: FrozenLakeConfig,

    /// The control loop.
    pub trainer: TrainerConfig,

    /// The agent.
    pub agent: AgentConfig,

    /// The number of greedy episodes of an evaluation.
    pub eval_episodes: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        let env = FrozenLakeConfig::default();
        let trainer = TrainerConfig::default().solved_threshold(Some(env.solved_threshold()));
        Self {
            env,
            trainer,
            agent: AgentConfig::default(),
            eval_episodes: 100,
        }
    }
}

/// Outcome of [`RunConfig::run`].
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Outcome of the training loop.
    pub train: TrainSummary,

    /// The learned value table, indexed by state then action.
    pub values: Vec<Vec<f64>>,
}

impl RunConfig {
    /// Constructs [`RunConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load run config from {}", path_.display());
        Ok(b)
    }

    /// Saves [`RunConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save run config into {}", path_.display());
        Ok(())
    }

    /// Builds the agent and trains it on the lake.
    pub fn run(&self, recorder: &mut dyn AggregateRecorder) -> Result<RunSummary> {
        match &self.agent {
            AgentConfig::MonteCarlo(config) => {
                let mut agent = MonteCarlo::<FrozenLake>::build(config.clone())?;
                self.train(&mut agent, recorder)
            }
            AgentConfig::TdZero(config) => {
                let mut agent = TdZero::<FrozenLake>::build(config.clone())?;
                self.train(&mut agent, recorder)
            }
            AgentConfig::TdLambda(config) => {
                let mut agent = TdLambda::<FrozenLake>::build(config.clone())?;
                self.train(&mut agent, recorder)
            }
        }
    }

    fn train<A: Agent<FrozenLake>>(
        &self,
        agent: &mut A,
        recorder: &mut dyn AggregateRecorder,
    ) -> Result<RunSummary> {
        let mut trainer = Trainer::<FrozenLake>::build(self.trainer.clone(), self.env.clone());
        let mut evaluator = DefaultEvaluator::<FrozenLake>::new(
            &self.env,
            self.trainer.seed.wrapping_add(1),
            self.eval_episodes,
            self.trainer.max_steps,
        )?;
        let train = trainer.train(agent, recorder, &mut evaluator)?;
        Ok(RunSummary {
            train,
            values: agent.dump_values()?,
        })
    }
}
