//! Configuration of TD(λ) agent.
use crate::{explorer::EpsilonGreedy, util::check_unit_interval};
use anyhow::Result;
use floe_core::error::AgentError;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TdLambda`](super::TdLambda) agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TdLambdaConfig {
    /// Discount factor γ in `[0, 1]`.
    pub discount_factor: f64,

    /// Step size α in `[0, 1]`.
    pub step_size: f64,

    /// Trace decay λ in `[0, 1]`.
    pub trace_decay: f64,

    /// Exploration policy.
    pub explorer: EpsilonGreedy,

    /// Initial value of every entry of the value table.
    pub init_value: f64,

    /// Random seed of the exploration.
    pub seed: u64,
}

impl Default for TdLambdaConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.9,
            step_size: 0.1,
            trace_decay: 0.8,
            explorer: EpsilonGreedy::new(),
            init_value: 0.0,
            seed: 42,
        }
    }
}

impl TdLambdaConfig {
    /// Sets the discount factor.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.discount_factor = v;
        self
    }

    /// Sets the step size.
    pub fn step_size(mut self, v: f64) -> Self {
        self.step_size = v;
        self
    }

    /// Sets the trace decay.
    pub fn trace_decay(mut self, v: f64) -> Self {
        self.trace_decay = v;
        self
    }

    /// Sets the explorer.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the initial value of the value table.
    pub fn init_value(mut self, v: f64) -> Self {
        self.init_value = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Fails if a hyperparameter is outside of its domain.
    pub fn validate(&self) -> Result<(), AgentError> {
        check_unit_interval("discount_factor", self.discount_factor)?;
        check_unit_interval("step_size", self.step_size)?;
        check_unit_interval("trace_decay", self.trace_decay)?;
        if !self.init_value.is_finite() {
            return Err(AgentError::InvalidConfig(format!(
                "init_value must be finite, got {}",
                self.init_value
            )));
        }
        self.explorer.schedule.validate()
    }

    /// Constructs [`TdLambdaConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of TD(λ) agent from {}", path_.display());
        Ok(b)
    }

    /// Saves [`TdLambdaConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of TD(λ) agent into {}", path_.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::explorer::EpsilonSchedule;
    use tempdir::TempDir;

    #[test]
    fn test_serde_td_lambda_config() -> Result<()> {
        let config = TdLambdaConfig::default()
            .discount_factor(0.99)
            .step_size(0.05)
            .trace_decay(0.5)
            .init_value(1.0)
            .explorer(EpsilonGreedy::with_schedule(EpsilonSchedule::Constant {
                eps: 0.1,
            }))
            .seed(7);

        let dir = TempDir::new("td_lambda_config")?;
        let path = dir.path().join("td_lambda_config.yaml");
        config.save(&path)?;
        let config_ = TdLambdaConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(TdLambdaConfig::default().validate().is_ok());
        assert!(matches!(
            TdLambdaConfig::default().discount_factor(1.1).validate(),
            Err(AgentError::InvalidConfig(_))
        ));
        assert!(TdLambdaConfig::default()
            .trace_decay(2.0)
            .validate()
            .is_err());
    }
}
