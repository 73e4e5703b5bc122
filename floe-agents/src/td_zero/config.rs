//! Configuration of TD(0) agent.
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

/// Configuration of [`TdZero`](super::TdZero) agent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TdZeroConfig {
    /// Discount factor γ in `[0, 1]`.
    pub discount_factor: f64,

    /// Step size α in `[0, 1]`.
    pub step_size: f64,

    /// Exploration policy.
    pub explorer: EpsilonGreedy,

    /// Initial value of every entry of the value table.
    pub init_value: f64,

    /// Random seed of the exploration.
    pub seed: u64,
}

impl Default for TdZeroConfig {
    fn default() -> Self {
        Self {
            discount_factor: 0.9,
            step_size: 0.1,
            explorer: EpsilonGreedy::new(),
            init_value: 0.0,
            seed: 42,
        }
    }
}

impl TdZeroConfig {
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
        if !self.init_value.is_finite() {
            return Err(AgentError::InvalidConfig(format!(
                "init_value must be finite, got {}",
                self.init_value
            )));
        }
        self.explorer.schedule.validate()
    }

    /// Constructs [`TdZeroConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of TD(0) agent from {}", path_.display());
        Ok(b)
    }

    /// Saves [`TdZeroConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of TD(0) agent into {}", path_.display());
        Ok(())
    }
}
