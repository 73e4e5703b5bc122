//! Policy.
use super::{Action, Env, State};
use crate::error::AgentError;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A policy on an environment.
///
/// Policy is a mapping from a state to an action. [`Policy::sample`] must not
/// change any learned quantity; it is used for evaluation.
pub trait Policy<E: Env> {
    /// Sample an action given a state.
    fn sample(&mut self, obs: State) -> Result<Action, AgentError>;
}

/// A configurable object.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    ///
    /// Fails if the configuration holds a value outside of its domain.
    fn build(config: Self::Config) -> Result<Self, AgentError>
    where
        Self: Sized;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config)?)
    }
}
