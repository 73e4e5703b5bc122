//! Environment.
use super::{Action, State, Step};
use anyhow::Result;

/// Represents an environment, a finite MDP.
///
/// Agents only see the sizes of the state and action spaces and the
/// transitions produced by [`Env::step`]. How transitions are sampled is
/// up to the implementation.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// The number of states.
    fn n_states(&self) -> usize;

    /// The number of actions, shared by all states.
    fn n_actions(&self) -> usize;

    /// Resets the environment and returns the initial state.
    fn reset(&mut self) -> Result<State>;

    /// Performs an environment step.
    fn step(&mut self, act: Action) -> Result<Step>;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent. This method is called
    /// in [`DefaultEvaluator`] for evaluation.
    ///
    /// [`DefaultEvaluator`]: crate::DefaultEvaluator
    fn reset_with_index(&mut self, ix: usize) -> Result<State> {
        let _ = ix;
        self.reset()
    }
}
