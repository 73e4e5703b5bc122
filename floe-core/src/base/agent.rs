//! Agent.
use super::{Action, Env, Policy, State};
use crate::error::AgentError;

/// Represents a learning agent driven by the episodic protocol.
///
/// The [`Trainer`](crate::Trainer) calls the methods in the following order:
///
/// ```text
/// start_environment
/// repeat:
///     start_episode
///     repeat until terminal or step budget:
///         observe -> get_next_action -> (env step) -> receive_reward
///     finish_episode
/// ```
///
/// Calling a method out of this order is a contract violation and fails with
/// an [`AgentError`] instead of being silently ignored.
pub trait Agent<E: Env>: Policy<E> {
    /// Allocates the value table over the state and action spaces of `env`.
    fn start_environment(&mut self, env: &E) -> Result<(), AgentError>;

    /// Resets episode-scoped state.
    fn start_episode(&mut self) -> Result<(), AgentError>;

    /// Observes the current state of the environment.
    fn observe(&mut self, state: State) -> Result<(), AgentError>;

    /// Selects an action for the last observed state.
    fn get_next_action(&mut self) -> Result<Action, AgentError>;

    /// Receives the reward of the last action.
    fn receive_reward(&mut self, reward: f64) -> Result<(), AgentError>;

    /// Finalizes the episode ending in `final_state` and returns its return.
    ///
    /// After this call, the values of every action of `final_state` are zero.
    fn finish_episode(&mut self, final_state: State) -> Result<f64, AgentError>;

    /// The number of episodes started so far.
    fn episodes(&self) -> usize;

    /// The exploration probability used in the current episode.
    fn epsilon(&self) -> f64;

    /// Copy of the value table, indexed by state then action.
    fn dump_values(&self) -> Result<Vec<Vec<f64>>, AgentError>;
}
