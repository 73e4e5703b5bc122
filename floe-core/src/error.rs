//! Errors in the library.
use thiserror::Error;

/// Contract violations of the agent protocol.
///
/// None of these are expected at runtime. They indicate wiring bugs between
/// an agent and an environment, and the training loop stops on the first one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The state/action space has not been discovered yet.
    #[error("value table is not initialized, start_environment has not been called")]
    Uninitialized,

    /// A state outside of the discovered state space.
    #[error("state {state} is out of range (n_states = {n_states})")]
    StateOutOfRange {
        /// The offending state.
        state: usize,
        /// Size of the state space.
        n_states: usize,
    },

    /// An action outside of the discovered action space.
    #[error("action {action} is out of range (n_actions = {n_actions})")]
    ActionOutOfRange {
        /// The offending action.
        action: usize,
        /// Size of the action space.
        n_actions: usize,
    },

    /// An episode hook was called before `start_episode`.
    #[error("episode has not been started")]
    EpisodeNotStarted,

    /// An action was requested without a preceding observation.
    #[error("no state has been observed in the current episode")]
    MissingObservation,

    /// A reward arrived without a preceding action.
    #[error("no action has been taken since the last observation")]
    MissingAction,

    /// An episode was finalized while an action was still waiting for its reward.
    #[error("the last action has not received its reward")]
    MissingReward,

    /// The environment reported an empty state or action space.
    #[error("environment has an empty {0} space")]
    EmptySpace(&'static str),

    /// A hyperparameter outside of its domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors on accessing records.
#[derive(Error, Debug)]
pub enum FloeError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
