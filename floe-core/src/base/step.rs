//! Environment step.
use super::{Action, State};

/// Represents an action, next state and reward tuple `(a_t, s_t+1, r_t)`.
///
/// An environment emits a [`Step`] object at every interaction step.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Action.
    pub act: Action,

    /// Next state.
    pub obs: State,

    /// Reward.
    pub reward: f64,

    /// Flag denoting if the episode reached a terminal state.
    pub is_terminated: bool,

    /// Flag denoting if the episode was cut by the environment.
    pub is_truncated: bool,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(act: Action, obs: State, reward: f64, is_terminated: bool, is_truncated: bool) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}
