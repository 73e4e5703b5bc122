//! Episode-scoped bookkeeping of the agents.
//!
//! An agent holds `Option<Episode>`: `None` before the first
//! `start_episode` and after `finish_episode`, so hooks called out of order
//! fail with [`AgentError::EpisodeNotStarted`].
use crate::table::ValueTable;
use floe_core::{error::AgentError, Action, State};

/// The state observed last and the action selected for it.
///
/// The protocol alternates `observe`, `act` and `take` (on the reward).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cursor {
    state: Option<State>,
    action: Option<Action>,
}

impl Cursor {
    /// Records an observation.
    ///
    /// Fails if the previous action has not received its reward.
    pub fn observe(&mut self, state: State) -> Result<(), AgentError> {
        if self.action.is_some() {
            return Err(AgentError::MissingReward);
        }
        self.state = Some(state);
        Ok(())
    }

    /// The state an action is about to be selected for.
    pub fn pending_state(&self) -> Result<State, AgentError> {
        match (self.state, self.action) {
            (Some(state), None) => Ok(state),
            _ => Err(AgentError::MissingObservation),
        }
    }

    /// Records the action selected for the observed state.
    pub fn act(&mut self, action: Action) -> Result<(), AgentError> {
        self.pending_state()?;
        self.action = Some(action);
        Ok(())
    }

    /// Consumes the observed state and the selected action on a reward.
    pub fn take(&mut self) -> Result<(State, Action), AgentError> {
        let action = self.action.take().ok_or(AgentError::MissingAction)?;
        let state = self.state.take().ok_or(AgentError::MissingObservation)?;
        Ok((state, action))
    }

    /// `true` if an action is waiting for its reward.
    pub fn is_awaiting_reward(&self) -> bool {
        self.action.is_some()
    }
}

/// A rewarded pair whose update waits for the next pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pending {
    pub state: State,
    pub action: Action,
    pub reward: f64,
}

/// `(s, a, r, s', a')`, the unit of a one-step TD update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub reward: f64,
    pub next_state: State,
    pub next_action: Action,
}

impl Transition {
    /// `r + γ·V(s', a') − V(s, a)`.
    pub fn td_error(&self, values: &ValueTable, discount_factor: f64) -> Result<f64, AgentError> {
        let target = self.reward + discount_factor * values.get(self.next_state, self.next_action)?;
        Ok(target - values.get(self.state, self.action)?)
    }
}

/// Episode state of the TD agents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TdEpisode {
    pub cursor: Cursor,
    pending: Option<Pending>,
    ret: f64,
}

impl TdEpisode {
    /// Consumes the cursor with a reward.
    ///
    /// Returns the transition from the previously rewarded pair to the
    /// current one, `None` on the first step of an episode.
    pub fn push(&mut self, reward: f64) -> Result<Option<Transition>, AgentError> {
        let (state, action) = self.cursor.take()?;
        self.ret += reward;
        let prev = self.pending.replace(Pending {
            state,
            action,
            reward,
        });
        Ok(prev.map(|p| Transition {
            state: p.state,
            action: p.action,
            reward: p.reward,
            next_state: state,
            next_action: action,
        }))
    }

    /// `true` if the last rewarded pair has not been updated yet.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Undiscounted sum of the rewards received so far.
    pub fn ret(&self) -> f64 {
        self.ret
    }
}

/// Episode state of the Monte Carlo agent.
///
/// `pairs[t]` received `rewards[t]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct McEpisode {
    pub cursor: Cursor,
    pairs: Vec<(State, Action)>,
    rewards: Vec<f64>,
}

impl McEpisode {
    /// Consumes the cursor with a reward and appends it to the trajectory.
    pub fn push(&mut self, reward: f64) -> Result<(), AgentError> {
        let pair = self.cursor.take()?;
        self.pairs.push(pair);
        self.rewards.push(reward);
        Ok(())
    }

    /// Visited pairs in order.
    pub fn pairs(&self) -> &[(State, Action)] {
        &self.pairs
    }

    /// Rewards in order.
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }
}
