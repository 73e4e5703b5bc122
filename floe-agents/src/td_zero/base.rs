//! One-step temporal difference control.
use super::TdZeroConfig;
use crate::{
    episode::{TdEpisode, Transition},
    explorer::EpsilonGreedy,
    table::ValueTable,
    util::greedy_action,
};
use floe_core::{error::AgentError, Action, Agent, Configurable, Env, Policy, State};
use log::trace;
use rand::{rngs::SmallRng, SeedableRng};
use std::marker::PhantomData;

/// TD(0) agent.
///
/// The update of a rewarded pair waits until the next pair is selected,
/// because its target bootstraps from the value of that pair:
///
/// ```text
/// V(s, a) += α·(r + γ·V(s', a') − V(s, a))
/// ```
///
/// On [`Agent::finish_episode`], the row of the final state is zeroed and a
/// zero-reward step from the final state flushes the last update, so the last
/// transition bootstraps from `0`.
pub struct TdZero<E: Env> {
    pub(in crate::td_zero) discount_factor: f64,
    pub(in crate::td_zero) step_size: f64,
    pub(in crate::td_zero) explorer: EpsilonGreedy,
    pub(in crate::td_zero) init_value: f64,
    pub(in crate::td_zero) values: Option<ValueTable>,
    pub(in crate::td_zero) episode: Option<TdEpisode>,
    pub(in crate::td_zero) n_episodes: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

fn update(
    values: &mut ValueTable,
    t: &Transition,
    discount_factor: f64,
    step_size: f64,
) -> Result<(), AgentError> {
    let td_err = t.td_error(values, discount_factor)?;
    *values.get_mut(t.state, t.action)? += step_size * td_err;
    Ok(())
}

impl<E: Env> TdZero<E> {
    /// The value table, `None` before `start_environment`.
    pub fn values(&self) -> Option<&ValueTable> {
        self.values.as_ref()
    }

    fn select(&mut self) -> Result<Action, AgentError> {
        let values = self.values.as_ref().ok_or(AgentError::Uninitialized)?;
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        let state = episode.cursor.pending_state()?;
        let action = self
            .explorer
            .action(values.row(state)?, self.n_episodes, &mut self.rng);
        episode.cursor.act(action)?;
        Ok(action)
    }

    fn step(&mut self, reward: f64) -> Result<(), AgentError> {
        let values = self.values.as_mut().ok_or(AgentError::Uninitialized)?;
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        if let Some(t) = episode.push(reward)? {
            update(values, &t, self.discount_factor, self.step_size)?;
        }
        Ok(())
    }
}

impl<E: Env> Configurable for TdZero<E> {
    type Config = TdZeroConfig;

    fn build(config: Self::Config) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            discount_factor: config.discount_factor,
            step_size: config.step_size,
            explorer: config.explorer,
            init_value: config.init_value,
            values: None,
            episode: None,
            n_episodes: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }
}

impl<E: Env> Policy<E> for TdZero<E> {
    fn sample(&mut self, obs: State) -> Result<Action, AgentError> {
        let values = self.values.as_ref().ok_or(AgentError::Uninitialized)?;
        Ok(greedy_action(values.row(obs)?))
    }
}

impl<E: Env> Agent<E> for TdZero<E> {
    fn start_environment(&mut self, env: &E) -> Result<(), AgentError> {
        self.values = Some(ValueTable::new(
            env.n_states(),
            env.n_actions(),
            self.init_value,
        )?);
        self.episode = None;
        Ok(())
    }

    fn start_episode(&mut self) -> Result<(), AgentError> {
        if self.values.is_none() {
            return Err(AgentError::Uninitialized);
        }
        self.n_episodes += 1;
        self.episode = Some(TdEpisode::default());
        Ok(())
    }

    fn observe(&mut self, state: State) -> Result<(), AgentError> {
        let values = self.values.as_ref().ok_or(AgentError::Uninitialized)?;
        values.check_state(state)?;
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        episode.cursor.observe(state)
    }

    fn get_next_action(&mut self) -> Result<Action, AgentError> {
        self.select()
    }

    fn receive_reward(&mut self, reward: f64) -> Result<(), AgentError> {
        self.step(reward)
    }

    fn finish_episode(&mut self, final_state: State) -> Result<f64, AgentError> {
        let values = self.values.as_mut().ok_or(AgentError::Uninitialized)?;
        values.check_state(final_state)?;
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        if episode.cursor.is_awaiting_reward() {
            return Err(AgentError::MissingReward);
        }
        values.fill_state(final_state, 0.0)?;

        if episode.has_pending() {
            episode.cursor.observe(final_state)?;
            self.select()?;
            self.step(0.0)?;
            // The flushed update may have written to the final state on a self-loop
            if let Some(values) = self.values.as_mut() {
                values.fill_state(final_state, 0.0)?;
            }
        }

        let ret = self
            .episode
            .take()
            .ok_or(AgentError::EpisodeNotStarted)?
            .ret();
        trace!("TD(0) episode {} finished, return {}", self.n_episodes, ret);
        Ok(ret)
    }

    fn episodes(&self) -> usize {
        self.n_episodes
    }

    fn epsilon(&self) -> f64 {
        self.explorer.eps(self.n_episodes)
    }

    fn dump_values(&self) -> Result<Vec<Vec<f64>>, AgentError> {
        Ok(self
            .values
            .as_ref()
            .ok_or(AgentError::Uninitialized)?
            .dump())
    }
}
