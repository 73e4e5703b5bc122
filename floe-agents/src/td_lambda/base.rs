//! TD(λ) control with accumulating eligibility traces.
use super::TdLambdaConfig;
use crate::{
    episode::{TdEpisode, Transition},
    explorer::EpsilonGreedy,
    table::{Eligibility, ValueTable},
    util::greedy_action,
};
use floe_core::{error::AgentError, Action, Agent, Configurable, Env, Policy, State};
use log::trace;
use rand::{rngs::SmallRng, SeedableRng};
use std::marker::PhantomData;

/// TD(λ) agent.
///
/// Computes the same TD error `δ` as [`TdZero`](crate::td_zero::TdZero) and
/// spreads it over all pairs in proportion to their eligibility:
///
/// ```text
/// e       *= γ·λ          (every pair)
/// e(s, a) += 1            (the updated pair)
/// V       += α·δ·e        (every pair)
/// ```
///
/// The trace is reset to zero at the start of every episode.
pub struct TdLambda<E: Env> {
    pub(in crate::td_lambda) discount_factor: f64,
    pub(in crate::td_lambda) step_size: f64,
    pub(in crate::td_lambda) trace_decay: f64,
    pub(in crate::td_lambda) explorer: EpsilonGreedy,
    pub(in crate::td_lambda) init_value: f64,
    pub(in crate::td_lambda) values: Option<ValueTable>,
    pub(in crate::td_lambda) trace: Option<Eligibility>,
    pub(in crate::td_lambda) episode: Option<TdEpisode>,
    pub(in crate::td_lambda) n_episodes: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

fn update(
    values: &mut ValueTable,
    trace: &mut Eligibility,
    t: &Transition,
    discount_factor: f64,
    step_size: f64,
    trace_decay: f64,
) -> Result<(), AgentError> {
    let td_err = t.td_error(values, discount_factor)?;
    let decay = discount_factor * trace_decay;
    let ix = trace.index(t.state, t.action)?;
    trace.as_mut_slice().iter_mut().for_each(|e| *e *= decay);
    trace.as_mut_slice()[ix] += 1.0;
    values
        .as_mut_slice()
        .iter_mut()
        .zip(trace.as_slice().iter())
        .for_each(|(v, e)| *v += step_size * td_err * e);
    Ok(())
}

impl<E: Env> TdLambda<E> {
    /// The value table, `None` before `start_environment`.
    pub fn values(&self) -> Option<&ValueTable> {
        self.values.as_ref()
    }

    /// The eligibility trace, `None` before `start_environment`.
    pub fn trace(&self) -> Option<&Eligibility> {
        self.trace.as_ref()
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
        let (values, trace) = match (self.values.as_mut(), self.trace.as_mut()) {
            (Some(values), Some(trace)) => (values, trace),
            _ => return Err(AgentError::Uninitialized),
        };
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        if let Some(t) = episode.push(reward)? {
            update(
                values,
                trace,
                &t,
                self.discount_factor,
                self.step_size,
                self.trace_decay,
            )?;
        }
        Ok(())
    }
}

impl<E: Env> Configurable for TdLambda<E> {
    type Config = TdLambdaConfig;

    fn build(config: Self::Config) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            discount_factor: config.discount_factor,
            step_size: config.step_size,
            trace_decay: config.trace_decay,
            explorer: config.explorer,
            init_value: config.init_value,
            values: None,
            trace: None,
            episode: None,
            n_episodes: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }
}

impl<E: Env> Policy<E> for TdLambda<E> {
    fn sample(&mut self, obs: State) -> Result<Action, AgentError> {
        let values = self.values.as_ref().ok_or(AgentError::Uninitialized)?;
        Ok(greedy_action(values.row(obs)?))
    }
}

impl<E: Env> Agent<E> for TdLambda<E> {
    fn start_environment(&mut self, env: &E) -> Result<(), AgentError> {
        let (n_states, n_actions) = (env.n_states(), env.n_actions());
        self.values = Some(ValueTable::new(n_states, n_actions, self.init_value)?);
        self.trace = Some(Eligibility::new(n_states, n_actions, 0.0)?);
        self.episode = None;
        Ok(())
    }

    fn start_episode(&mut self) -> Result<(), AgentError> {
        let trace = self.trace.as_mut().ok_or(AgentError::Uninitialized)?;
        trace.fill(0.0);
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
            // The trace spreads the last error over the final state as well
            if let Some(values) = self.values.as_mut() {
                values.fill_state(final_state, 0.0)?;
            }
        }

        let ret = self
            .episode
            .take()
            .ok_or(AgentError::EpisodeNotStarted)?
            .ret();
        trace!("TD(λ) episode {} finished, return {}", self.n_episodes, ret);
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
