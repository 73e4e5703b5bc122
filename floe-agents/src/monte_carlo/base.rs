//! Every-visit Monte Carlo control.
use super::MonteCarloConfig;
use crate::{
    episode::McEpisode,
    explorer::EpsilonGreedy,
    table::{ValueTable, VisitCounts},
    util::greedy_action,
};
use floe_core::{error::AgentError, Action, Agent, Configurable, Env, Policy, State};
use log::trace;
use rand::{rngs::SmallRng, SeedableRng};
use std::marker::PhantomData;

/// Discounted returns of a reward sequence.
///
/// `G[T-1] = r[T-1]` and `G[t] = r[t] + γ·G[t+1]`.
///
/// ```
/// use floe_agents::monte_carlo::discounted_returns;
///
/// assert_eq!(discounted_returns(&[1.0, 0.0, 1.0], 0.5), vec![1.25, 0.5, 1.0]);
/// ```
pub fn discounted_returns(rewards: &[f64], discount_factor: f64) -> Vec<f64> {
    let mut returns = vec![0.0; rewards.len()];
    let mut g = 0.0;
    for (t, r) in rewards.iter().enumerate().rev() {
        g = r + discount_factor * g;
        returns[t] = g;
    }
    returns
}

/// Monte Carlo agent.
///
/// Collects the trajectory of an episode and, when the episode is finished,
/// moves the value of every visited pair toward its discounted return by the
/// incremental mean `V += (G − V) / n`, where `n` counts the selections of
/// the pair. Counts are incremented when an action is selected, so `n ≥ 1`
/// at update time.
pub struct MonteCarlo<E: Env> {
    pub(in crate::monte_carlo) discount_factor: f64,
    pub(in crate::monte_carlo) explorer: EpsilonGreedy,
    pub(in crate::monte_carlo) init_value: f64,
    pub(in crate::monte_carlo) values: Option<ValueTable>,
    pub(in crate::monte_carlo) counts: Option<VisitCounts>,
    pub(in crate::monte_carlo) episode: Option<McEpisode>,
    pub(in crate::monte_carlo) n_episodes: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E: Env> MonteCarlo<E> {
    /// The value table, `None` before `start_environment`.
    pub fn values(&self) -> Option<&ValueTable> {
        self.values.as_ref()
    }

    /// Visit counts, `None` before `start_environment`.
    pub fn counts(&self) -> Option<&VisitCounts> {
        self.counts.as_ref()
    }

    fn tables(&mut self) -> Result<(&mut ValueTable, &mut VisitCounts), AgentError> {
        match (self.values.as_mut(), self.counts.as_mut()) {
            (Some(values), Some(counts)) => Ok((values, counts)),
            _ => Err(AgentError::Uninitialized),
        }
    }
}

impl<E: Env> Configurable for MonteCarlo<E> {
    type Config = MonteCarloConfig;

    fn build(config: Self::Config) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self {
            discount_factor: config.discount_factor,
            explorer: config.explorer,
            init_value: config.init_value,
            values: None,
            counts: None,
            episode: None,
            n_episodes: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }
}

impl<E: Env> Policy<E> for MonteCarlo<E> {
    fn sample(&mut self, obs: State) -> Result<Action, AgentError> {
        let values = self.values.as_ref().ok_or(AgentError::Uninitialized)?;
        Ok(greedy_action(values.row(obs)?))
    }
}

impl<E: Env> Agent<E> for MonteCarlo<E> {
    fn start_environment(&mut self, env: &E) -> Result<(), AgentError> {
        let (n_states, n_actions) = (env.n_states(), env.n_actions());
        self.values = Some(ValueTable::new(n_states, n_actions, self.init_value)?);
        self.counts = Some(VisitCounts::new(n_states, n_actions, 0)?);
        self.episode = None;
        Ok(())
    }

    fn start_episode(&mut self) -> Result<(), AgentError> {
        self.tables()?;
        self.n_episodes += 1;
        self.episode = Some(McEpisode::default());
        Ok(())
    }

    fn observe(&mut self, state: State) -> Result<(), AgentError> {
        let (values, _) = self.tables()?;
        values.check_state(state)?;
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        episode.cursor.observe(state)
    }

    fn get_next_action(&mut self) -> Result<Action, AgentError> {
        let (values, counts) = match (self.values.as_mut(), self.counts.as_mut()) {
            (Some(values), Some(counts)) => (values, counts),
            _ => return Err(AgentError::Uninitialized),
        };
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        let state = episode.cursor.pending_state()?;
        let action = self
            .explorer
            .action(values.row(state)?, self.n_episodes, &mut self.rng);
        *counts.get_mut(state, action)? += 1;
        episode.cursor.act(action)?;
        Ok(action)
    }

    fn receive_reward(&mut self, reward: f64) -> Result<(), AgentError> {
        self.tables()?;
        let episode = self.episode.as_mut().ok_or(AgentError::EpisodeNotStarted)?;
        episode.push(reward)
    }

    fn finish_episode(&mut self, final_state: State) -> Result<f64, AgentError> {
        let discount_factor = self.discount_factor;
        let (values, counts) = match (self.values.as_mut(), self.counts.as_mut()) {
            (Some(values), Some(counts)) => (values, counts),
            _ => return Err(AgentError::Uninitialized),
        };
        values.check_state(final_state)?;
        match self.episode.as_ref() {
            None => return Err(AgentError::EpisodeNotStarted),
            Some(episode) if episode.cursor.is_awaiting_reward() => {
                return Err(AgentError::MissingReward)
            }
            Some(_) => {}
        }
        let episode = self.episode.take().ok_or(AgentError::EpisodeNotStarted)?;

        let returns = discounted_returns(episode.rewards(), discount_factor);
        for (&(state, action), g) in episode.pairs().iter().zip(returns.iter()) {
            let n = counts.get(state, action)? as f64;
            let v = values.get_mut(state, action)?;
            *v += (g - *v) / n;
        }
        values.fill_state(final_state, 0.0)?;

        let ret = returns.first().copied().unwrap_or(0.0);
        trace!(
            "Monte Carlo episode {} finished after {} steps, return {}",
            self.n_episodes,
            returns.len(),
            ret
        );
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
