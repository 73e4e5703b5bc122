//! Runs single episodes of an agent on an environment.
//!
//! # Episode
//!
//! 1. The agent resets its episode-scoped state and the environment is reset.
//! 2. Until the environment reports the end of the episode or the step budget
//!    is exhausted:
//!    * the agent observes the current state and selects an action
//!    * the environment applies the action
//!    * the agent receives the reward
//! 3. The agent finalizes the episode with the last state.
//!
//! On a truncated episode the last state is not terminal, but it is still
//! handed to [`Agent::finish_episode`], which zeroes its values.
use crate::{Agent, Env};
use anyhow::Result;
use log::trace;

/// Summary of one episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeStats {
    /// The return reported by [`Agent::finish_episode`].
    pub ret: f64,

    /// The number of environment steps.
    pub steps: usize,

    /// `true` if the episode ended in a terminal state.
    pub is_terminated: bool,

    /// The state the episode was finalized with.
    pub final_state: usize,
}

/// Manages the interaction of an agent with an environment.
pub struct Sampler<E: Env> {
    env: E,
    max_steps: usize,
}

impl<E: Env> Sampler<E> {
    /// Creates a new sampler with the given environment and step budget.
    pub fn new(env: E, max_steps: usize) -> Self {
        Self { env, max_steps }
    }

    /// Runs an episode to completion or to the step budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment fails or the agent reports a
    /// contract violation.
    pub fn run_episode<A: Agent<E>>(&mut self, agent: &mut A) -> Result<EpisodeStats> {
        agent.start_episode()?;
        let mut obs = self.env.reset()?;
        let mut steps = 0;
        let mut is_terminated = false;

        while steps < self.max_steps {
            agent.observe(obs)?;
            let act = agent.get_next_action()?;
            let step = self.env.step(act)?;
            trace!("{} --{}--> {} (r = {})", obs, act, step.obs, step.reward);
            agent.receive_reward(step.reward)?;
            obs = step.obs;
            steps += 1;

            if step.is_done() {
                is_terminated = step.is_terminated;
                break;
            }
        }

        let ret = agent.finish_episode(obs)?;

        Ok(EpisodeStats {
            ret,
            steps,
            is_terminated,
            final_state: obs,
        })
    }
}
