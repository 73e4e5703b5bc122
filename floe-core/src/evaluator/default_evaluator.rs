//! Default implementation of the [`Evaluator`] trait.
//!
//! Runs a fixed number of episodes and reports the average return.
use super::Evaluator;
use crate::{record::Record, Env, Policy};
use anyhow::Result;

/// A default implementation of the [`Evaluator`] trait.
///
/// This evaluator runs a specified number of episodes with the greedy
/// [`Policy::sample`] and reports the average undiscounted return as
/// `"eval_return"`.
///
/// # Examples
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<FrozenLake>::new(&config, 42, 100, 100)?;
/// let record = evaluator.evaluate(&mut agent)?;
/// println!("Average return: {}", record.get_scalar("eval_return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The step budget of an episode.
    max_steps: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// # Errors
    ///
    /// Returns an error if the environment fails to reset or step, or if the
    /// policy has not been initialized.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record> {
        let mut r_total = 0f64;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;

            for _ in 0..self.max_steps {
                let act = policy.sample(prev_obs)?;
                let step = self.env.step(act)?;
                r_total += step.reward;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        let n = self.n_episodes.max(1) as f64;
        Ok(Record::from_scalar("eval_return", (r_total / n) as f32))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation
    /// * `max_steps` - Step budget of an episode
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize, max_steps: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            max_steps,
            env: E::build(config, seed)?,
        })
    }
}
