//! Train [`Agent`].
mod config;
mod sampler;
use crate::{
    record::{AggregateRecorder, Record, RecordValue::Scalar},
    util::format_values,
    Agent, Env, Evaluator,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::{debug, info, log_enabled, Level};
pub use sampler::{EpisodeStats, Sampler};
use std::collections::VecDeque;

/// Outcome of [`Trainer::train`].
#[derive(Clone, Debug, PartialEq)]
pub struct TrainSummary {
    /// The number of episodes run.
    pub episodes: usize,

    /// Rolling average return at the end of training.
    pub average_return: f64,

    /// `true` if training stopped on the solved threshold.
    pub is_solved: bool,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the episodic training loop.
///
/// # Training loop
///
/// 0. Given an agent implementing [`Agent`] and a recorder implementing [`AggregateRecorder`].
/// 1. Build the environment and let the agent discover its state and action spaces.
/// 2. Run an episode with [`Sampler::run_episode`] and store
///    `"episode_return"` and `"episode_steps"` to the recorder.
/// 3. Push the return into the rolling window of the last `window` returns.
/// 4. If `episode % eval_interval == 0`, evaluate the agent and store `"eval_return"`.
/// 5. If `episode % report_interval == 0` or the problem is solved,
///    store `"average_return"` and `"epsilon"` and flush the recorder.
/// 6. Stop if the rolling average over a full window reaches `solved_threshold`
///    or `episode == max_episodes`, otherwise back to step 2.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|action|B[Env]
///     B -->|state, reward|A
///     A -->|return|C[Trainer]
///     C -->|Record|D[AggregateRecorder]
/// ```
pub struct Trainer<E: Env> {
    /// Configuration of the environment for training.
    env_config: E::Config,

    /// Random seed of the training environment.
    seed: i64,

    /// The maximum number of episodes.
    max_episodes: usize,

    /// The step budget of an episode.
    max_steps: usize,

    /// Interval of reporting in episodes.
    report_interval: usize,

    /// Size of the window of the rolling average.
    window: usize,

    /// Average return at which training stops.
    solved_threshold: Option<f64>,

    /// Interval of evaluation in episodes.
    eval_interval: usize,
}

fn is_multiple(episode: usize, interval: usize) -> bool {
    interval > 0 && episode % interval == 0
}

impl<E: Env> Trainer<E> {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig, env_config: E::Config) -> Self {
        Self {
            env_config,
            seed: config.seed,
            max_episodes: config.max_episodes,
            max_steps: config.max_steps,
            report_interval: config.report_interval,
            window: config.window.max(1),
            solved_threshold: config.solved_threshold,
            eval_interval: config.eval_interval,
        }
    }

    /// Train the agent.
    ///
    /// # Errors
    ///
    /// Stops on the first error of the environment, the agent or the evaluator.
    pub fn train<A, D>(
        &mut self,
        agent: &mut A,
        recorder: &mut dyn AggregateRecorder,
        evaluator: &mut D,
    ) -> Result<TrainSummary>
    where
        A: Agent<E>,
        D: Evaluator<E>,
    {
        let env = E::build(&self.env_config, self.seed)?;
        agent.start_environment(&env)?;
        info!(
            "Start training with {} states and {} actions",
            env.n_states(),
            env.n_actions()
        );

        let mut sampler = Sampler::new(env, self.max_steps);
        let mut returns = VecDeque::with_capacity(self.window);
        let mut summary = TrainSummary {
            episodes: 0,
            average_return: 0.0,
            is_solved: false,
        };

        for episode in 1..=self.max_episodes {
            let stats = sampler.run_episode(agent)?;
            recorder.store(Record::from_slice(&[
                ("episode_return", Scalar(stats.ret as f32)),
                ("episode_steps", Scalar(stats.steps as f32)),
            ]));

            if returns.len() == self.window {
                returns.pop_front();
            }
            returns.push_back(stats.ret);
            let average_return = returns.iter().sum::<f64>() / returns.len() as f64;
            let is_solved = match self.solved_threshold {
                Some(threshold) => returns.len() == self.window && average_return >= threshold,
                None => false,
            };

            summary.episodes = episode;
            summary.average_return = average_return;
            summary.is_solved = is_solved;

            if is_multiple(episode, self.eval_interval) {
                info!("Starts evaluation of the trained agent");
                let record = evaluator.evaluate(agent)?;
                recorder.store(record);
            }

            if is_solved || is_multiple(episode, self.report_interval) {
                info!(
                    "Average return of {:.3} in episode {}",
                    average_return, episode
                );
                if log_enabled!(Level::Debug) {
                    debug!("\n{}", format_values(&agent.dump_values()?));
                }
                recorder.store(Record::from_slice(&[
                    ("average_return", Scalar(average_return as f32)),
                    ("epsilon", Scalar(agent.epsilon() as f32)),
                ]));
                recorder.flush(episode as i64);
            }

            if is_solved {
                info!("Solved in episode {}", episode);
                break;
            }
        }

        Ok(summary)
    }
}
