//! Toy MDPs for checking what the agents learn.
#![allow(dead_code)]
use anyhow::Result;
use floe_core::{Action, Agent, Env, State, Step};
use rand::{rngs::SmallRng, Rng, SeedableRng};

pub const START: State = 0;
pub const END: State = 1;
pub const LEFT: Action = 0;
pub const RIGHT: Action = 1;

/// Reward probabilities of the doors.
#[derive(Clone, Debug)]
pub struct TwoDoorsConfig {
    pub p_left: f64,
    pub p_right: f64,
}

impl TwoDoorsConfig {
    pub fn new(p_left: f64, p_right: f64) -> Self {
        assert!((0.0..=1.0).contains(&p_left));
        assert!((0.0..=1.0).contains(&p_right));
        Self { p_left, p_right }
    }
}

/// Two doors, both leading from `START` to `END`.
///
/// Each door gives reward 1 with its own probability. Any action taken in
/// `END` terminates the episode with reward 0, so every episode has two steps.
pub struct TwoDoors {
    config: TwoDoorsConfig,
    state: State,
    rng: SmallRng,
}

impl Env for TwoDoors {
    type Config = TwoDoorsConfig;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            state: START,
            rng: SmallRng::seed_from_u64(seed as u64),
        })
    }

    fn n_states(&self) -> usize {
        2
    }

    fn n_actions(&self) -> usize {
        2
    }

    fn reset(&mut self) -> Result<State> {
        self.state = START;
        Ok(START)
    }

    fn step(&mut self, act: Action) -> Result<Step> {
        if self.state == END {
            return Ok(Step::new(act, END, 0.0, true, false));
        }
        let p = if act == LEFT {
            self.config.p_left
        } else {
            self.config.p_right
        };
        let reward = if self.rng.gen::<f64>() < p { 1.0 } else { 0.0 };
        self.state = END;
        Ok(Step::new(act, END, reward, false, false))
    }
}

/// A single action walking `0 -> 1 -> 0 -> 2`, with rewards `1, 0, 1`.
///
/// The pair `(0, 0)` is visited twice in every episode; `2` is terminal.
pub struct Revisits {
    t: usize,
}

impl Revisits {
    pub const PATH: [(State, f64); 3] = [(1, 1.0), (0, 0.0), (2, 1.0)];
}

impl Env for Revisits {
    type Config = ();

    fn build(_config: &(), _seed: i64) -> Result<Self> {
        Ok(Self { t: 0 })
    }

    fn n_states(&self) -> usize {
        3
    }

    fn n_actions(&self) -> usize {
        1
    }

    fn reset(&mut self) -> Result<State> {
        self.t = 0;
        Ok(0)
    }

    fn step(&mut self, act: Action) -> Result<Step> {
        let (obs, reward) = Self::PATH[self.t.min(Self::PATH.len() - 1)];
        self.t += 1;
        let is_terminated = self.t >= Self::PATH.len();
        Ok(Step::new(act, obs, reward, is_terminated, false))
    }
}

/// Drives `n_episodes` episodes by hand and returns the reported returns.
pub fn run_episodes<E: Env, A: Agent<E> + ?Sized>(
    agent: &mut A,
    env: &mut E,
    n_episodes: usize,
) -> Result<Vec<f64>> {
    agent.start_environment(env)?;
    let mut returns = Vec::with_capacity(n_episodes);
    for _ in 0..n_episodes {
        agent.start_episode()?;
        let mut obs = env.reset()?;
        loop {
            agent.observe(obs)?;
            let act = agent.get_next_action()?;
            let step = env.step(act)?;
            agent.receive_reward(step.reward)?;
            obs = step.obs;
            if step.is_done() {
                break;
            }
        }
        returns.push(agent.finish_episode(obs)?);
    }
    Ok(returns)
}

pub fn assert_close(expected: f64, actual: f64, tol: f64, msg: &str) {
    assert!(
        (expected - actual).abs() <= tol,
        "{}: expected {} +/- {}, got {}",
        msg,
        expected,
        tol,
        actual
    );
}
