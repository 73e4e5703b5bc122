#![warn(missing_docs)]
//! Core of floe, a library of tabular reinforcement learning agents.
//!
//! This crate defines how agents and environments talk to each other:
//!
//! * [`Env`] - a finite MDP with densely enumerated states and actions
//! * [`Agent`] - the episodic protocol an agent follows while learning
//! * [`Policy`] - side-effect free action selection, used for evaluation
//! * [`Trainer`] - the episodic control loop
//! * [`Evaluator`] - evaluation of a policy
//! * [`record`] - metrics emitted during training
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Action, Agent, Configurable, Env, Policy, State, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{EpisodeStats, Sampler, TrainSummary, Trainer, TrainerConfig};
