//! Evaluate [`Policy`](crate::Policy).
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`](crate::Policy).
pub trait Evaluator<E: Env> {
    /// Evaluate the given policy.
    ///
    /// Evaluation only calls [`Policy::sample`], so it does not change
    /// what an agent has learned.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record>;
}
