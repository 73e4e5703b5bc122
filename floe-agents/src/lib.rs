//! Tabular value-estimation agents of floe.
//!
//! All agents implement [`floe_core::Agent`] over a dense [`ValueTable`] and
//! select actions with an [`EpsilonGreedy`](explorer::EpsilonGreedy) explorer.
//!
//! * [`MonteCarlo`](monte_carlo::MonteCarlo) - every-visit Monte Carlo return averaging
//! * [`TdZero`](td_zero::TdZero) - one-step temporal difference
//! * [`TdLambda`](td_lambda::TdLambda) - TD(λ) with accumulating eligibility traces
mod episode;
pub mod explorer;
pub mod monte_carlo;
mod table;
pub mod td_lambda;
pub mod td_zero;
pub mod util;
pub use table::{Eligibility, Table, ValueTable, VisitCounts};
