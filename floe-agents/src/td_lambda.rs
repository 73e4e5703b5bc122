//! TD(λ) agent with accumulating eligibility traces.
mod base;
mod config;
pub use base::TdLambda;
pub use config::TdLambdaConfig;
