//! Monte Carlo agent.
mod base;
mod config;
pub use base::{discounted_returns, MonteCarlo};
pub use config::MonteCarloConfig;
