//! TD(0) agent.
mod base;
mod config;
pub use base::TdZero;
pub use config::TdZeroConfig;
