//! Frozen Lake for floe agents.
//!
//! [`FrozenLake`] implements [`floe_core::Env`] for the grid world below, and
//! [`RunConfig`] wires a lake, an agent and the training loop together.
//!
//! ```text
//! SFFF       (S: starting point, safe)
//! FHFH       (F: frozen surface, safe)
//! FFFH       (H: hole, fall to your doom)
//! HFFG       (G: goal, where the frisbee is located)
//! ```
//!
//! The state is the index of the tile the agent stands on, `0..16` on the
//! 4x4 lake.
mod base;
mod config;
mod run;
pub use base::{FrozenLake, Tile, DOWN, LEFT, RIGHT, UP};
pub use config::FrozenLakeConfig;
pub use run::{AgentConfig, RunConfig, RunSummary};
