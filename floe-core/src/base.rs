//! Core functionalities.
mod agent;
mod env;
mod policy;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use policy::{Configurable, Policy};
pub use step::Step;

/// A state of a finite, densely enumerated state space `0..n_states`.
pub type State = usize;

/// An action of a finite, densely enumerated action space `0..n_actions`.
pub type Action = usize;
