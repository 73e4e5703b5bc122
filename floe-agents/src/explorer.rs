//! Exploration strategies.
//!
//! [`EpsilonGreedy`] selects a uniformly random action with probability ε
//! and the greedy action otherwise. ε is a deterministic function of the
//! episode index given by an [`EpsilonSchedule`]. Every schedule has a floor
//! strictly above zero, so every action keeps a positive probability of
//! being selected.
use crate::util::{greedy_action, random_action};
use floe_core::{error::AgentError, Action};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Decay schedules of the exploration probability.
///
/// Episodes are counted from 1. Episode index 0 (before the first episode)
/// is treated as episode 1.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum EpsilonSchedule {
    /// `ε = eps` for every episode.
    Constant {
        /// Exploration probability.
        eps: f64,
    },

    /// `ε = max(eps_min, k^(-exponent))`.
    Power {
        /// Decay exponent, non-negative.
        exponent: f64,
        /// Floor of ε.
        eps_min: f64,
    },

    /// `ε = 1` for the first `full_episodes` episodes, then as [`EpsilonSchedule::Power`].
    Staged {
        /// The number of episodes of pure exploration.
        full_episodes: usize,
        /// Decay exponent, non-negative.
        exponent: f64,
        /// Floor of ε.
        eps_min: f64,
    },

    /// Linear decay from `eps_start` to `eps_final`, reached at `final_episode`.
    Linear {
        /// ε at the first episode.
        eps_start: f64,
        /// ε from `final_episode` on.
        eps_final: f64,
        /// Episode at which the decay ends.
        final_episode: usize,
    },
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self::Power {
            exponent: 0.4,
            eps_min: 0.05,
        }
    }
}

fn check_floor(name: &str, v: f64) -> Result<(), AgentError> {
    if v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(AgentError::InvalidConfig(format!(
            "{} must be in (0, 1], got {}",
            name, v
        )))
    }
}

fn check_exponent(v: f64) -> Result<(), AgentError> {
    if v >= 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(AgentError::InvalidConfig(format!(
            "exponent must be finite and non-negative, got {}",
            v
        )))
    }
}

impl EpsilonSchedule {
    /// Exploration probability at the given episode.
    pub fn eps(&self, episode: usize) -> f64 {
        let k = episode.max(1);
        match *self {
            Self::Constant { eps } => eps,
            Self::Power { exponent, eps_min } => power(k, exponent, eps_min),
            Self::Staged {
                full_episodes,
                exponent,
                eps_min,
            } => {
                if k <= full_episodes {
                    1.0
                } else {
                    power(k, exponent, eps_min)
                }
            }
            Self::Linear {
                eps_start,
                eps_final,
                final_episode,
            } => {
                if k >= final_episode {
                    eps_final
                } else {
                    let frac = (k - 1) as f64 / (final_episode - 1) as f64;
                    eps_start - (eps_start - eps_final) * frac
                }
            }
        }
    }

    /// The smallest value [`EpsilonSchedule::eps`] can return.
    pub fn floor(&self) -> f64 {
        match *self {
            Self::Constant { eps } => eps,
            Self::Power { eps_min, .. } | Self::Staged { eps_min, .. } => eps_min,
            Self::Linear { eps_final, .. } => eps_final,
        }
    }

    /// Fails if ε could leave `(0, 1]` or increase over episodes.
    pub fn validate(&self) -> Result<(), AgentError> {
        match *self {
            Self::Constant { eps } => check_floor("eps", eps),
            Self::Power { exponent, eps_min }
            | Self::Staged {
                exponent, eps_min, ..
            } => {
                check_exponent(exponent)?;
                check_floor("eps_min", eps_min)
            }
            Self::Linear {
                eps_start,
                eps_final,
                ..
            } => {
                check_floor("eps_start", eps_start)?;
                check_floor("eps_final", eps_final)?;
                if eps_final > eps_start {
                    return Err(AgentError::InvalidConfig(format!(
                        "eps_final ({}) must not exceed eps_start ({})",
                        eps_final, eps_start
                    )));
                }
                Ok(())
            }
        }
    }
}

fn power(k: usize, exponent: f64, eps_min: f64) -> f64 {
    (k as f64).powf(-exponent).clamp(eps_min, 1.0)
}

/// Epsilon-greedy explorer.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct EpsilonGreedy {
    /// Decay schedule of ε.
    pub schedule: EpsilonSchedule,
}

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer with the default schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs epsilon-greedy explorer with the given schedule.
    pub fn with_schedule(schedule: EpsilonSchedule) -> Self {
        Self { schedule }
    }

    /// Exploration probability at the given episode.
    pub fn eps(&self, episode: usize) -> f64 {
        self.schedule.eps(episode)
    }

    /// Takes an action based on the values of the actions of a state.
    ///
    /// * `values` - a row of the value table.
    /// * `episode` - the index of the current episode.
    pub fn action(&self, values: &[f64], episode: usize, rng: &mut impl Rng) -> Action {
        if rng.gen::<f64>() < self.eps(episode) {
            random_action(values.len(), rng)
        } else {
            greedy_action(values)
        }
    }
}
