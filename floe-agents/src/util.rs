//! Helpers shared by the agents.
use floe_core::{error::AgentError, Action};
use rand::Rng;

/// The action with the maximal value, ties broken by the lowest index.
///
/// `values` is a row of a value table and is never empty.
pub fn greedy_action(values: &[f64]) -> Action {
    let mut best = 0;
    for (a, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = a;
        }
    }
    best
}

/// An action drawn uniformly from `0..n_actions`.
pub fn random_action(n_actions: usize, rng: &mut impl Rng) -> Action {
    rng.gen_range(0..n_actions)
}

/// Fails unless `0 <= v <= 1`.
pub(crate) fn check_unit_interval(name: &str, v: f64) -> Result<(), AgentError> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(AgentError::InvalidConfig(format!(
            "{} must be in [0, 1], got {}",
            name, v
        )))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_greedy_tie_break_is_lowest_index() {
        let values = [0.1, 0.7, 0.3, 0.7];
        for _ in 0..10 {
            assert_eq!(greedy_action(&values), 1);
        }
        assert_eq!(greedy_action(&[0.0, 0.0, 0.0, 0.0]), 0);
        assert_eq!(greedy_action(&[-1.0, -0.5]), 1);
    }

    #[test]
    fn test_random_action_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let a = random_action(4, &mut rng);
            seen[a] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_check_unit_interval() {
        assert!(check_unit_interval("discount_factor", 0.0).is_ok());
        assert!(check_unit_interval("discount_factor", 1.0).is_ok());
        assert!(check_unit_interval("step_size", 1.5).is_err());
        assert!(check_unit_interval("step_size", f64::NAN).is_err());
    }
}
