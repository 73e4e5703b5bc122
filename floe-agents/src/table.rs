//! Dense state-action tables.
use floe_core::{error::AgentError, Action, State};

/// A dense table with one entry for every (state, action) pair.
///
/// Entries are stored row-major in a flat vector, `[state * n_actions + action]`,
/// so every state has an entry for every action by construction. Lookups
/// outside of the table fail instead of growing it.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<T> {
    n_states: usize,
    n_actions: usize,
    data: Vec<T>,
}

/// Running estimates of the expected discounted return.
pub type ValueTable = Table<f64>;

/// How many times each pair has been selected.
pub type VisitCounts = Table<u64>;

/// Decaying credit of each pair, used by TD(λ).
pub type Eligibility = Table<f64>;

impl<T: Copy> Table<T> {
    /// Creates a table filled with `init`.
    ///
    /// # Errors
    ///
    /// Fails with [`AgentError::EmptySpace`] if either space is empty.
    pub fn new(n_states: usize, n_actions: usize, init: T) -> Result<Self, AgentError> {
        if n_states == 0 {
            return Err(AgentError::EmptySpace("state"));
        }
        if n_actions == 0 {
            return Err(AgentError::EmptySpace("action"));
        }
        Ok(Self {
            n_states,
            n_actions,
            data: vec![init; n_states * n_actions],
        })
    }

    /// The number of states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Fails if `state` is not in the table.
    pub fn check_state(&self, state: State) -> Result<(), AgentError> {
        if state < self.n_states {
            Ok(())
        } else {
            Err(AgentError::StateOutOfRange {
                state,
                n_states: self.n_states,
            })
        }
    }

    /// Position of the pair in the flat storage.
    pub fn index(&self, state: State, action: Action) -> Result<usize, AgentError> {
        self.check_state(state)?;
        if action >= self.n_actions {
            return Err(AgentError::ActionOutOfRange {
                action,
                n_actions: self.n_actions,
            });
        }
        Ok(state * self.n_actions + action)
    }

    /// The entry of a pair.
    pub fn get(&self, state: State, action: Action) -> Result<T, AgentError> {
        let ix = self.index(state, action)?;
        Ok(self.data[ix])
    }

    /// Mutable reference to the entry of a pair.
    pub fn get_mut(&mut self, state: State, action: Action) -> Result<&mut T, AgentError> {
        let ix = self.index(state, action)?;
        Ok(&mut self.data[ix])
    }

    /// Overwrites the entry of a pair.
    pub fn set(&mut self, state: State, action: Action, v: T) -> Result<(), AgentError> {
        *self.get_mut(state, action)? = v;
        Ok(())
    }

    /// The entries of every action of a state.
    pub fn row(&self, state: State) -> Result<&[T], AgentError> {
        self.check_state(state)?;
        let start = state * self.n_actions;
        Ok(&self.data[start..start + self.n_actions])
    }

    /// Overwrites the entries of every action of a state.
    pub fn fill_state(&mut self, state: State, v: T) -> Result<(), AgentError> {
        self.check_state(state)?;
        let start = state * self.n_actions;
        self.data[start..start + self.n_actions]
            .iter_mut()
            .for_each(|x| *x = v);
        Ok(())
    }

    /// Overwrites every entry.
    pub fn fill(&mut self, v: T) {
        self.data.iter_mut().for_each(|x| *x = v);
    }

    /// All entries in flat, row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All entries in flat, row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copy of the table, indexed by state then action.
    pub fn dump(&self) -> Vec<Vec<T>> {
        self.data
            .chunks(self.n_actions)
            .map(|row| row.to_vec())
            .collect()
    }
}
