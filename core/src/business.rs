//! One simulated business and its walk through the chain.

use crate::{
    chain::ChainDefinition,
    error::ConfigurationError,
    stepper,
    types::{Iteration, StateId},
};

/// A state change produced by [`Business::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from:      StateId,
    pub to:        StateId,
    /// True when this step stamped the completion iteration.
    pub completed: bool,
}

/// RULE: `history` is append-only and always ends with `state`.
/// `completion_iteration` is written at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Business {
    name:                 String,
    state:                StateId,
    history:              Vec<StateId>,
    completion_iteration: Option<Iteration>,
}

impl Business {
    pub fn new(name: impl Into<String>, initial_state: StateId) -> Self {
        Self {
            name:                 name.into(),
            state:                initial_state,
            history:              vec![initial_state],
            completion_iteration: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    /// Every state visited, starting with the initial one.
    pub fn history(&self) -> &[StateId] {
        &self.history
    }

    /// Loop iteration during which the business first entered a terminal state.
    pub fn completion_iteration(&self) -> Option<Iteration> {
        self.completion_iteration
    }

    pub fn is_terminal(&self, chain: &ChainDefinition) -> bool {
        chain.is_terminal(self.state)
    }

    /// Take one step during driver iteration `iteration`.
    ///
    /// A business already in a terminal state is left untouched and
    /// `Ok(None)` is returned. Landing on a terminal state stamps
    /// `completion_iteration` with `iteration` (the pre-transition loop
    /// index), unless it is already set.
    pub fn advance<R: rand::Rng + ?Sized>(
        &mut self,
        iteration: Iteration,
        chain: &ChainDefinition,
        rng: &mut R,
    ) -> Result<Option<Step>, ConfigurationError> {
        if chain.is_terminal(self.state) {
            return Ok(None);
        }

        let from = self.state;
        let to = stepper::choose_next(from, chain, rng)?;
        self.history.push(to);
        self.state = to;

        let completed = chain.is_terminal(to) && self.completion_iteration.is_none();
        if completed {
            self.completion_iteration = Some(iteration);
        }

        Ok(Some(Step { from, to, completed }))
    }
}
