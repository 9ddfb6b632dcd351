//! Shared primitive types used across the entire simulation.

/// One pass of the driver loop. Iteration 0 is the first pass.
pub type Iteration = u64;

/// Index of a state within a chain's ordered label list.
///
/// A `StateId` is only meaningful together with the chain that issued it;
/// use [`crate::chain::ChainDefinition::label`] to get the label back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}
