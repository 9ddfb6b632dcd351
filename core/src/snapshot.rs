//! Timeline snapshots: the per-iteration census of the population.
//!
//! A snapshot is taken at the top of every driver iteration, before any
//! business moves. The timeline is append-only and contiguous: the k-th
//! snapshot always carries iteration k.

use crate::{
    business::Business,
    chain::ChainDefinition,
    types::{Iteration, StateId},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineSnapshot {
    pub iteration: Iteration,
    /// Business count per state, indexed by `StateId`.
    counts:        Vec<usize>,
}

impl TimelineSnapshot {
    pub fn capture(iteration: Iteration, businesses: &[Business], chain: &ChainDefinition) -> Self {
        let mut counts = vec![0; chain.len()];
        for b in businesses {
            counts[b.state().index()] += 1;
        }
        Self { iteration, counts }
    }

    pub fn count(&self, state: StateId) -> usize {
        self.counts[state.index()]
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    snapshots: Vec<TimelineSnapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next snapshot. Its iteration must equal the current length.
    pub(crate) fn push(&mut self, snapshot: TimelineSnapshot) {
        debug_assert_eq!(snapshot.iteration, self.snapshots.len() as Iteration);
        self.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> &[TimelineSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last(&self) -> Option<&TimelineSnapshot> {
        self.snapshots.last()
    }

    /// Count series for one state across all iterations.
    pub fn series(&self, state: StateId) -> Vec<usize> {
        self.snapshots.iter().map(|s| s.count(state)).collect()
    }
}
