//! Serializable run report: what the reporting layer consumes.
//!
//! States are referred to by label here, never by StateId, so a
//! report stands on its own without the chain that produced it.

use crate::{
    business::Business,
    chain::ChainDefinition,
    engine::SimulationOutcome,
    error::SimResult,
    event::StopReason,
    snapshot::TimelineSnapshot,
    types::Iteration,
};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub seed:       Option<u64>,
    pub states:     Vec<String>,
    pub timeline:   Vec<TimelineRow>,
    pub businesses: Vec<BusinessReport>,
    pub stop:       StopReason,
}

/// One timeline record: `{"iteration": i, "<label>": count, ...}`,
/// labels in chain declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub iteration: Iteration,
    pub counts:    Vec<(String, usize)>,
}

impl Serialize for TimelineRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        map.serialize_entry("iteration", &self.iteration)?;
        for (label, count) in &self.counts {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessReport {
    pub name:                 String,
    pub final_state:          String,
    pub history:              Vec<String>,
    pub completion_iteration: Option<Iteration>,
}

impl RunReport {
    pub fn new(chain: &ChainDefinition, outcome: &SimulationOutcome, seed: Option<u64>) -> Self {
        Self {
            seed,
            states: chain.labels().to_vec(),
            timeline: outcome
                .timeline
                .snapshots()
                .iter()
                .map(|s| TimelineRow::new(chain, s))
                .collect(),
            businesses: outcome
                .businesses
                .iter()
                .map(|b| BusinessReport::new(chain, b))
                .collect(),
            stop: outcome.stop,
        }
    }

    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TimelineRow {
    pub fn new(chain: &ChainDefinition, snapshot: &TimelineSnapshot) -> Self {
        Self {
            iteration: snapshot.iteration,
            counts: chain
                .states()
                .map(|s| (chain.label(s).to_string(), snapshot.count(s)))
                .collect(),
        }
    }
}

impl BusinessReport {
    pub fn new(chain: &ChainDefinition, business: &Business) -> Self {
        Self {
            name:                 business.name().to_string(),
            final_state:          chain.label(business.state()).to_string(),
            history:              business.history().iter().map(|&s| chain.label(s).to_string()).collect(),
            completion_iteration: business.completion_iteration(),
        }
    }

    /// `S0 -> S1 -> ...`
    pub fn path(&self) -> String {
        self.history.join(" -> ")
    }
}
