//! The run's event log.
//!
//! RULE: Every state change a run makes is recorded as an event.
//! Events are kept in memory on the outcome; nothing is persisted.

use crate::types::Iteration;
use serde::{Deserialize, Serialize};

/// Every event emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    RunStarted {
        population_size: usize,
        max_iterations:  Iteration,
    },
    BusinessAdvanced {
        iteration: Iteration,
        business:  String,
        from:      String,
        to:        String,
    },
    BusinessCompleted {
        iteration: Iteration,
        business:  String,
    },
    RunFinished {
        stop: StopReason,
    },
}

/// Why the driver loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// Every business was terminal at the top of `iteration`.
    AllCompleted { iteration: Iteration },
    /// `max_iterations` passes ran with at least one business still active.
    HorizonReached,
}

/// Stable name of an event variant, for logging and filtering.
pub fn event_type_name(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::RunStarted { .. }        => "run_started",
        SimEvent::BusinessAdvanced { .. }  => "business_advanced",
        SimEvent::BusinessCompleted { .. } => "business_completed",
        SimEvent::RunFinished { .. }       => "run_finished",
    }
}
