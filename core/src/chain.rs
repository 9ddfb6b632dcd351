//! Chain definition: the fixed transition graph every business walks.
//!
//! A chain is described by a serializable ChainSpec (labels, initial
//! label, weighted edges) and compiled into a ChainDefinition, which
//! resolves labels to StateIds and checks the graph once up front.
//! Nothing mutates a ChainDefinition after construction.
//!
//! Weights are relative: P(to) = weight / sum of weights out of `from`.
//! A state with no outgoing edges is terminal (absorbing).

use crate::{error::ConfigurationError, types::StateId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from:   String,
    pub to:     String,
    pub weight: f64,
}

/// Serializable description of a chain. Edge order is preserved and
/// determines the draw order in the stepper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSpec {
    pub states:  Vec<String>,
    pub initial: String,
    #[serde(default)]
    pub edges:   Vec<EdgeSpec>,
}

impl ChainSpec {
    pub fn new<S: Into<String>>(states: impl IntoIterator<Item = S>, initial: &str) -> Self {
        Self {
            states:  states.into_iter().map(Into::into).collect(),
            initial: initial.to_string(),
            edges:   Vec::new(),
        }
    }

    pub fn with_edge(mut self, from: &str, to: &str, weight: f64) -> Self {
        self.edges.push(EdgeSpec {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        });
        self
    }

    /// The business-creation pipeline: S0 (market discovery) through S6
    /// (business created). S5 is the setback state that sends a venture
    /// back to S0 or S1; S6 is absorbing.
    pub fn business_creation() -> Self {
        Self::new(["S0", "S1", "S2", "S3", "S4", "S5", "S6"], "S0")
            .with_edge("S0", "S1", 0.8)
            .with_edge("S0", "S5", 0.2)
            .with_edge("S1", "S2", 0.7)
            .with_edge("S1", "S5", 0.3)
            .with_edge("S2", "S3", 0.8)
            .with_edge("S2", "S5", 0.2)
            .with_edge("S3", "S4", 0.7)
            .with_edge("S3", "S1", 0.1)
            .with_edge("S3", "S5", 0.2)
            .with_edge("S4", "S6", 0.9)
            .with_edge("S4", "S5", 0.1)
            .with_edge("S5", "S0", 0.5)
            .with_edge("S5", "S1", 0.5)
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::business_creation()
    }
}

/// One weighted outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub to:     StateId,
    pub weight: f64,
}

/// A validated chain. Labels are resolved to StateIds.
#[derive(Debug, Clone)]
pub struct ChainDefinition {
    labels:        Vec<String>,
    initial:       StateId,
    outgoing:      Vec<Vec<Transition>>,
    total_weights: Vec<f64>,
}

impl ChainDefinition {
    /// Compile and validate a spec.
    ///
    /// Fails on an empty or duplicated label set, any label outside the
    /// set, a non-positive or non-finite weight, a repeated edge, or a
    /// graph where no terminal state can be reached from the initial one.
    pub fn from_spec(spec: &ChainSpec) -> Result<Self, ConfigurationError> {
        if spec.states.is_empty() {
            return Err(ConfigurationError::EmptyStateSet);
        }

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(spec.states.len());
        for (i, label) in spec.states.iter().enumerate() {
            if index.insert(label.as_str(), i).is_some() {
                return Err(ConfigurationError::DuplicateState { label: label.clone() });
            }
        }

        let resolve = |label: &str, context: String| {
            index
                .get(label)
                .map(|&i| StateId(i))
                .ok_or_else(|| ConfigurationError::UnknownState {
                    label: label.to_string(),
                    context,
                })
        };

        let initial = resolve(&spec.initial, "initial state".to_string())?;

        let mut outgoing: Vec<Vec<Transition>> = vec![Vec::new(); spec.states.len()];
        for edge in &spec.edges {
            let context = format!("edge {} -> {}", edge.from, edge.to);
            let from = resolve(&edge.from, context.clone())?;
            let to = resolve(&edge.to, context)?;

            if !(edge.weight.is_finite() && edge.weight > 0.0) {
                return Err(ConfigurationError::InvalidWeight {
                    from:   edge.from.clone(),
                    to:     edge.to.clone(),
                    weight: edge.weight,
                });
            }

            let row = &mut outgoing[from.0];
            if row.iter().any(|t| t.to == to) {
                return Err(ConfigurationError::DuplicateEdge {
                    from: edge.from.clone(),
                    to:   edge.to.clone(),
                });
            }
            row.push(Transition { to, weight: edge.weight });
        }

        let total_weights: Vec<f64> = outgoing
            .iter()
            .map(|row| row.iter().map(|t| t.weight).sum::<f64>())
            .collect();

        let chain = Self {
            labels: spec.states.clone(),
            initial,
            outgoing,
            total_weights,
        };

        if !chain.terminal_reachable_from(initial) {
            return Err(ConfigurationError::NoReachableTerminal {
                initial: spec.initial.clone(),
            });
        }

        Ok(chain)
    }

    /// The built-in seven-state business-creation chain.
    pub fn business_creation() -> Self {
        Self::from_spec(&ChainSpec::business_creation())
            .expect("built-in business-creation chain is valid")
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.labels.len()).map(StateId)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of a state issued by this chain.
    pub fn label(&self, state: StateId) -> &str {
        &self.labels[state.0]
    }

    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.labels.iter().position(|l| l == label).map(StateId)
    }

    /// Outgoing edges of `state`; empty for a terminal state.
    pub fn outgoing(&self, state: StateId) -> &[Transition] {
        &self.outgoing[state.0]
    }

    pub fn is_terminal(&self, state: StateId) -> bool {
        self.outgoing[state.0].is_empty()
    }

    pub fn terminal_states(&self) -> Vec<StateId> {
        self.states().filter(|&s| self.is_terminal(s)).collect()
    }

    pub(crate) fn total_weight(&self, state: StateId) -> f64 {
        self.total_weights[state.0]
    }

    fn terminal_reachable_from(&self, start: StateId) -> bool {
        let mut seen = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([start]);
        seen[start.0] = true;

        while let Some(state) = queue.pop_front() {
            if self.is_terminal(state) {
                return true;
            }
            for t in self.outgoing(state) {
                if !seen[t.to.0] {
                    seen[t.to.0] = true;
                    queue.push_back(t.to);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_creation_chain_has_single_absorbing_state() {
        let chain = ChainDefinition::business_creation();
        assert_eq!(chain.len(), 7);
        assert_eq!(chain.label(chain.initial()), "S0");

        let terminals: Vec<&str> = chain
            .terminal_states()
            .into_iter()
            .map(|s| chain.label(s))
            .collect();
        assert_eq!(terminals, vec!["S6"]);
    }

    #[test]
    fn outgoing_edges_keep_declaration_order() {
        let chain = ChainDefinition::business_creation();
        let s3 = chain.state_id("S3").unwrap();
        let to: Vec<&str> = chain.outgoing(s3).iter().map(|t| chain.label(t.to)).collect();
        assert_eq!(to, vec!["S4", "S1", "S5"]);
        assert!((chain.total_weight(s3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn state_ids_are_issued_by_the_chain() {
        let chain = ChainDefinition::business_creation();
        let ids: Vec<StateId> = chain.states().collect();
        assert_eq!(ids.iter().map(|s| s.index()).collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
        for &id in &ids {
            assert_eq!(chain.state_id(chain.label(id)), Some(id));
        }
        assert_eq!(chain.state_id("S9"), None);
        assert!(chain.outgoing(chain.initial()).iter().all(|t| t.to.index() < chain.len()));
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let spec = ChainSpec::new(["A", "B", "C"], "A")
            .with_edge("A", "B", 3.0)
            .with_edge("A", "C", 1.0);
        let chain = ChainDefinition::from_spec(&spec).unwrap();
        assert_eq!(chain.total_weight(chain.initial()), 4.0);
        assert!(chain.is_terminal(chain.state_id("B").unwrap()));
    }

    #[test]
    fn unknown_destination_is_rejected() {
        let spec = ChainSpec::business_creation().with_edge("S4", "S9", 0.5);
        let err = ChainDefinition::from_spec(&spec).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownState {
                label:   "S9".into(),
                context: "edge S4 -> S9".into(),
            }
        );
    }

    #[test]
    fn unknown_initial_is_rejected() {
        let spec = ChainSpec::new(["A", "B"], "Z").with_edge("A", "B", 1.0);
        assert!(matches!(
            ChainDefinition::from_spec(&spec),
            Err(ConfigurationError::UnknownState { ref label, .. }) if label == "Z"
        ));
    }

    #[test]
    fn malformed_state_sets_are_rejected() {
        let empty = ChainSpec::new(Vec::<String>::new(), "A");
        assert_eq!(
            ChainDefinition::from_spec(&empty).unwrap_err(),
            ConfigurationError::EmptyStateSet
        );

        let dup = ChainSpec::new(["A", "B", "A"], "A").with_edge("A", "B", 1.0);
        assert_eq!(
            ChainDefinition::from_spec(&dup).unwrap_err(),
            ConfigurationError::DuplicateState { label: "A".into() }
        );
    }

    #[test]
    fn bad_weights_are_rejected() {
        for weight in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let spec = ChainSpec::new(["A", "B"], "A").with_edge("A", "B", weight);
            assert!(
                matches!(
                    ChainDefinition::from_spec(&spec),
                    Err(ConfigurationError::InvalidWeight { .. })
                ),
                "weight {weight} should be rejected"
            );
        }
    }

    #[test]
    fn repeated_edge_is_rejected() {
        let spec = ChainSpec::new(["A", "B"], "A")
            .with_edge("A", "B", 1.0)
            .with_edge("A", "B", 2.0);
        assert_eq!(
            ChainDefinition::from_spec(&spec).unwrap_err(),
            ConfigurationError::DuplicateEdge { from: "A".into(), to: "B".into() }
        );
    }

    #[test]
    fn chain_without_reachable_terminal_is_rejected() {
        // C is terminal but nothing leads to it from A.
        let spec = ChainSpec::new(["A", "B", "C"], "A")
            .with_edge("A", "B", 1.0)
            .with_edge("B", "A", 1.0);
        assert_eq!(
            ChainDefinition::from_spec(&spec).unwrap_err(),
            ConfigurationError::NoReachableTerminal { initial: "A".into() }
        );
    }

    #[test]
    fn spec_round_trips_through_json() {
        let spec = ChainSpec::business_creation();
        let json = serde_json::to_string(&spec).unwrap();
        let back: ChainSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
