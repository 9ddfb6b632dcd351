use thiserror::Error;

/// An invalid chain, population or naming setup.
///
/// Every variant is raised before a run mutates any business.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Unknown state '{label}' referenced by {context}")]
    UnknownState { label: String, context: String },

    #[error("Chain has no states")]
    EmptyStateSet,

    #[error("State '{label}' is declared more than once")]
    DuplicateState { label: String },

    #[error("Invalid weight {weight} on edge {from} -> {to} (must be finite and > 0)")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("Edge {from} -> {to} is declared more than once")]
    DuplicateEdge { from: String, to: String },

    #[error("No terminal state is reachable from initial state '{initial}'")]
    NoReachableTerminal { initial: String },

    #[error("Cannot step from terminal state '{label}'")]
    TerminalStep { label: String },

    #[error("{parameter} must be positive")]
    NonPositive { parameter: &'static str },

    #[error("Business name '{name}' is used more than once")]
    DuplicateName { name: String },

    #[error("Business name at position {position} is blank")]
    BlankName { position: usize },
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
