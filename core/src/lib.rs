//! Markov-chain simulation of business creation.
//!
//! A population of businesses walks a fixed weighted state graph until
//! each reaches an absorbing state or the iteration cap runs out. The
//! driver records a per-iteration census of the population and the
//! iteration at which each business completed.

pub mod business;
pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod naming;
pub mod report;
pub mod rng;
pub mod snapshot;
pub mod stepper;
pub mod types;
