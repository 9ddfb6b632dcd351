//! The simulation driver: walks a population through the chain.
//!
//! EXECUTION ORDER per iteration i (fixed, never reordered):
//!   1. Snapshot the state distribution (before anything moves).
//!   2. If every business is terminal, stop. That snapshot is the last.
//!   3. Advance every non-terminal business, in population order.
//!
//! RULES:
//!   - All validation happens before the first business is created.
//!   - All randomness flows through the generator passed to run().
//!   - All state changes are recorded in the event log.

use crate::{
    business::Business,
    chain::ChainDefinition,
    config::{warn_outside_recommended, SimConfig},
    error::{ConfigurationError, SimResult},
    event::{event_type_name, SimEvent, StopReason},
    naming::NamingPolicy,
    rng::SimRng,
    snapshot::{Timeline, TimelineSnapshot},
    types::Iteration,
};

/// Everything a finished run hands to the reporting layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Businesses in population order.
    pub businesses: Vec<Business>,
    pub timeline:   Timeline,
    pub events:     Vec<SimEvent>,
    pub stop:       StopReason,
}

impl SimulationOutcome {
    pub fn all_completed(&self) -> bool {
        matches!(self.stop, StopReason::AllCompleted { .. })
    }

    pub fn completed_count(&self) -> usize {
        self.businesses
            .iter()
            .filter(|b| b.completion_iteration().is_some())
            .count()
    }
}

/// Run one simulation.
///
/// Creates `population_size` businesses named by `naming`, all at the
/// chain's initial state, and drives them for at most `max_iterations`
/// iterations.
///
/// # Errors
///
/// [`ConfigurationError::NonPositive`] if either bound is zero. Nothing
/// is created in that case. Bounds outside the recommended ranges only
/// log a warning.
pub fn run<R: rand::Rng + ?Sized>(
    population_size: usize,
    max_iterations: Iteration,
    chain: &ChainDefinition,
    naming: &NamingPolicy,
    rng: &mut R,
) -> SimResult<SimulationOutcome> {
    if population_size == 0 {
        return Err(ConfigurationError::NonPositive { parameter: "population_size" }.into());
    }
    if max_iterations == 0 {
        return Err(ConfigurationError::NonPositive { parameter: "max_iterations" }.into());
    }
    warn_outside_recommended(population_size, max_iterations);

    let mut businesses: Vec<Business> = naming
        .names(population_size)
        .into_iter()
        .map(|name| Business::new(name, chain.initial()))
        .collect();

    log::info!(
        "run started: businesses={population_size} max_iterations={max_iterations} initial={}",
        chain.label(chain.initial())
    );

    let mut timeline = Timeline::new();
    let mut events = vec![SimEvent::RunStarted { population_size, max_iterations }];
    let mut stop = StopReason::HorizonReached;

    for iteration in 0..max_iterations {
        let snapshot = TimelineSnapshot::capture(iteration, &businesses, chain);
        log::debug!("iteration={iteration} counts={:?}", snapshot.counts());
        timeline.push(snapshot);

        if businesses.iter().all(|b| b.is_terminal(chain)) {
            stop = StopReason::AllCompleted { iteration };
            break;
        }

        for business in businesses.iter_mut().filter(|b| !b.is_terminal(chain)) {
            let Some(step) = business.advance(iteration, chain, rng)? else {
                continue;
            };
            events.push(SimEvent::BusinessAdvanced {
                iteration,
                business: business.name().to_string(),
                from:     chain.label(step.from).to_string(),
                to:       chain.label(step.to).to_string(),
            });
            if step.completed {
                log::debug!("iteration={iteration} completed: {}", business.name());
                events.push(SimEvent::BusinessCompleted {
                    iteration,
                    business: business.name().to_string(),
                });
            }
        }
    }

    events.push(SimEvent::RunFinished { stop });

    let outcome = SimulationOutcome { businesses, timeline, events, stop };
    log::info!(
        "run finished: {} of {population_size} completed, {} snapshots, {} events, stop={:?}",
        outcome.completed_count(),
        outcome.timeline.len(),
        outcome.events.len(),
        outcome.stop
    );
    if log::log_enabled!(log::Level::Trace) {
        for event in &outcome.events {
            log::trace!("{}: {event:?}", event_type_name(event));
        }
    }
    Ok(outcome)
}

/// A validated, ready-to-run simulation built from a [`SimConfig`].
#[derive(Debug, Clone)]
pub struct Simulation {
    chain:           ChainDefinition,
    naming:          NamingPolicy,
    population_size: usize,
    max_iterations:  Iteration,
    seed:            u64,
}

impl Simulation {
    /// Validate every part of `config` up front.
    ///
    /// Fails on an invalid chain spec, an invalid name list, or a zero
    /// population/iteration bound. Values outside the recommended
    /// ranges are accepted and warned about when the run starts.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        let chain = ChainDefinition::from_spec(&config.chain)?;
        let naming = NamingPolicy::new(config.business_names.iter().cloned())?;
        Self::new(chain, naming, config.population_size, config.max_iterations, config.seed)
    }

    pub fn new(
        chain: ChainDefinition,
        naming: NamingPolicy,
        population_size: usize,
        max_iterations: Iteration,
        seed: u64,
    ) -> SimResult<Self> {
        if population_size == 0 {
            return Err(ConfigurationError::NonPositive { parameter: "population_size" }.into());
        }
        if max_iterations == 0 {
            return Err(ConfigurationError::NonPositive { parameter: "max_iterations" }.into());
        }
        Ok(Self { chain, naming, population_size, max_iterations, seed })
    }

    pub fn chain(&self) -> &ChainDefinition {
        &self.chain
    }

    pub fn naming(&self) -> &NamingPolicy {
        &self.naming
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn max_iterations(&self) -> Iteration {
        self.max_iterations
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run with a caller-supplied generator.
    pub fn run<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> SimResult<SimulationOutcome> {
        run(self.population_size, self.max_iterations, &self.chain, &self.naming, rng)
    }

    /// Run with a SimRng seeded from this simulation's seed.
    pub fn run_seeded(&self) -> SimResult<SimulationOutcome> {
        self.run(&mut SimRng::new(self.seed))
    }

    /// Run `k` of a batch, seeded from this simulation's seed as master.
    pub fn run_batch_member(&self, run_index: u64) -> SimResult<SimulationOutcome> {
        self.run(&mut SimRng::for_run(self.seed, run_index))
    }
}
