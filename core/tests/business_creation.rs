//! Scenario tests on the built-in seven-state business-creation chain.

use markov_business_core::{
    chain::ChainDefinition,
    config::SimConfig,
    engine::Simulation,
    report::RunReport,
};
use std::collections::HashSet;

#[test]
fn three_businesses_five_iterations() {
    let config = SimConfig {
        population_size: 3,
        max_iterations: 5,
        seed: 2024,
        ..SimConfig::default()
    };
    let sim = Simulation::from_config(&config).unwrap();
    let outcome = sim.run_seeded().unwrap();
    let report = RunReport::new(sim.chain(), &outcome, Some(config.seed));

    assert_eq!(report.businesses.len(), 3);
    for business in &report.businesses {
        assert_eq!(business.history[0], "S0");
        // Shortest absorbing path S0 S1 S2 S3 S4 S6 is five transitions,
        // the first of them in iteration 0.
        if let Some(done) = business.completion_iteration {
            assert!(done >= 4, "{} completed at {done}", business.name);
            assert_eq!(business.final_state, "S6");
        }
    }
    assert!(report.timeline.len() <= 5);
}

#[test]
fn first_transition_leaves_s0_for_s1_or_s5() {
    let config = SimConfig { population_size: 50, max_iterations: 10, ..SimConfig::default() };
    let sim = Simulation::from_config(&config).unwrap();
    let outcome = sim.run_seeded().unwrap();
    let chain = sim.chain();

    for business in &outcome.businesses {
        let second = chain.label(business.history()[1]);
        assert!(second == "S1" || second == "S5", "S0 -> {second} is not an edge");
    }
}

#[test]
fn no_completion_before_iteration_four_across_seeds() {
    let chain = ChainDefinition::business_creation();
    for seed in 0..50 {
        let config = SimConfig { population_size: 20, max_iterations: 100, seed, ..SimConfig::default() };
        let outcome = Simulation::from_config(&config).unwrap().run_seeded().unwrap();
        for business in &outcome.businesses {
            if let Some(done) = business.completion_iteration() {
                assert!(done >= 4, "seed {seed}: {} completed at {done}", business.name());
                assert_eq!(chain.label(business.state()), "S6");
            }
        }
    }
}

#[test]
fn names_are_distinct_beyond_the_curated_list() {
    let config = SimConfig { population_size: 50, max_iterations: 10, ..SimConfig::default() };
    let outcome = Simulation::from_config(&config).unwrap().run_seeded().unwrap();
    let names: HashSet<&str> = outcome.businesses.iter().map(|b| b.name()).collect();
    assert_eq!(names.len(), 50);
    assert!(names.contains("Business 50"));
}

#[test]
fn most_businesses_finish_with_a_generous_horizon() {
    let config = SimConfig { population_size: 20, max_iterations: 500, seed: 7, ..SimConfig::default() };
    let outcome = Simulation::from_config(&config).unwrap().run_seeded().unwrap();
    // Expected time to absorption is well under 50 iterations.
    assert!(outcome.completed_count() >= 18, "only {} finished", outcome.completed_count());
}
