//! Single Markov step: pick the next state from weighted edges.

use crate::{
    chain::ChainDefinition,
    error::ConfigurationError,
    types::StateId,
};

/// Draw the successor of `current`.
///
/// Each outgoing edge is chosen with probability weight / total weight.
/// Edges are scanned in declaration order, so a given generator state
/// always yields the same successor.
///
/// # Errors
///
/// Returns [`ConfigurationError::TerminalStep`] if `current` has no
/// outgoing edges.
pub fn choose_next<R: rand::Rng + ?Sized>(
    current: StateId,
    chain: &ChainDefinition,
    rng: &mut R,
) -> Result<StateId, ConfigurationError> {
    let edges = chain.outgoing(current);
    let Some(last) = edges.last() else {
        return Err(ConfigurationError::TerminalStep {
            label: chain.label(current).to_string(),
        });
    };

    let target = rng.gen::<f64>() * chain.total_weight(current);
    let mut cumulative = 0.0;
    for edge in edges {
        cumulative += edge.weight;
        if target < cumulative {
            return Ok(edge.to);
        }
    }
    // Only reachable through floating-point rounding at the top end.
    Ok(last.to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainSpec;
    use crate::rng::SimRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn terminal_state_cannot_step() {
        let chain = ChainDefinition::business_creation();
        let s6 = chain.state_id("S6").unwrap();
        let mut rng = SimRng::new(1);
        assert_eq!(
            choose_next(s6, &chain, &mut rng),
            Err(ConfigurationError::TerminalStep { label: "S6".into() })
        );
    }

    #[test]
    fn single_edge_is_always_taken() {
        let chain = ChainDefinition::business_creation();
        let s0 = chain.initial();
        let mut rng = StdRng::seed_from_u64(9);
        let spec = ChainSpec::new(["A", "B"], "A").with_edge("A", "B", 0.25);
        let tiny = ChainDefinition::from_spec(&spec).unwrap();
        for _ in 0..100 {
            assert_eq!(choose_next(tiny.initial(), &tiny, &mut rng).unwrap().index(), 1);
        }
        // S0 only leads to S1 or S5.
        for _ in 0..100 {
            let next = chain.label(choose_next(s0, &chain, &mut rng).unwrap());
            assert!(next == "S1" || next == "S5", "unexpected successor {next}");
        }
    }

    #[test]
    fn frequencies_follow_relative_weights() {
        // 3:1 odds, expressed with weights that do not sum to one.
        let spec = ChainSpec::new(["A", "B", "C"], "A")
            .with_edge("A", "B", 6.0)
            .with_edge("A", "C", 2.0);
        let chain = ChainDefinition::from_spec(&spec).unwrap();
        let b = chain.state_id("B").unwrap();

        let mut rng = SimRng::new(42);
        let n = 20_000;
        let hits = (0..n)
            .filter(|_| choose_next(chain.initial(), &chain, &mut rng).unwrap() == b)
            .count();
        let freq = hits as f64 / n as f64;
        assert!((freq - 0.75).abs() < 0.02, "B frequency {freq}, expected ~0.75");
    }

    #[test]
    fn same_seed_same_draws() {
        let chain = ChainDefinition::business_creation();
        let s3 = chain.state_id("S3").unwrap();
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<StateId> = (0..50).map(|_| choose_next(s3, &chain, &mut a).unwrap()).collect();
        let ys: Vec<StateId> = (0..50).map(|_| choose_next(s3, &chain, &mut b).unwrap()).collect();
        assert_eq!(xs, ys);
    }
}
