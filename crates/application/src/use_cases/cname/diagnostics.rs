use ferrous_resolve_domain::{ChainValidation, CnameChainResult};

const LONG_CHAIN_THRESHOLD: usize = 5;
const SLOW_RESOLUTION_MS: u64 = 2000;

/// Checks a traced chain for problems worth reporting.
pub fn validate(result: &CnameChainResult) -> ChainValidation {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    if result.has_loop {
        issues.push("CNAME loop detected".to_string());
        recommendations
            .push("Break the loop so one alias points at an address record".to_string());
    }

    if result.max_depth_reached {
        issues.push("Chain exceeded maximum depth".to_string());
        recommendations
            .push("Flatten the chain by pointing aliases closer to the target".to_string());
    }

    if result.chain.len() > LONG_CHAIN_THRESHOLD {
        issues.push(format!("Chain is too long ({} entries)", result.chain.len()));
        recommendations.push("Reduce the number of CNAME indirections".to_string());
    }

    if result.resolution_time_ms > SLOW_RESOLUTION_MS {
        issues.push(format!("Slow resolution ({}ms)", result.resolution_time_ms));
        recommendations.push("Check upstream latency for every hop in the chain".to_string());
    }

    if result.final_target.is_none() && !result.has_loop {
        issues.push("Chain did not resolve to a final target".to_string());
        recommendations.push("Verify that every alias in the chain exists".to_string());
    }

    ChainValidation {
        is_valid: issues.is_empty(),
        issues,
        recommendations,
    }
}

/// Aggregate 0..=100 score over many traces; loops weigh most.
pub fn health_score(results: &[CnameChainResult]) -> f64 {
    if results.is_empty() {
        return 100.0;
    }

    let total = results.len() as f64;
    let loops = results.iter().filter(|r| r.has_loop).count() as f64;
    let long = results
        .iter()
        .filter(|r| r.chain.len() > LONG_CHAIN_THRESHOLD)
        .count() as f64;
    let deep = results.iter().filter(|r| r.max_depth_reached).count() as f64;

    let score = 100.0 - 50.0 * loops / total - 20.0 * long / total - 30.0 * deep / total;
    score.clamp(0.0, 100.0)
}
