use crate::{verify, AscendingAuction};
use tsa_core::models::{AuctionOutcome, AuctionStatus, ConfigError, Market, MarketConfig};

/// Summary metrics for one auction run, for reporting and ε-sensitivity
/// analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunMetrics {
    /// The price increment used for the run
    pub epsilon: f64,
    /// Rounds executed, including the terminal one
    pub rounds_used: usize,
    /// Whether the run converged before the round cap
    pub converged: bool,
    /// Whether the terminal state passed the equilibrium audit
    pub equilibrium: bool,
    /// The number of violated equilibrium conditions (0 when `equilibrium`)
    pub violations: usize,
    /// The sum of assigned agents' valuations
    pub total_valuation: f64,
    /// Unallocated reserve mass plus `total_valuation`
    pub solution_value: f64,
}

impl RunMetrics {
    /// Computes metrics from a finished run.
    pub fn collect(market: &Market, outcome: &AuctionOutcome) -> Self {
        let report = verify(market);
        Self {
            epsilon: market.epsilon(),
            rounds_used: outcome.rounds_used,
            converged: outcome.status == AuctionStatus::Converged,
            equilibrium: report.passed,
            violations: report.violations.len(),
            total_valuation: market.total_valuation(),
            solution_value: market.solution_value(),
        }
    }
}

/// Re-runs a scenario once per ε and collects the metrics of each run.
///
/// Smaller increments track the equilibrium more faithfully but need more
/// rounds; this is the sweep that makes the trade-off visible.
pub fn epsilon_sweep(
    config: &MarketConfig,
    epsilons: &[f64],
) -> Result<Vec<RunMetrics>, ConfigError> {
    let engine = AscendingAuction::new();
    epsilons
        .iter()
        .map(|epsilon| {
            let mut run = config.clone();
            run.epsilon = *epsilon;
            let mut market = Market::new(run)?;
            let outcome = engine.run(&mut market);
            Ok(RunMetrics::collect(&market, &outcome))
        })
        .collect()
}
