use tsa_auction::{verify, RunMetrics};
use tsa_core::models::{AuctionOutcome, EquilibriumReport, Market};

/// The full report of one auction run: the terminal state, the equilibrium
/// audit of that state, and the summary metrics.
#[derive(serde::Serialize)]
pub struct RunReport {
    pub outcome: AuctionOutcome,
    pub equilibrium: EquilibriumReport,
    pub metrics: RunMetrics,
}

impl RunReport {
    pub fn new(market: &Market, outcome: AuctionOutcome) -> Self {
        let equilibrium = verify(market);
        let metrics = RunMetrics::collect(market, &outcome);
        Self {
            outcome,
            equilibrium,
            metrics,
        }
    }
}

/// Prints a round-by-round account of the run to stderr.
pub fn print_trace(outcome: &AuctionOutcome) {
    for record in &outcome.history {
        let prices = record
            .prices
            .iter()
            .map(|price| format!("{price:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        eprintln!("round {:>4} | prices [{prices}]", record.round);
        for (agent, bundle) in &record.allocation {
            match bundle {
                Some(bundle) => eprintln!("  agent {agent} -> {bundle}"),
                None => eprintln!("  agent {agent} -> (none)"),
            }
        }
    }
}
