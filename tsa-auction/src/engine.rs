use crate::assign::{clearing_assignment, collect_demands, contested_slots, greedy_assignment};
use tsa_core::models::{AuctionOutcome, AuctionStatus, Market};

/// The iterative ascending-price auction.
///
/// Each round the engine collects every agent's demand at current prices. If
/// all demands can be honored simultaneously the run converges on that
/// allocation; otherwise every contested slot's price rises by the market's ε
/// and a greedy provisional allocation is recorded. Over-demand is the normal
/// driving condition, never a failure — the only non-converged terminal state
/// is exhausting the round cap, reported as a status rather than an error.
///
/// Given the same market and ε, two runs produce identical histories: agents
/// are visited in ascending id order, bundles in `(resource, start)` order,
/// and nothing else breaks ties.
#[derive(Debug, Default)]
pub struct AscendingAuction;

impl AscendingAuction {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Runs the auction to termination, mutating the market in place.
    ///
    /// The engine holds exclusive access to the market for the whole run;
    /// afterwards the market is the terminal state the returned outcome
    /// describes, ready for read-only verification and reporting.
    pub fn run(&self, market: &mut Market) -> AuctionOutcome {
        let layout = market.layout();
        let status = loop {
            let demands = collect_demands(market);

            if let Some(allocation) = clearing_assignment(&demands, &layout) {
                market.set_allocation(allocation);
                market.record_round();
                tracing::debug!(round = market.round(), "auction converged");
                break AuctionStatus::Converged;
            }

            // Whenever no clearing assignment exists, some slot is wanted by
            // two or more agents, so every non-converged round raises at
            // least one price and the price vector strictly advances.
            let contested = contested_slots(&demands, &layout);
            market.raise_prices(&contested);
            market.set_allocation(greedy_assignment(&demands, &layout));
            market.record_round();
            tracing::debug!(
                round = market.round(),
                contested = contested.len(),
                "raised prices on contested slots"
            );

            if market.round() >= market.round_cap() {
                tracing::warn!(
                    round_cap = market.round_cap(),
                    "round cap exceeded before convergence; allocation is best-effort"
                );
                break AuctionStatus::RoundCapExceeded;
            }
        };

        AuctionOutcome {
            status,
            rounds_used: market.round(),
            prices: market.prices(),
            allocation: market.allocation().clone(),
            history: market.history().to_vec(),
        }
    }
}
