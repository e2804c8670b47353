use crate::assign::{clearing_assignment, collect_demands, contested_slots};
use tsa_core::models::{EquilibriumReport, Market, Violation, TOLERANCE};

/// Audits a terminal market state against the competitive-equilibrium
/// conditions.
///
/// The check is independent of how the state was reached: demand is
/// recomputed from final prices, and the allocation and prices jointly pass
/// when
///
/// 1. every agent's outcome has non-negative utility (individual
///    rationality),
/// 2. every agent's outcome lies in its demand set — no feasible bundle would
///    be strictly better (no improving deviation), and
/// 3. all demand sets can be honored simultaneously, so no slot remains
///    over-demanded (market clearing).
///
/// The function is pure: verifying the same market twice yields identical
/// reports. A failed report is a normal, fully-described outcome — expected
/// for round-cap-exceeded runs — not a defect in the verifier.
pub fn verify(market: &Market) -> EquilibriumReport {
    let layout = market.layout();
    let prices = market.prices();
    let demands = collect_demands(market);

    let mut violations = Vec::new();

    for (agent, demand) in market.agents().iter().zip(&demands) {
        debug_assert_eq!(agent.id(), demand.0);
        match market.assignment_of(agent.id()) {
            Some(bundle) => {
                if agent.surplus(&bundle, &prices, &layout) < -TOLERANCE {
                    violations.push(Violation::NegativeSurplus { agent: agent.id() });
                }
                if !demand.1.contains(&bundle) {
                    violations.push(Violation::ImprovingDeviation { agent: agent.id() });
                }
            }
            None => {
                // An empty-handed agent is content only if it demands nothing.
                if !demand.1.is_empty() {
                    violations.push(Violation::ImprovingDeviation { agent: agent.id() });
                }
            }
        }
    }

    if clearing_assignment(&demands, &layout).is_none() {
        for slot in contested_slots(&demands, &layout) {
            violations.push(Violation::OverDemand { slot });
        }
    }

    EquilibriumReport {
        passed: violations.is_empty(),
        violations,
    }
}
