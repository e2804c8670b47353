//! Per-round conflict resolution between agents' demand sets.
//!
//! The over-demand question is a bipartite feasibility problem: can every
//! agent with a non-degenerate demand set be handed one of its demanded
//! bundles without two agents sharing a slot? A greedy pass can answer "no"
//! where a different choice of bundles would have answered "yes", so
//! convergence is decided by an explicit backtracking search instead. Both
//! searches visit agents in ascending id order and bundles in
//! `(resource, start)` order, which keeps every round fully deterministic.

use crate::Map;
use tsa_core::models::{AgentId, Bundle, Layout, Market, SlotIndex};

/// Every agent's demand set at current prices, in ascending id order.
///
/// Every agent appears every round, even one that is permanently
/// unsatisfiable; its demand set is simply empty.
pub(crate) fn collect_demands(market: &Market) -> Vec<(AgentId, Vec<Bundle>)> {
    let prices = market.prices();
    let layout = market.layout();
    market
        .agents()
        .iter()
        .map(|agent| (agent.id(), agent.demand(&prices, &layout)))
        .collect()
}

/// Searches for a clearing assignment: one demanded bundle per demanding
/// agent, no slot shared. Returns `None` when no such assignment exists,
/// which is precisely the over-demand condition.
pub(crate) fn clearing_assignment(
    demands: &[(AgentId, Vec<Bundle>)],
    layout: &Layout,
) -> Option<Map<AgentId, Option<Bundle>>> {
    let mut taken = vec![false; layout.slot_count()];
    let mut chosen: Vec<Option<Bundle>> = vec![None; demands.len()];
    if !search(demands, layout, 0, &mut taken, &mut chosen) {
        return None;
    }
    Some(
        demands
            .iter()
            .zip(chosen)
            .map(|((agent, _), bundle)| (*agent, bundle))
            .collect(),
    )
}

fn search(
    demands: &[(AgentId, Vec<Bundle>)],
    layout: &Layout,
    position: usize,
    taken: &mut [bool],
    chosen: &mut [Option<Bundle>],
) -> bool {
    let Some((_, bundles)) = demands.get(position) else {
        return true;
    };
    if bundles.is_empty() {
        chosen[position] = None;
        return search(demands, layout, position + 1, taken, chosen);
    }
    for bundle in bundles {
        if bundle.slots(layout).any(|slot| taken[*slot]) {
            continue;
        }
        for slot in bundle.slots(layout) {
            taken[*slot] = true;
        }
        chosen[position] = Some(*bundle);
        if search(demands, layout, position + 1, taken, chosen) {
            return true;
        }
        for slot in bundle.slots(layout) {
            taken[*slot] = false;
        }
        chosen[position] = None;
    }
    false
}

/// Greedy id-order resolution used for the provisional allocation of a
/// non-converged round: each agent takes its first demanded bundle that is
/// still wholly free, or goes without. Whole bundles only — an agent is never
/// handed part of one.
pub(crate) fn greedy_assignment(
    demands: &[(AgentId, Vec<Bundle>)],
    layout: &Layout,
) -> Map<AgentId, Option<Bundle>> {
    let mut taken = vec![false; layout.slot_count()];
    demands
        .iter()
        .map(|(agent, bundles)| {
            let pick = bundles
                .iter()
                .find(|bundle| !bundle.slots(layout).any(|slot| taken[*slot]))
                .copied();
            if let Some(bundle) = pick {
                for slot in bundle.slots(layout) {
                    taken[*slot] = true;
                }
            }
            (*agent, pick)
        })
        .collect()
}

/// Every slot wanted by two or more agents' demand sets, in index order.
///
/// A slot can hold one agent, so any such slot cannot be granted to every
/// agent demanding it. An agent counts once per slot no matter how many of
/// its tied bundles cover it.
pub(crate) fn contested_slots(
    demands: &[(AgentId, Vec<Bundle>)],
    layout: &Layout,
) -> Vec<SlotIndex> {
    let mut counts = vec![0usize; layout.slot_count()];
    let mut last_marked: Vec<Option<AgentId>> = vec![None; layout.slot_count()];
    for (agent, bundles) in demands {
        for bundle in bundles {
            for slot in bundle.slots(layout) {
                if last_marked[*slot] != Some(*agent) {
                    last_marked[*slot] = Some(*agent);
                    counts[*slot] += 1;
                }
            }
        }
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count >= 2)
        .map(|(index, _)| SlotIndex::from(index))
        .collect()
}
