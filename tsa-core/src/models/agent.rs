use crate::models::{AgentId, Bundle, Layout, Valuation, TOLERANCE};

/// An agent (job) bidding for a contiguous run of slots.
///
/// Each agent needs exactly `length` consecutive slots on a single resource
/// timeline, finishing at or before its `deadline` offset. Its preferences
/// over feasible windows are given by a pluggable [`Valuation`]. Agents carry
/// no mutable auction state: demand is recomputed from prices every round.
#[derive(Debug)]
pub struct Agent {
    id: AgentId,
    deadline: usize,
    length: usize,
    valuation: Box<dyn Valuation>,
}

impl Agent {
    /// Creates a new agent. Lengths are validated by [`Market`] construction;
    /// a deadline too tight for the length is *not* an error here — such an
    /// agent simply demands the empty bundle forever.
    ///
    /// [`Market`]: crate::models::Market
    pub fn new(
        id: impl Into<AgentId>,
        deadline: usize,
        length: usize,
        valuation: Box<dyn Valuation>,
    ) -> Self {
        Self {
            id: id.into(),
            deadline,
            length,
            valuation,
        }
    }

    /// The agent's unique id.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The last timeline offset at which the agent's run may finish.
    pub fn deadline(&self) -> usize {
        self.deadline
    }

    /// The number of consecutive slots the agent needs.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Whether any feasible window exists at all under the given layout.
    pub fn is_satisfiable(&self, layout: &Layout) -> bool {
        self.length > 0
            && self.length <= layout.slots_per_resource
            && self.deadline + 1 >= self.length
    }

    /// The value the agent places on a feasible bundle.
    pub fn value(&self, bundle: &Bundle) -> f64 {
        self.valuation.value(bundle)
    }

    /// The agent's utility for a bundle at the given prices.
    pub fn surplus(&self, bundle: &Bundle, prices: &[f64], layout: &Layout) -> f64 {
        self.value(bundle) - bundle.cost(prices, layout)
    }

    /// Every feasible window for this agent, in `(resource, start)` order.
    pub fn feasible_bundles(&self, layout: &Layout) -> Vec<Bundle> {
        if !self.is_satisfiable(layout) {
            return Vec::new();
        }
        let last_start = self
            .deadline
            .min(layout.slots_per_resource - 1)
            .saturating_sub(self.length - 1);
        let mut bundles = Vec::with_capacity(layout.resources * (last_start + 1));
        for resource in 0..layout.resources {
            for start in 0..=last_start {
                bundles.push(Bundle {
                    resource,
                    start,
                    length: self.length,
                });
            }
        }
        bundles
    }

    /// Computes the agent's demand set at the given prices.
    ///
    /// Demand is computed against the market-clearing question: all feasible
    /// windows are candidates, regardless of the current assignment. A window
    /// is worth pursuing while it is individually rational (positive value,
    /// surplus not below zero); among those the agent pursues the
    /// highest-valued windows, taking the cheapest at equal value, and keeps
    /// pursuing a window whose surplus has been driven exactly to zero. All
    /// ties are returned in `(resource, start)` order; conflict resolution
    /// between agents is the engine's job, not ours.
    ///
    /// An empty result means the agent demands only the empty bundle.
    pub fn demand(&self, prices: &[f64], layout: &Layout) -> Vec<Bundle> {
        let mut best: Vec<Bundle> = Vec::new();
        let mut best_value = 0.0;
        let mut best_surplus = 0.0;
        for bundle in self.feasible_bundles(layout) {
            let value = self.value(&bundle);
            if value <= TOLERANCE {
                continue;
            }
            let surplus = value - bundle.cost(prices, layout);
            if surplus < -TOLERANCE {
                continue;
            }
            if best.is_empty()
                || value > best_value + TOLERANCE
                || (value > best_value - TOLERANCE && surplus > best_surplus + TOLERANCE)
            {
                best_value = value;
                best_surplus = surplus;
                best.clear();
                best.push(bundle);
            } else if value > best_value - TOLERANCE && surplus > best_surplus - TOLERANCE {
                best.push(bundle);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedWorth, SlotValues};

    fn layout() -> Layout {
        Layout {
            resources: 1,
            slots_per_resource: 4,
        }
    }

    #[test]
    fn test_feasible_windows_respect_deadline() {
        let agent = Agent::new(1u32, 2, 2, Box::new(FixedWorth(10.0)));
        let bundles = agent.feasible_bundles(&layout());
        assert_eq!(
            bundles,
            vec![
                Bundle { resource: 0, start: 0, length: 2 },
                Bundle { resource: 0, start: 1, length: 2 },
            ]
        );
    }

    #[test]
    fn test_unsatisfiable_agent_demands_nothing() {
        // Needs 3 slots but must finish by offset 1
        let tight = Agent::new(1u32, 1, 3, Box::new(FixedWorth(10.0)));
        assert!(!tight.is_satisfiable(&layout()));
        assert!(tight.demand(&[0.0; 4], &layout()).is_empty());

        // Needs more slots than a timeline holds
        let oversized = Agent::new(2u32, 3, 5, Box::new(FixedWorth(10.0)));
        assert!(!oversized.is_satisfiable(&layout()));
        assert!(oversized.demand(&[0.0; 4], &layout()).is_empty());
    }

    #[test]
    fn test_demand_prefers_cheapest_at_equal_value() {
        let agent = Agent::new(1u32, 3, 2, Box::new(FixedWorth(10.0)));
        let prices = [3.0, 1.0, 1.0, 3.0];
        let demand = agent.demand(&prices, &layout());
        assert_eq!(demand, vec![Bundle { resource: 0, start: 1, length: 2 }]);
    }

    #[test]
    fn test_demand_returns_ties_in_full() {
        let agent = Agent::new(1u32, 3, 2, Box::new(FixedWorth(10.0)));
        let demand = agent.demand(&[2.0; 4], &layout());
        assert_eq!(demand.len(), 3);
    }

    #[test]
    fn test_demand_pursues_higher_value_over_higher_surplus() {
        // Offset 0 is worth 10 but costs 9; offset 1 is worth 4 and free. The
        // agent stays on its highest-valued window while it remains rational.
        let agent = Agent::new(1u32, 1, 1, Box::new(SlotValues(vec![10.0, 4.0])));
        let demand = agent.demand(&[9.0, 0.0, 0.0, 0.0], &layout());
        assert_eq!(demand, vec![Bundle { resource: 0, start: 0, length: 1 }]);
    }

    #[test]
    fn test_demand_drops_negative_surplus() {
        let agent = Agent::new(1u32, 1, 1, Box::new(SlotValues(vec![10.0, 4.0])));
        let demand = agent.demand(&[11.0, 5.0, 0.0, 0.0], &layout());
        assert!(demand.is_empty());
    }

    #[test]
    fn test_zero_surplus_still_demanded() {
        let agent = Agent::new(1u32, 1, 1, Box::new(SlotValues(vec![8.0, 6.0])));
        let demand = agent.demand(&[8.0, 0.0, 0.0, 0.0], &layout());
        assert_eq!(demand, vec![Bundle { resource: 0, start: 0, length: 1 }]);
    }
}
