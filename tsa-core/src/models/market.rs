use crate::models::{
    Agent, AgentId, Bundle, ConfigError, MarketConfig, RoundRecord, Slot, SlotIndex,
};
use crate::Map;

/// The shape of a market: how many identical timelines, and how long each is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// The number of identical resource timelines
    pub resources: usize,
    /// The number of slots on each timeline
    pub slots_per_resource: usize,
}

impl Layout {
    /// The total number of slots across all timelines.
    pub fn slot_count(&self) -> usize {
        self.resources * self.slots_per_resource
    }

    /// The global index of a `(resource, offset)` position.
    pub fn index_of(&self, resource: usize, offset: usize) -> SlotIndex {
        SlotIndex::from(resource * self.slots_per_resource + offset)
    }
}

/// The single mutable shared state of an auction run.
///
/// A market owns the slot arena and the agents, the current price vector
/// (mirrored in each [`Slot`]), the provisional allocation (mirrored in
/// `Slot::assigned`) and the round history. It is constructed from a
/// [`MarketConfig`] before any round, mutated in place by the auction engine
/// — which holds exclusive `&mut` access for the duration of a run — and is
/// read-only afterwards, for verification and reporting.
#[derive(Debug)]
pub struct Market {
    layout: Layout,
    slots: Vec<Slot>,
    agents: Vec<Agent>,
    epsilon: f64,
    round_cap: usize,
    round: usize,
    allocation: Map<AgentId, Option<Bundle>>,
    history: Vec<RoundRecord>,
}

impl Market {
    /// Validates a scenario definition and constructs the initial market.
    ///
    /// Prices start at each slot's reserve. Agents are ordered by ascending
    /// id so that every later iteration — demand collection, conflict
    /// resolution, verification — is deterministic. A structurally
    /// unsatisfiable agent is accepted with a warning; it will demand the
    /// empty bundle in every round rather than fail the run.
    pub fn new(config: MarketConfig) -> Result<Self, ConfigError> {
        if config.resources == 0 {
            return Err(ConfigError::NoResources);
        }
        if config.slots_per_resource == 0 {
            return Err(ConfigError::NoSlots);
        }
        if !(config.epsilon.is_finite() && config.epsilon > 0.0) {
            return Err(ConfigError::InvalidEpsilon);
        }
        if config.round_cap == 0 {
            return Err(ConfigError::ZeroRoundCap);
        }

        let layout = Layout {
            resources: config.resources,
            slots_per_resource: config.slots_per_resource,
        };

        let reserves: Vec<f64> = match &config.reserve_prices {
            Some(prices) => {
                if prices.len() != layout.slots_per_resource {
                    return Err(ConfigError::ReserveLength {
                        expected: layout.slots_per_resource,
                        actual: prices.len(),
                    });
                }
                prices.clone()
            }
            None => vec![config.reserve_price; layout.slots_per_resource],
        };
        if reserves.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(ConfigError::InvalidReserve);
        }

        let mut slots = Vec::with_capacity(layout.slot_count());
        for resource in 0..layout.resources {
            for (offset, reserve) in reserves.iter().enumerate() {
                let index = layout.index_of(resource, offset);
                slots.push(Slot::new(index, resource, offset, *reserve));
            }
        }

        let mut agents = Vec::with_capacity(config.agents.len());
        for spec in &config.agents {
            let id = AgentId::from(spec.id);
            if spec.length == 0 {
                return Err(ConfigError::ZeroLength(id));
            }
            spec.valuation.validate(id)?;
            agents.push(Agent::new(id, spec.deadline, spec.length, spec.valuation.build()));
        }
        agents.sort_by_key(|agent| agent.id());
        if let Some(pair) = agents.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(ConfigError::DuplicateAgent(pair[0].id()));
        }

        for agent in &agents {
            if !agent.is_satisfiable(&layout) {
                tracing::warn!(
                    agent = %agent.id(),
                    deadline = agent.deadline(),
                    length = agent.length(),
                    "agent can never be satisfied; it will demand only the empty bundle"
                );
            }
        }

        let allocation = agents.iter().map(|agent| (agent.id(), None)).collect();

        Ok(Self {
            layout,
            slots,
            agents,
            epsilon: config.epsilon,
            round_cap: config.round_cap,
            round: 0,
            allocation,
            history: Vec::new(),
        })
    }

    /// The market's layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The slot arena, in global index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The agents, in ascending id order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The price increment ε for this run.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The configured maximum number of rounds.
    pub fn round_cap(&self) -> usize {
        self.round_cap
    }

    /// The number of rounds executed so far.
    pub fn round(&self) -> usize {
        self.round
    }

    /// The current price vector, one entry per slot in index order.
    pub fn prices(&self) -> Vec<f64> {
        self.slots.iter().map(Slot::price).collect()
    }

    /// The current provisional allocation; every agent appears.
    pub fn allocation(&self) -> &Map<AgentId, Option<Bundle>> {
        &self.allocation
    }

    /// The bundle currently assigned to an agent, if any.
    pub fn assignment_of(&self, agent: AgentId) -> Option<Bundle> {
        self.allocation.get(&agent).copied().flatten()
    }

    /// The per-round history recorded so far.
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Raises the price of every listed slot by ε.
    ///
    /// Driven by the auction engine only; this is what makes slot prices
    /// monotonically non-decreasing over the life of a run.
    pub fn raise_prices(&mut self, contested: &[SlotIndex]) {
        for slot in contested {
            self.slots[**slot].price += self.epsilon;
        }
    }

    /// Replaces the provisional allocation, keeping `Slot::assigned` in sync.
    ///
    /// Bundles are trusted to be mutually disjoint; the engine's conflict
    /// resolution guarantees it.
    pub fn set_allocation(&mut self, allocation: Map<AgentId, Option<Bundle>>) {
        for slot in &mut self.slots {
            slot.assigned = None;
        }
        for (agent, bundle) in &allocation {
            if let Some(bundle) = bundle {
                for index in bundle.slots(&self.layout) {
                    debug_assert!(self.slots[*index].assigned.is_none());
                    self.slots[*index].assigned = Some(*agent);
                }
            }
        }
        self.allocation = allocation;
    }

    /// Closes out a round: bumps the counter and snapshots prices+allocation.
    pub fn record_round(&mut self) {
        self.round += 1;
        self.history.push(RoundRecord {
            round: self.round,
            prices: self.prices(),
            allocation: self.allocation.clone(),
        });
    }

    /// The sum of assigned agents' valuations under the current allocation.
    pub fn total_valuation(&self) -> f64 {
        self.agents
            .iter()
            .filter_map(|agent| {
                self.assignment_of(agent.id())
                    .map(|bundle| agent.value(&bundle))
            })
            .sum()
    }

    /// The solution value of the current allocation: unallocated reserve mass
    /// plus the sum of assigned agents' valuations.
    pub fn solution_value(&self) -> f64 {
        let reserve: f64 = self
            .slots
            .iter()
            .filter(|slot| slot.assigned().is_none())
            .map(Slot::reserve_price)
            .sum();
        reserve + self.total_valuation()
    }
}
