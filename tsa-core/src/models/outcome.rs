use crate::models::{AgentId, Bundle, SlotIndex};
use crate::Map;

/// How an auction run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuctionStatus {
    /// A round produced a conflict-free, demand-consistent allocation.
    Converged,
    /// The round cap was reached first; the reported allocation is
    /// best-effort and must be treated as non-equilibrium.
    RoundCapExceeded,
}

/// A snapshot of the market at the end of one auction round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    /// The 1-based round counter
    pub round: usize,
    /// The price vector after this round's adjustments
    pub prices: Vec<f64>,
    /// The (possibly partial) provisional allocation for this round
    pub allocation: Map<AgentId, Option<Bundle>>,
}

/// The result of running an ascending auction to termination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionOutcome {
    /// How the run terminated
    pub status: AuctionStatus,
    /// The number of rounds executed, including the terminal one
    pub rounds_used: usize,
    /// The final price vector, one entry per slot
    pub prices: Vec<f64>,
    /// The final allocation; every agent appears, unassigned ones as `None`
    pub allocation: Map<AgentId, Option<Bundle>>,
    /// One record per executed round, in order
    pub history: Vec<RoundRecord>,
}

/// A specific way in which a terminal state fails the equilibrium conditions.
///
/// The verifier reports these rather than an opaque boolean so that
/// non-converged runs can be diagnosed precisely.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind")
)]
pub enum Violation {
    /// An agent's assigned bundle has negative utility at final prices.
    NegativeSurplus {
        /// The agent holding the loss-making bundle
        agent: AgentId,
    },
    /// An agent's outcome is not in its demand set at final prices: some
    /// feasible bundle (or non-assignment) would be strictly better.
    ImprovingDeviation {
        /// The agent with an improving deviation
        agent: AgentId,
    },
    /// A slot is wanted by more agents than the allocation can satisfy.
    OverDemand {
        /// The contested slot
        slot: SlotIndex,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeSurplus { agent } => {
                write!(f, "agent {agent} holds a bundle with negative surplus")
            }
            Self::ImprovingDeviation { agent } => {
                write!(f, "agent {agent} has an improving deviation from its assignment")
            }
            Self::OverDemand { slot } => {
                write!(f, "slot {slot} is over-demanded at final prices")
            }
        }
    }
}

/// The verdict of the equilibrium audit over a terminal market state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquilibriumReport {
    /// Whether the allocation and prices form a competitive equilibrium
    pub passed: bool,
    /// Every violated condition, in deterministic order; empty iff `passed`
    pub violations: Vec<Violation>,
}
