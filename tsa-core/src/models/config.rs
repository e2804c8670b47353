use crate::models::{AgentId, FixedWorth, SlotValues, Valuation};
use thiserror::Error;

/// The default round cap for an auction run.
pub const DEFAULT_ROUND_CAP: usize = 10_000;

/// A full description of a scenario, sufficient to construct a market.
///
/// This is the exchange format between scenario construction, the CLI and the
/// core: it is plain data, validated once by [`Market::new`].
///
/// [`Market::new`]: crate::models::Market::new
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketConfig {
    /// The number of slots on each resource timeline
    pub slots_per_resource: usize,
    /// The number of identical resource timelines (e.g. 2 for the two-CPU variant)
    #[cfg_attr(feature = "serde", serde(default = "default_resources"))]
    pub resources: usize,
    /// A uniform reserve price applied to every slot
    #[cfg_attr(feature = "serde", serde(default))]
    pub reserve_price: f64,
    /// Per-offset reserve prices overriding the uniform one; mirrored across
    /// timelines, and required to cover a full timeline when present
    #[cfg_attr(feature = "serde", serde(default))]
    pub reserve_prices: Option<Vec<f64>>,
    /// The fixed price increment applied to over-demanded slots each round
    pub epsilon: f64,
    /// The maximum number of rounds before the run is abandoned
    #[cfg_attr(feature = "serde", serde(default = "default_round_cap"))]
    pub round_cap: usize,
    /// The competing jobs
    pub agents: Vec<AgentSpec>,
}

fn default_resources() -> usize {
    1
}

fn default_round_cap() -> usize {
    DEFAULT_ROUND_CAP
}

/// A job in a scenario definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    /// The agent's unique id; ties are always broken toward the smaller id
    pub id: u32,
    /// The last timeline offset at which the job may finish (inclusive)
    pub deadline: usize,
    /// The number of consecutive slots the job needs
    pub length: usize,
    /// The job's valuation over feasible windows
    pub valuation: ValuationSpec,
}

/// The supported valuation shapes for scenario definitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum ValuationSpec {
    /// A fixed worth for any on-time completion
    FixedWorth {
        /// The worth of completing the job
        worth: f64,
    },
    /// Per-offset values summed over the assigned window
    SlotValues {
        /// The value of each timeline offset
        values: Vec<f64>,
    },
}

impl ValuationSpec {
    pub(crate) fn validate(&self, agent: AgentId) -> Result<(), ConfigError> {
        let ok = match self {
            Self::FixedWorth { worth } => worth.is_finite() && *worth >= 0.0,
            Self::SlotValues { values } => {
                values.iter().all(|v| v.is_finite() && *v >= 0.0)
            }
        };
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidValuation(agent))
        }
    }

    pub(crate) fn build(&self) -> Box<dyn Valuation> {
        match self {
            Self::FixedWorth { worth } => Box::new(FixedWorth(*worth)),
            Self::SlotValues { values } => Box::new(SlotValues(values.clone())),
        }
    }
}

/// An enumeration of the ways a scenario definition may be invalid.
///
/// These are rejected before a run starts and never recovered from inside the
/// core. Note that a structurally unsatisfiable agent is *not* a
/// `ConfigError`: it is accepted, warned about, and demands the empty bundle
/// in every round.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// ε must be a positive, finite real
    #[error("epsilon must be positive and finite")]
    InvalidEpsilon,
    /// A market needs at least one slot per timeline
    #[error("market must contain at least one slot per resource timeline")]
    NoSlots,
    /// A market needs at least one resource timeline
    #[error("market must contain at least one resource timeline")]
    NoResources,
    /// The round cap must allow at least one round
    #[error("round cap must be positive")]
    ZeroRoundCap,
    /// Reserve prices must be non-negative, finite reals
    #[error("reserve prices must be non-negative and finite")]
    InvalidReserve,
    /// A per-offset reserve list must cover a full timeline
    #[error("expected {expected} per-offset reserve prices, got {actual}")]
    ReserveLength {
        /// The timeline length
        expected: usize,
        /// The number of reserve prices provided
        actual: usize,
    },
    /// Agents must require at least one slot
    #[error("agent {0} must require at least one slot")]
    ZeroLength(AgentId),
    /// Agent ids must be unique
    #[error("duplicate agent id {0}")]
    DuplicateAgent(AgentId),
    /// Valuation parameters must be non-negative, finite reals
    #[error("agent {0} has a negative or non-finite valuation parameter")]
    InvalidValuation(AgentId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_round_trips_through_json() {
        let config = MarketConfig {
            slots_per_resource: 2,
            resources: 1,
            reserve_price: 0.0,
            reserve_prices: None,
            epsilon: 1.0,
            round_cap: DEFAULT_ROUND_CAP,
            agents: vec![AgentSpec {
                id: 1,
                deadline: 1,
                length: 1,
                valuation: ValuationSpec::SlotValues { values: vec![10.0, 4.0] },
            }],
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MarketConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_defaults_apply_when_omitted() {
        let json = r#"{
            "slots_per_resource": 8,
            "epsilon": 0.25,
            "agents": [
                { "id": 1, "deadline": 3, "length": 2,
                  "valuation": { "kind": "fixed_worth", "worth": 10.0 } }
            ]
        }"#;
        let config: MarketConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.resources, 1);
        assert_eq!(config.round_cap, DEFAULT_ROUND_CAP);
        assert_eq!(config.reserve_price, 0.0);
        assert!(config.reserve_prices.is_none());
    }

    #[test]
    fn test_negative_worth_rejected() {
        let spec = ValuationSpec::FixedWorth { worth: -1.0 };
        assert_eq!(
            spec.validate(AgentId::from(3)),
            Err(ConfigError::InvalidValuation(AgentId::from(3)))
        );
    }
}
