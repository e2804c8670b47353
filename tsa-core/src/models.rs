mod agent;
mod bundle;
mod config;
mod market;
mod outcome;
mod slot;
mod valuation;

pub use agent::Agent;
pub use bundle::Bundle;
pub use config::{AgentSpec, ConfigError, MarketConfig, ValuationSpec, DEFAULT_ROUND_CAP};
pub use market::{Layout, Market};
pub use outcome::{
    AuctionOutcome, AuctionStatus, EquilibriumReport, RoundRecord, Violation,
};
pub use slot::Slot;
pub use valuation::{FixedWorth, SlotValues, Valuation};

/// Tolerance for floating-point comparisons of prices and surpluses.
///
/// Prices are sums of an initial reserve plus ε-increments, so the error is a
/// handful of ulps; anything within this band is treated as equal.
pub const TOLERANCE: f64 = 1e-9;

macro_rules! index_wrapper {
    ($struct:ident, $inner:ty) => {
        /// A newtype wrapper around a primitive index
        #[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $struct($inner);

        impl From<$inner> for $struct {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for $inner {
            fn from(value: $struct) -> $inner {
                value.0
            }
        }

        impl std::ops::Deref for $struct {
            type Target = $inner;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

index_wrapper!(AgentId, u32);
index_wrapper!(SlotIndex, usize);
