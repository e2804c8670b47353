#![warn(missing_docs)]
//! An ascending-price auction engine for time-slot scheduling markets.
//!
//! The engine drives a market of discrete time slots and deadline-constrained
//! jobs through an iterative ε-increment protocol: every round it collects
//! each agent's demand at current prices, looks for a conflict-free way to
//! honor all of them, and raises the price of every slot that remains
//! contested. The fixed point — a demand-consistent, conflict-free allocation
//! — is an approximate competitive equilibrium, which [`verify`] audits
//! independently after the fact.
//!
//! The protocol deliberately finds the *auction* outcome, not the
//! welfare-optimal one; the two can differ, and one of the built-in test
//! scenarios demonstrates exactly that.

mod assign;

mod engine;
pub use engine::AscendingAuction;

mod equilibrium;
pub use equilibrium::verify;

mod metrics;
pub use metrics::{epsilon_sweep, RunMetrics};

pub(crate) type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
