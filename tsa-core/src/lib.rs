#![warn(missing_docs)]
//! Domain models for time-slot scheduling auctions.
//!
//! A market consists of one or more identical resource timelines, each divided
//! into discrete, indivisible time slots, and a set of agents (jobs) that each
//! need a contiguous run of slots finishing by a private deadline. The types in
//! this crate describe that market and the per-agent demand computation; the
//! iterative price-adjustment protocol that clears it lives in `tsa-auction`.

/// Core domain models for the scheduling market.
///
/// These are primarily data structures with the minimal business logic that is
/// intrinsic to them (feasibility, valuation, demand); the round protocol and
/// the equilibrium audit are implemented on top of them elsewhere.
pub mod models;

/// A hash map with deterministic iteration order.
///
/// Determinism of the auction requires that we never iterate agents or slots
/// in an unspecified order, so hash maps in this workspace are index maps.
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
