use crate::models::Bundle;

/// A pluggable valuation over feasible bundles.
///
/// Implementations map a feasible bundle to a non-negative value; infeasible
/// bundles are never passed in, so their value is simply undefined. Keeping
/// this behind a trait lets book-example jobs, per-slot-value jobs, and
/// randomized jobs share one demand computation.
pub trait Valuation: std::fmt::Debug + Send + Sync {
    /// The value of completing the job in the given bundle.
    fn value(&self, bundle: &Bundle) -> f64;
}

/// The textbook valuation: a fixed worth for any on-time completion.
///
/// The job is worth the same no matter which feasible window it runs in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWorth(pub f64);

impl Valuation for FixedWorth {
    fn value(&self, _bundle: &Bundle) -> f64 {
        self.0
    }
}

/// A per-offset valuation, summed over the bundle's timeline offsets.
///
/// Offsets index positions within a timeline, so on a multi-resource market
/// the same time-of-day is worth the same on every resource. Offsets beyond
/// the table are worth nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotValues(pub Vec<f64>);

impl Valuation for SlotValues {
    fn value(&self, bundle: &Bundle) -> f64 {
        bundle
            .offsets()
            .map(|offset| self.0.get(offset).copied().unwrap_or_default())
            .sum()
    }
}
