use crate::models::{Layout, SlotIndex};

/// A contiguous run of slots on a single resource timeline.
///
/// Bundles are the unit of allocation: an agent receives an entire bundle or
/// nothing at all. Utility is only defined over whole bundles, so no component
/// in this workspace ever assigns a strict subset of one.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bundle {
    /// Which resource timeline the run lives on
    pub resource: usize,
    /// The first offset of the run within its timeline
    pub start: usize,
    /// The number of consecutive slots in the run (always positive)
    pub length: usize,
}

impl Bundle {
    /// The last offset of the run within its timeline.
    pub fn end(&self) -> usize {
        self.start + self.length - 1
    }

    /// The timeline offsets covered by this bundle.
    pub fn offsets(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.length
    }

    /// The global slot indices covered by this bundle, given the market layout.
    pub fn slots(&self, layout: &Layout) -> impl Iterator<Item = SlotIndex> {
        let base = self.resource * layout.slots_per_resource;
        self.offsets().map(move |offset| SlotIndex::from(base + offset))
    }

    /// Whether two bundles share any slot.
    pub fn overlaps(&self, other: &Bundle) -> bool {
        self.resource == other.resource
            && self.start <= other.end()
            && other.start <= self.end()
    }

    /// The sum of the given prices over this bundle's slots.
    pub fn cost(&self, prices: &[f64], layout: &Layout) -> f64 {
        self.slots(layout).map(|slot| prices[*slot]).sum()
    }
}

impl std::fmt::Display for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}[{}..={}]", self.resource, self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_same_resource() {
        let a = Bundle { resource: 0, start: 0, length: 2 };
        let b = Bundle { resource: 0, start: 1, length: 2 };
        let c = Bundle { resource: 0, start: 2, length: 1 };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&c));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_no_overlap_across_resources() {
        let a = Bundle { resource: 0, start: 0, length: 4 };
        let b = Bundle { resource: 1, start: 0, length: 4 };
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_global_slots() {
        let layout = Layout { resources: 2, slots_per_resource: 8 };
        let bundle = Bundle { resource: 1, start: 2, length: 3 };
        let slots: Vec<usize> = bundle.slots(&layout).map(|s| *s).collect();
        assert_eq!(slots, vec![10, 11, 12]);
    }
}
