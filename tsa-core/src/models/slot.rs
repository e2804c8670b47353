use crate::models::{AgentId, SlotIndex};

/// An atomic, indivisible unit of resource-time.
///
/// A slot's identity (`index`, `resource`, `offset`) is immutable; its price
/// and assignment are owned by the auction engine for the duration of a run.
/// The price starts at the slot's reserve and only ever moves upward.
#[derive(Debug, Clone)]
pub struct Slot {
    index: SlotIndex,
    resource: usize,
    offset: usize,
    reserve_price: f64,
    pub(crate) price: f64,
    pub(crate) assigned: Option<AgentId>,
}

impl Slot {
    pub(crate) fn new(index: SlotIndex, resource: usize, offset: usize, reserve_price: f64) -> Self {
        Self {
            index,
            resource,
            offset,
            reserve_price,
            price: reserve_price,
            assigned: None,
        }
    }

    /// The slot's position in the global ordering.
    pub fn index(&self) -> SlotIndex {
        self.index
    }

    /// The resource timeline this slot belongs to.
    pub fn resource(&self) -> usize {
        self.resource
    }

    /// The slot's position within its resource timeline.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The minimum price the resource owner accepts for this slot.
    pub fn reserve_price(&self) -> f64 {
        self.reserve_price
    }

    /// The slot's current price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// The agent currently holding this slot, if any.
    pub fn assigned(&self) -> Option<AgentId> {
        self.assigned
    }
}
