//! Per-object constructible records.

use lineage_core::SlotHandle;

/// Identifies the storage slot an object was built in.
///
/// While `alive` is true the record names exactly one live object. Once the
/// object is destroyed the record is marked dead and its handle goes stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstructibleRecord {
    storage_index: u32,
    slot_index: u32,
    generation: u32,
    alive: bool,
}

impl ConstructibleRecord {
    pub(crate) fn new(storage_index: u32, slot_index: u32, generation: u32) -> Self {
        Self {
            storage_index,
            slot_index,
            generation,
            alive: true,
        }
    }

    /// Index of the storage within the allocator chain.
    pub fn storage_index(&self) -> u32 {
        self.storage_index
    }

    /// Index of the slot within the storage.
    pub fn slot_index(&self) -> u32 {
        self.slot_index
    }

    /// Slot generation when the object was built.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the object has not been destroyed yet.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// The generation-checked handle of the object.
    pub fn handle(&self) -> SlotHandle {
        SlotHandle::new(self.storage_index, self.slot_index, self.generation)
    }

    pub(crate) fn mark_dead(&mut self) {
        self.alive = false;
    }
}

/// Values that carry their own [`ConstructibleRecord`].
///
/// The allocator marks the record dead when it hands a destroyed value
/// back to the caller.
pub trait Constructible {
    /// The record written at construction time.
    fn record(&self) -> &ConstructibleRecord;

    /// Mutable access for the allocator.
    fn record_mut(&mut self) -> &mut ConstructibleRecord;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exposes_handle() {
        let record = ConstructibleRecord::new(2, 7, 5);
        assert!(record.is_alive());
        assert_eq!(record.handle(), SlotHandle::new(2, 7, 5));
    }

    #[test]
    fn mark_dead_keeps_location() {
        let mut record = ConstructibleRecord::new(0, 1, 0);
        record.mark_dead();
        assert!(!record.is_alive());
        assert_eq!(record.slot_index(), 1);
    }
}
