//! Chained allocator: the sole construction and destruction path for one
//! value type.
//!
//! The allocator owns a growing chain of [`Storage`]s. New values go into
//! the first storage (lowest index) with a free slot; when every storage
//! is full a new one is appended. Storages are never removed, so a storage
//! index stays valid for the life of the allocator.

use lineage_core::SlotHandle;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::record::{Constructible, ConstructibleRecord};
use crate::storage::Storage;

/// A reserved but not yet constructed slot.
///
/// Returned by [`Allocator::allocate`]. The address already knows the
/// generation the value will be built with, so [`SlotAddress::record`]
/// can be embedded in the value before it is moved into the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct SlotAddress {
    /// Storage index within the chain.
    pub storage_index: u32,
    /// Slot index within the storage.
    pub slot_index: u32,
    /// Slot generation at reservation time.
    pub generation: u32,
}

impl SlotAddress {
    /// The record a value constructed at this address will carry.
    pub fn record(&self) -> ConstructibleRecord {
        ConstructibleRecord::new(self.storage_index, self.slot_index, self.generation)
    }
}

/// Owner of the storage chain for one value type.
#[derive(Debug)]
pub struct Allocator<T> {
    storages: Vec<Storage<T>>,
    config: ArenaConfig,
}

impl<T: Constructible> Allocator<T> {
    /// Create an empty allocator. No storage is created until the first
    /// allocation.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::ZeroCapacity`] if `config.slots_per_storage`
    /// is zero, or [`ArenaError::CapacityExceeded`] if the chain may hold
    /// no storages at all.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self {
            storages: Vec::new(),
            config,
        })
    }

    /// The configuration this allocator was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Reserve the first free slot across the chain, growing it if needed.
    pub fn allocate(&mut self) -> Result<SlotAddress, ArenaError> {
        for storage in self.storages.iter_mut() {
            if storage.is_full() {
                continue;
            }
            if let Some(slot_index) = storage.allocate() {
                return Ok(Self::address(storage, slot_index));
            }
        }

        if self.storages.len() >= self.config.max_storages as usize {
            return Err(ArenaError::CapacityExceeded {
                storages: self.storages.len() as u32,
                slots_per_storage: self.config.slots_per_storage,
            });
        }

        let storage_index = self.storages.len() as u32;
        tracing::debug!(
            storage_index,
            slots = self.config.slots_per_storage,
            "appending storage"
        );
        let mut storage = Storage::new(storage_index, self.config.slots_per_storage);
        let slot_index = storage.allocate().ok_or(ArenaError::ZeroCapacity)?;
        let address = Self::address(&storage, slot_index);
        self.storages.push(storage);
        Ok(address)
    }

    fn address(storage: &Storage<T>, slot_index: u32) -> SlotAddress {
        SlotAddress {
            storage_index: storage.storage_index(),
            slot_index,
            generation: storage.generation_of(slot_index).unwrap_or(0),
        }
    }

    /// Move `value` into a previously reserved slot.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::NotReserved`] if `address` is not a live
    /// reservation of this allocator.
    pub fn construct_in_place(
        &mut self,
        address: SlotAddress,
        value: T,
    ) -> Result<ConstructibleRecord, ArenaError> {
        let not_reserved = ArenaError::NotReserved {
            storage_index: address.storage_index,
            slot_index: address.slot_index,
        };
        let storage = self
            .storages
            .get_mut(address.storage_index as usize)
            .ok_or_else(|| not_reserved.clone())?;
        if storage.generation_of(address.slot_index) != Some(address.generation) {
            return Err(not_reserved);
        }
        let generation = storage.construct_in_place(address.slot_index, value)?;
        Ok(ConstructibleRecord::new(
            address.storage_index,
            address.slot_index,
            generation,
        ))
    }

    /// Reserve a slot and build a value in it from its own record.
    pub fn build_in(
        &mut self,
        build: impl FnOnce(ConstructibleRecord) -> T,
    ) -> Result<ConstructibleRecord, ArenaError> {
        let address = self.allocate()?;
        self.construct_in_place(address, build(address.record()))
    }

    /// Give back a reservation that was never constructed.
    ///
    /// Returns `false` if `address` was not reserved.
    pub fn release(&mut self, address: SlotAddress) -> bool {
        self.storages
            .get_mut(address.storage_index as usize)
            .is_some_and(|storage| storage.release(address.slot_index))
    }

    /// Evict the value named by `handle` and return it with its record
    /// marked dead.
    ///
    /// A stale or already destroyed handle is a no-op returning `None`.
    ///
    /// # Panics
    ///
    /// Panics if `handle.storage_index` is outside the chain.
    pub fn destroy(&mut self, handle: SlotHandle) -> Option<T> {
        let storage = self.storage_mut(handle.storage_index);
        let mut value = storage.destroy(handle.slot_index, handle.generation)?;
        value.record_mut().mark_dead();
        Some(value)
    }

    /// Destroy through a record. Dead records are a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the record's storage index is outside the chain.
    pub fn destroy_record(&mut self, record: &ConstructibleRecord) -> Option<T> {
        if !record.is_alive() {
            return None;
        }
        self.destroy(record.handle())
    }

    fn storage_mut(&mut self, storage_index: u32) -> &mut Storage<T> {
        let chain_len = self.storages.len();
        match self.storages.get_mut(storage_index as usize) {
            Some(storage) => storage,
            None => panic!(
                "storage index {storage_index} outside allocator chain of length {chain_len}"
            ),
        }
    }

    fn storage(&self, storage_index: u32) -> &Storage<T> {
        match self.storages.get(storage_index as usize) {
            Some(storage) => storage,
            None => panic!(
                "storage index {storage_index} outside allocator chain of length {}",
                self.storages.len()
            ),
        }
    }

    /// Shared access to a live value.
    ///
    /// # Panics
    ///
    /// Panics if `handle.storage_index` is outside the chain.
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.storage(handle.storage_index)
            .get(handle.slot_index, handle.generation)
    }

    /// Mutable access to a live value.
    ///
    /// # Panics
    ///
    /// Panics if `handle.storage_index` is outside the chain.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        self.storage_mut(handle.storage_index)
            .get_mut(handle.slot_index, handle.generation)
    }

    /// Whether `handle` names a live value. Never panics.
    pub fn is_alive(&self, handle: SlotHandle) -> bool {
        self.storages
            .get(handle.storage_index as usize)
            .and_then(|s| s.get(handle.slot_index, handle.generation))
            .is_some()
    }

    /// The record of a live value.
    pub fn record_of(&self, handle: SlotHandle) -> Option<ConstructibleRecord> {
        self.get(handle).map(|value| *value.record())
    }

    /// Iterate over live values in storage order, then slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> + '_ {
        self.storages.iter().flat_map(|storage| storage.iter())
    }

    /// Handles of all live values, in iteration order.
    pub fn handles(&self) -> Vec<SlotHandle> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Number of storages in the chain.
    pub fn number_of_storages(&self) -> usize {
        self.storages.len()
    }

    /// Number of live values across the chain.
    pub fn number_of_instances(&self) -> usize {
        self.storages
            .iter()
            .map(|s| s.number_of_instances() as usize)
            .sum()
    }

    /// Total slot count across the chain.
    pub fn capacity(&self) -> usize {
        self.storages.len() * self.config.slots_per_storage as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget {
        record: ConstructibleRecord,
        label: u32,
    }

    impl Constructible for Widget {
        fn record(&self) -> &ConstructibleRecord {
            &self.record
        }
        fn record_mut(&mut self) -> &mut ConstructibleRecord {
            &mut self.record
        }
    }

    fn allocator(slots: u32) -> Allocator<Widget> {
        Allocator::new(ArenaConfig::new(slots)).unwrap()
    }

    fn build(alloc: &mut Allocator<Widget>, label: u32) -> SlotHandle {
        alloc
            .build_in(|record| Widget { record, label })
            .unwrap()
            .handle()
    }

    #[test]
    fn zero_capacity_rejected_at_construction() {
        let err = Allocator::<Widget>::new(ArenaConfig::new(0)).unwrap_err();
        assert_eq!(err, ArenaError::ZeroCapacity);
    }

    #[test]
    fn first_allocation_creates_storage() {
        let mut alloc = allocator(4);
        assert_eq!(alloc.number_of_storages(), 0);
        let h = build(&mut alloc, 1);
        assert_eq!(alloc.number_of_storages(), 1);
        assert_eq!(h, SlotHandle::new(0, 0, 0));
    }

    #[test]
    fn chain_grows_when_full() {
        let mut alloc = allocator(2);
        build(&mut alloc, 1);
        build(&mut alloc, 2);
        let third = build(&mut alloc, 3);
        assert_eq!(alloc.number_of_storages(), 2);
        assert_eq!(third.storage_index, 1);
        assert_eq!(alloc.capacity(), 4);
    }

    #[test]
    fn freed_slot_reused_before_growth() {
        let mut alloc = allocator(2);
        let a = build(&mut alloc, 1);
        build(&mut alloc, 2);
        alloc.destroy(a).unwrap();
        let c = build(&mut alloc, 3);
        assert_eq!(alloc.number_of_storages(), 1);
        assert_eq!(c.slot_index, a.slot_index);
        assert_ne!(c.generation, a.generation);
    }

    #[test]
    fn earlier_storage_preferred() {
        let mut alloc = allocator(1);
        let a = build(&mut alloc, 1);
        build(&mut alloc, 2);
        build(&mut alloc, 3);
        alloc.destroy(a).unwrap();
        let d = build(&mut alloc, 4);
        assert_eq!(d.storage_index, 0);
        assert_eq!(alloc.number_of_storages(), 3);
    }

    #[test]
    fn max_storages_caps_growth() {
        let mut alloc =
            Allocator::<Widget>::new(ArenaConfig::new(1).with_max_storages(2)).unwrap();
        build(&mut alloc, 1);
        build(&mut alloc, 2);
        let err = alloc.build_in(|record| Widget { record, label: 3 }).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                storages: 2,
                slots_per_storage: 1
            }
        );
    }

    #[test]
    fn destroy_marks_record_dead() {
        let mut alloc = allocator(4);
        let h = build(&mut alloc, 7);
        let widget = alloc.destroy(h).unwrap();
        assert_eq!(widget.label, 7);
        assert!(!widget.record.is_alive());
        assert!(!alloc.is_alive(h));
        assert!(alloc.get(h).is_none());
    }

    #[test]
    fn destroying_dead_record_is_noop() {
        let mut alloc = allocator(4);
        let h = build(&mut alloc, 7);
        let widget = alloc.destroy(h).unwrap();
        assert!(alloc.destroy_record(&widget.record).is_none());
        assert!(alloc.destroy(h).is_none());
    }

    #[test]
    fn stale_handle_does_not_alias_new_occupant() {
        let mut alloc = allocator(1);
        let old = build(&mut alloc, 1);
        alloc.destroy(old).unwrap();
        let new = build(&mut alloc, 2);
        assert!(alloc.get(old).is_none());
        assert!(alloc.destroy(old).is_none());
        assert_eq!(alloc.get(new).map(|w| w.label), Some(2));
    }

    #[test]
    #[should_panic(expected = "outside allocator chain")]
    fn destroy_with_foreign_storage_index_panics() {
        let mut alloc = allocator(1);
        build(&mut alloc, 1);
        let _ = alloc.destroy(SlotHandle::new(9, 0, 0));
    }

    #[test]
    fn is_alive_tolerates_foreign_storage_index() {
        let alloc = allocator(1);
        assert!(!alloc.is_alive(SlotHandle::new(3, 0, 0)));
    }

    #[test]
    fn two_phase_construction() {
        let mut alloc = allocator(2);
        let address = alloc.allocate().unwrap();
        let record = alloc
            .construct_in_place(
                address,
                Widget {
                    record: address.record(),
                    label: 5,
                },
            )
            .unwrap();
        assert_eq!(record, address.record());
        assert_eq!(alloc.record_of(record.handle()), Some(record));
    }

    #[test]
    fn construct_twice_at_same_address_fails() {
        let mut alloc = allocator(2);
        let address = alloc.allocate().unwrap();
        let widget = |label| Widget {
            record: address.record(),
            label,
        };
        alloc.construct_in_place(address, widget(1)).unwrap();
        assert!(matches!(
            alloc.construct_in_place(address, widget(2)),
            Err(ArenaError::NotReserved { .. })
        ));
    }

    #[test]
    fn released_reservation_is_reused() {
        let mut alloc = allocator(2);
        let address = alloc.allocate().unwrap();
        assert!(alloc.release(address));
        assert!(!alloc.release(address));
        let again = alloc.allocate().unwrap();
        assert_eq!(again, address);
    }

    #[test]
    fn iter_walks_storages_in_order() {
        let mut alloc = allocator(2);
        for label in 0..5 {
            build(&mut alloc, label);
        }
        let labels: Vec<_> = alloc.iter().map(|(_, w)| w.label).collect();
        assert_eq!(labels, vec![0, 1, 2, 3, 4]);
        assert_eq!(alloc.handles().len(), 5);
        assert_eq!(alloc.number_of_instances(), 5);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_count_never_exceeds_capacity(
                ops in proptest::collection::vec(any::<bool>(), 1..200),
                slots in 1u32..8,
            ) {
                let mut alloc = allocator(slots);
                let mut live: Vec<SlotHandle> = Vec::new();
                for (i, build_op) in ops.iter().enumerate() {
                    if *build_op || live.is_empty() {
                        live.push(build(&mut alloc, i as u32));
                    } else {
                        let h = live.remove(i % live.len());
                        prop_assert!(alloc.destroy(h).is_some());
                    }
                    prop_assert_eq!(alloc.number_of_instances(), live.len());
                    prop_assert!(alloc.number_of_instances() <= alloc.capacity());
                }
            }

            #[test]
            fn storage_grows_only_when_every_slot_is_taken(
                ops in proptest::collection::vec(any::<bool>(), 1..200),
            ) {
                let slots = 4u32;
                let mut alloc = allocator(slots);
                let mut live: Vec<SlotHandle> = Vec::new();
                for (i, build_op) in ops.iter().enumerate() {
                    if *build_op || live.is_empty() {
                        let before = alloc.number_of_storages();
                        let full = alloc.number_of_instances() == alloc.capacity();
                        live.push(build(&mut alloc, i as u32));
                        if !full {
                            prop_assert_eq!(alloc.number_of_storages(), before);
                        }
                    } else {
                        let h = live.swap_remove(i % live.len());
                        alloc.destroy(h);
                    }
                }
                let min_storages = live.len().div_ceil(slots as usize);
                prop_assert!(alloc.number_of_storages() >= min_storages);
            }

            #[test]
            fn destroyed_handles_stay_dead(
                count in 1usize..40,
                kill in proptest::collection::vec(any::<bool>(), 40),
            ) {
                let mut alloc = allocator(3);
                let handles: Vec<_> = (0..count).map(|i| build(&mut alloc, i as u32)).collect();
                let mut dead = Vec::new();
                for (h, k) in handles.iter().zip(kill.iter()) {
                    if *k {
                        alloc.destroy(*h);
                        dead.push(*h);
                    }
                }
                for i in 0..count {
                    build(&mut alloc, (count + i) as u32);
                }
                for h in dead {
                    prop_assert!(!alloc.is_alive(h));
                }
            }
        }
    }
}
