//! Fixed-capacity slot storage.
//!
//! A [`Storage`] is a pre-sized `Vec` of slots for one value type with a
//! queue of free slot indices. It never grows or shrinks after creation,
//! so the slot buffer stays where it was first placed for the life of the
//! storage.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use lineage_core::SlotHandle;

use crate::error::ArenaError;

/// Contents of one slot.
#[derive(Debug)]
enum Cell<T> {
    Free,
    Reserved,
    Occupied(T),
}

#[derive(Debug)]
struct Slot<T> {
    /// Bumped every time an occupant is destroyed.
    generation: u32,
    cell: Cell<T>,
}

/// A fixed-capacity chunk of slots for one value type.
///
/// Slot selection always takes the lowest free index. Indices below
/// `high_water` have been handed out at least once; indices at or above
/// it have never been touched and are used only when the free queue is
/// empty.
#[derive(Debug)]
pub struct Storage<T> {
    storage_index: u32,
    slots: Vec<Slot<T>>,
    /// Freed slot indices, lowest first.
    free_slot_ids: BinaryHeap<Reverse<u32>>,
    high_water: u32,
    /// Reserved + occupied slots.
    in_use: u32,
    /// Occupied slots only.
    number_of_instances: u32,
}

impl<T> Storage<T> {
    /// Create a storage with `capacity` free slots.
    pub fn new(storage_index: u32, capacity: u32) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                cell: Cell::Free,
            })
            .collect();
        Self {
            storage_index,
            slots,
            free_slot_ids: BinaryHeap::new(),
            high_water: 0,
            in_use: 0,
            number_of_instances: 0,
        }
    }

    /// Reserve the lowest free slot, or `None` if the storage is full.
    pub fn allocate(&mut self) -> Option<u32> {
        let slot_index = if let Some(Reverse(index)) = self.free_slot_ids.pop() {
            index
        } else if (self.high_water as usize) < self.slots.len() {
            let index = self.high_water;
            self.high_water += 1;
            index
        } else {
            return None;
        };
        let slot = &mut self.slots[slot_index as usize];
        debug_assert!(matches!(slot.cell, Cell::Free));
        slot.cell = Cell::Reserved;
        self.in_use += 1;
        Some(slot_index)
    }

    /// Move `value` into a reserved slot, returning the slot generation.
    pub fn construct_in_place(&mut self, slot_index: u32, value: T) -> Result<u32, ArenaError> {
        let storage_index = self.storage_index;
        let slot = self
            .slots
            .get_mut(slot_index as usize)
            .filter(|s| matches!(s.cell, Cell::Reserved))
            .ok_or(ArenaError::NotReserved {
                storage_index,
                slot_index,
            })?;
        slot.cell = Cell::Occupied(value);
        self.number_of_instances += 1;
        Ok(slot.generation)
    }

    /// Return a reserved but never constructed slot to the free queue.
    ///
    /// Returns `false` if the slot was not reserved.
    pub fn release(&mut self, slot_index: u32) -> bool {
        match self.slots.get_mut(slot_index as usize) {
            Some(slot) if matches!(slot.cell, Cell::Reserved) => {
                slot.cell = Cell::Free;
                self.free_slot_ids.push(Reverse(slot_index));
                self.in_use -= 1;
                true
            }
            _ => false,
        }
    }

    /// Evict the occupant of `slot_index` if its generation matches.
    ///
    /// Bumps the slot generation and queues the slot for reuse. A stale
    /// generation or an unoccupied slot is a no-op returning `None`.
    pub fn destroy(&mut self, slot_index: u32, generation: u32) -> Option<T> {
        let slot = self.slots.get_mut(slot_index as usize)?;
        if slot.generation != generation || !matches!(slot.cell, Cell::Occupied(_)) {
            return None;
        }
        let Cell::Occupied(value) = std::mem::replace(&mut slot.cell, Cell::Free) else {
            return None;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slot_ids.push(Reverse(slot_index));
        self.in_use -= 1;
        self.number_of_instances -= 1;
        Some(value)
    }

    /// Shared access to a live occupant.
    pub fn get(&self, slot_index: u32, generation: u32) -> Option<&T> {
        match self.slots.get(slot_index as usize)? {
            Slot {
                generation: g,
                cell: Cell::Occupied(value),
            } if *g == generation => Some(value),
            _ => None,
        }
    }

    /// Mutable access to a live occupant.
    pub fn get_mut(&mut self, slot_index: u32, generation: u32) -> Option<&mut T> {
        match self.slots.get_mut(slot_index as usize)? {
            Slot {
                generation: g,
                cell: Cell::Occupied(value),
            } if *g == generation => Some(value),
            _ => None,
        }
    }

    /// Current generation of a slot, or `None` if out of range.
    pub fn generation_of(&self, slot_index: u32) -> Option<u32> {
        self.slots.get(slot_index as usize).map(|s| s.generation)
    }

    /// Iterate over live occupants in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotHandle, &T)> + '_ {
        let storage_index = self.storage_index;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| match &slot.cell {
                Cell::Occupied(value) => Some((
                    SlotHandle::new(storage_index, i as u32, slot.generation),
                    value,
                )),
                _ => None,
            })
    }

    /// Position of this storage in its allocator's chain.
    pub fn storage_index(&self) -> u32 {
        self.storage_index
    }

    /// Number of constructed occupants.
    pub fn number_of_instances(&self) -> u32 {
        self.number_of_instances
    }

    /// Total slot count.
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Whether every slot is reserved or occupied.
    pub fn is_full(&self) -> bool {
        self.in_use as usize >= self.slots.len()
    }
}
