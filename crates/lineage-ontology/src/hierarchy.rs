//! Index-addressed slot vector with free-index reuse.
//!
//! [`ChildSlots`] backs every one-to-many edge in the graph: parent to
//! children, master to apprentices, and (in `lineage-callback`) engine to
//! callback objects and object to parameters. Removing an entry never
//! shifts the others, so a [`ChildId`] stays valid until that entry
//! itself is unbound.
//!
//! # Reuse policy
//!
//! A bind takes the lowest vacated index first and appends only when no
//! gap exists. Unbinding the last index trims every trailing gap, so the
//! vector never ends in an empty slot. Iteration is in index order, which
//! equals bind order only until the first gap is reused.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use lineage_core::ChildId;

/// Index-stable vector of optional entries.
#[derive(Clone, Debug)]
pub struct ChildSlots<T> {
    slots: Vec<Option<T>>,
    /// Vacated indices, lowest first. May hold indices past the end after
    /// a trim; those are discarded lazily.
    free_ids: BinaryHeap<Reverse<usize>>,
    len: usize,
}

impl<T> ChildSlots<T> {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_ids: BinaryHeap::new(),
            len: 0,
        }
    }

    /// Store `value` at the lowest free index and return that index.
    pub fn bind(&mut self, value: T) -> ChildId {
        while let Some(Reverse(index)) = self.free_ids.pop() {
            if index < self.slots.len() {
                debug_assert!(self.slots[index].is_none());
                self.slots[index] = Some(value);
                self.len += 1;
                return ChildId(index);
            }
            // Every remaining id is at least as large, so all are stale.
            self.free_ids.clear();
        }
        self.slots.push(Some(value));
        self.len += 1;
        ChildId(self.slots.len() - 1)
    }

    /// Remove the entry at `id`. Unbound or empty ids are a no-op.
    pub fn unbind(&mut self, id: ChildId) -> Option<T> {
        let index = id.index()?;
        let value = self.slots.get_mut(index)?.take()?;
        self.len -= 1;
        if index + 1 == self.slots.len() {
            while matches!(self.slots.last(), Some(None)) {
                self.slots.pop();
            }
        } else {
            self.free_ids.push(Reverse(index));
        }
        Some(value)
    }

    /// The entry at `id`.
    pub fn get(&self, id: ChildId) -> Option<&T> {
        self.slots.get(id.index()?)?.as_ref()
    }

    /// Mutable access to the entry at `id`.
    pub fn get_mut(&mut self, id: ChildId) -> Option<&mut T> {
        self.slots.get_mut(id.index()?)?.as_mut()
    }

    /// Whether `id` holds an entry.
    pub fn contains(&self, id: ChildId) -> bool {
        self.get(id).is_some()
    }

    /// Occupied entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ChildId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (ChildId(i), value)))
    }

    /// Mutable iteration in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ChildId, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|value| (ChildId(i), value)))
    }

    /// Occupied entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no entry is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the backing vector including gaps.
    pub fn span(&self) -> usize {
        self.slots.len()
    }

    /// The last occupied entry.
    pub fn last(&self) -> Option<&T> {
        self.slots.iter().rev().find_map(Option::as_ref)
    }

    /// Remove every entry, yielding them in index order.
    pub fn drain(&mut self) -> impl Iterator<Item = (ChildId, T)> {
        self.free_ids.clear();
        self.len = 0;
        std::mem::take(&mut self.slots)
            .into_iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|value| (ChildId(i), value)))
    }
}

impl<T> Default for ChildSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<T: Copy>(slots: &ChildSlots<T>) -> Vec<(usize, T)> {
        slots.iter().map(|(id, v)| (id.0, *v)).collect()
    }

    #[test]
    fn binds_append_in_order() {
        let mut slots = ChildSlots::new();
        assert_eq!(slots.bind('a'), ChildId(0));
        assert_eq!(slots.bind('b'), ChildId(1));
        assert_eq!(slots.bind('c'), ChildId(2));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn gap_is_reused_without_moving_neighbours() {
        let mut slots = ChildSlots::new();
        let a = slots.bind('a');
        let b = slots.bind('b');
        let c = slots.bind('c');
        slots.unbind(b);
        let d = slots.bind('d');

        assert_eq!(d, b);
        assert_eq!(slots.get(a), Some(&'a'));
        assert_eq!(slots.get(c), Some(&'c'));
        assert_eq!(ids(&slots), vec![(0, 'a'), (1, 'd'), (2, 'c')]);
    }

    #[test]
    fn lowest_gap_wins() {
        let mut slots = ChildSlots::new();
        let handles: Vec<_> = "abcde".chars().map(|c| slots.bind(c)).collect();
        slots.unbind(handles[3]);
        slots.unbind(handles[1]);
        assert_eq!(slots.bind('x'), ChildId(1));
        assert_eq!(slots.bind('y'), ChildId(3));
        assert_eq!(slots.bind('z'), ChildId(5));
    }

    #[test]
    fn unbinding_last_trims_trailing_gaps() {
        let mut slots = ChildSlots::new();
        let _a = slots.bind('a');
        let b = slots.bind('b');
        let c = slots.bind('c');
        slots.unbind(b);
        slots.unbind(c);
        assert_eq!(slots.span(), 1);
        // The stale free id for `b` must not be handed out past the end.
        assert_eq!(slots.bind('d'), ChildId(1));
        assert_eq!(slots.bind('e'), ChildId(2));
    }

    #[test]
    fn unbind_is_idempotent() {
        let mut slots = ChildSlots::new();
        let a = slots.bind(1);
        assert_eq!(slots.unbind(a), Some(1));
        assert_eq!(slots.unbind(a), None);
        assert_eq!(slots.unbind(ChildId::UNBOUND), None);
        assert!(slots.is_empty());
    }

    #[test]
    fn drain_empties_in_index_order() {
        let mut slots = ChildSlots::new();
        let a = slots.bind('a');
        slots.bind('b');
        slots.unbind(a);
        let drained: Vec<_> = slots.drain().map(|(id, v)| (id.0, v)).collect();
        assert_eq!(drained, vec![(1, 'b')]);
        assert!(slots.is_empty());
        assert_eq!(slots.bind('c'), ChildId(0));
    }

    #[test]
    fn last_skips_gaps() {
        let mut slots = ChildSlots::new();
        slots.bind(1);
        let b = slots.bind(2);
        slots.bind(3);
        assert_eq!(slots.last(), Some(&3));
        slots.unbind(b);
        assert_eq!(slots.last(), Some(&3));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bind_fills_lowest_gap(
                ops in proptest::collection::vec((any::<bool>(), 0usize..32), 1..100),
            ) {
                let mut slots = ChildSlots::new();
                let mut live: Vec<ChildId> = Vec::new();
                for (bind, pick) in ops {
                    if bind || live.is_empty() {
                        let expected = (0..).find(|i| !slots.contains(ChildId(*i))).unwrap();
                        let id = slots.bind(());
                        prop_assert_eq!(id, ChildId(expected));
                        live.push(id);
                    } else {
                        let id = live.swap_remove(pick % live.len());
                        prop_assert!(slots.unbind(id).is_some());
                    }
                    prop_assert_eq!(slots.len(), live.len());
                    // Never ends in a gap.
                    prop_assert!(slots.span() == 0 || slots.contains(ChildId(slots.span() - 1)));
                }
            }

            #[test]
            fn surviving_entries_keep_their_index(
                count in 1usize..30,
                remove in proptest::collection::vec(any::<bool>(), 30),
            ) {
                let mut slots = ChildSlots::new();
                let ids: Vec<_> = (0..count).map(|i| slots.bind(i)).collect();
                for (id, r) in ids.iter().zip(remove.iter()) {
                    if *r {
                        slots.unbind(*id);
                    }
                }
                for (i, id) in ids.iter().enumerate() {
                    if !remove[i] {
                        prop_assert_eq!(slots.get(*id), Some(&i));
                    }
                }
            }
        }
    }
}
