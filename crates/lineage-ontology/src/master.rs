//! Non-owning relationship edges: master and apprentice modules.
//!
//! Same index discipline as [`parent`](crate::parent), but neither side
//! owns the other. Destroying a master clears the master reference of
//! every apprentice it still holds; destroying an apprentice only frees
//! its index in the master.

use lineage_core::{AnyHandle, ChildId};

use crate::hierarchy::ChildSlots;

/// Master side: the apprentices currently bound.
#[derive(Clone, Debug, Default)]
pub struct MasterModule {
    apprentices: ChildSlots<AnyHandle>,
}

impl MasterModule {
    /// A master with no apprentices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `apprentice` at the lowest free index.
    pub fn bind_apprentice(&mut self, apprentice: AnyHandle) -> ChildId {
        self.apprentices.bind(apprentice)
    }

    /// Forget the apprentice at `id`. Already unbound ids are a no-op.
    pub fn unbind_apprentice(&mut self, id: ChildId) -> Option<AnyHandle> {
        self.apprentices.unbind(id)
    }

    /// The apprentice at `id`.
    pub fn get_apprentice(&self, id: ChildId) -> Option<AnyHandle> {
        self.apprentices.get(id).copied()
    }

    /// Apprentices in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ChildId, AnyHandle)> + '_ {
        self.apprentices.iter().map(|(id, h)| (id, *h))
    }

    /// Number of bound apprentices.
    pub fn number_of_apprentices(&self) -> usize {
        self.apprentices.len()
    }

    /// Unbind every apprentice, yielding each in index order.
    pub(crate) fn unbind_all(&mut self) -> Vec<AnyHandle> {
        self.apprentices.drain().map(|(_, h)| h).collect()
    }
}

/// Apprentice side: the master, if any, and our index in it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApprenticeModule {
    master: Option<AnyHandle>,
    apprentice_id: ChildId,
}

impl ApprenticeModule {
    /// No master.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// The current master.
    pub fn get_master(&self) -> Option<AnyHandle> {
        self.master
    }

    /// Index within the master's apprentice vector.
    pub fn apprentice_id(&self) -> ChildId {
        self.apprentice_id
    }

    /// Whether a master is set.
    pub fn is_bound(&self) -> bool {
        self.master.is_some()
    }

    pub(crate) fn bind(&mut self, master: AnyHandle, apprentice_id: ChildId) {
        self.master = Some(master);
        self.apprentice_id = apprentice_id;
    }

    pub(crate) fn unbind(&mut self) -> Option<(AnyHandle, ChildId)> {
        let master = self.master.take()?;
        let apprentice_id = std::mem::take(&mut self.apprentice_id);
        Some((master, apprentice_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::{EntityKind, SlotHandle};

    fn object(slot: u32) -> AnyHandle {
        AnyHandle::new(EntityKind::Object, SlotHandle::new(0, slot, 0))
    }

    #[test]
    fn unbind_all_leaves_master_empty() {
        let mut master = MasterModule::new();
        master.bind_apprentice(object(0));
        let b = master.bind_apprentice(object(1));
        master.bind_apprentice(object(2));
        master.unbind_apprentice(b);

        assert_eq!(master.unbind_all(), vec![object(0), object(2)]);
        assert_eq!(master.number_of_apprentices(), 0);
    }

    #[test]
    fn apprentice_unbind_is_idempotent() {
        let brain = AnyHandle::new(EntityKind::Brain, SlotHandle::new(0, 0, 0));
        let mut apprentice = ApprenticeModule::unbound();
        apprentice.bind(brain, ChildId(0));
        assert!(apprentice.unbind().is_some());
        assert!(apprentice.unbind().is_none());
        assert_eq!(apprentice.apprentice_id(), ChildId::UNBOUND);
    }

    #[test]
    fn double_unbind_in_master_is_noop() {
        let mut master = MasterModule::new();
        let a = master.bind_apprentice(object(0));
        master.bind_apprentice(object(1));
        assert_eq!(master.unbind_apprentice(a), Some(object(0)));
        assert_eq!(master.unbind_apprentice(a), None);
        assert_eq!(master.number_of_apprentices(), 1);
    }
}
