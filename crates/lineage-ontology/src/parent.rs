//! Ownership edges: parent and child modules.
//!
//! A [`ParentModule`] holds the handles of everything its owner owns; a
//! [`ChildModule`] remembers the single owner and the index at which the
//! owner holds it. The two sides are always updated together by the
//! [`Universe`](crate::Universe), which is the only code that can reach
//! both entities at once.

use lineage_core::{AnyHandle, ChildId};

use crate::hierarchy::ChildSlots;

/// Owner side of the ownership edge.
#[derive(Clone, Debug, Default)]
pub struct ParentModule {
    children: ChildSlots<AnyHandle>,
}

impl ParentModule {
    /// A parent with no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `child` at the lowest free index.
    pub fn bind_child(&mut self, child: AnyHandle) -> ChildId {
        self.children.bind(child)
    }

    /// Forget the child at `id`. Unbound ids are a no-op.
    pub fn unbind_child(&mut self, id: ChildId) -> Option<AnyHandle> {
        self.children.unbind(id)
    }

    /// The child at `id`.
    pub fn get_child(&self, id: ChildId) -> Option<AnyHandle> {
        self.children.get(id).copied()
    }

    /// Children in index order.
    pub fn iter(&self) -> impl Iterator<Item = (ChildId, AnyHandle)> + '_ {
        self.children.iter().map(|(id, h)| (id, *h))
    }

    /// Children in index order, collected.
    pub fn children(&self) -> Vec<AnyHandle> {
        self.iter().map(|(_, h)| h).collect()
    }

    /// Number of bound children.
    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }
}

/// Owned side of the ownership edge.
///
/// `parent` is `None` for roots. `child_id` is [`ChildId::UNBOUND`]
/// exactly when `parent` is `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChildModule {
    parent: Option<AnyHandle>,
    child_id: ChildId,
}

impl ChildModule {
    /// A root: no owner.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// The current owner.
    pub fn get_parent(&self) -> Option<AnyHandle> {
        self.parent
    }

    /// Index within the owner's child vector.
    pub fn child_id(&self) -> ChildId {
        self.child_id
    }

    /// Whether an owner is set.
    pub fn is_bound(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn bind(&mut self, parent: AnyHandle, child_id: ChildId) {
        self.parent = Some(parent);
        self.child_id = child_id;
    }

    /// Reset to unbound, returning the previous binding.
    pub(crate) fn unbind(&mut self) -> Option<(AnyHandle, ChildId)> {
        let parent = self.parent.take()?;
        let child_id = std::mem::take(&mut self.child_id);
        Some((parent, child_id))
    }
}
