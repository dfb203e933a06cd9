//! Read-only traversal of the ownership and relationship graph.
//!
//! Queries dispatch on the [`EntityKind`] tag carried by every
//! [`AnyHandle`], so callers can walk the graph without knowing the
//! concrete type of each node. Dead handles, including handles minted by
//! another universe, answer like roots: no parent, no children, no master,
//! no names.

use lineage_core::{AnyHandle, ChildId, EntityId, EntityKind, Handle};
use smallvec::{smallvec, SmallVec};

use crate::brain::Brain;
use crate::camera::Camera;
use crate::object::Object;
use crate::registry::Registry;
use crate::scene::Scene;
use crate::universe::{Member, Universe};

impl Universe {
    /// The owner of `handle`, or `None` for roots, the universe and dead
    /// handles.
    pub fn parent_of(&self, handle: impl Into<AnyHandle>) -> Option<AnyHandle> {
        self.core(handle.into())?.child_module().get_parent()
    }

    /// The nearest scene at or above `handle`.
    ///
    /// A scene is its own scene. Walks parents until a scene is found.
    pub fn scene_of(&self, handle: impl Into<AnyHandle>) -> Option<Handle<Scene>> {
        let mut current = handle.into();
        loop {
            if !self.is_alive(current) {
                return None;
            }
            if let Some(scene) = current.downcast::<Scene>() {
                return Some(scene);
            }
            current = self.parent_of(current)?;
        }
    }

    /// Direct children in child index order.
    pub fn children_of(&self, handle: impl Into<AnyHandle>) -> Vec<AnyHandle> {
        self.parent_module(handle.into())
            .map(|module| module.children())
            .unwrap_or_default()
    }

    /// Number of direct children.
    pub fn number_of_children(&self, handle: impl Into<AnyHandle>) -> usize {
        self.parent_module(handle.into())
            .map_or(0, |module| module.number_of_children())
    }

    /// Number of entities owned directly or transitively.
    pub fn number_of_descendants(&self, handle: impl Into<AnyHandle>) -> usize {
        let mut count = 0;
        let mut stack: SmallVec<[AnyHandle; 8]> = smallvec![handle.into()];
        while let Some(next) = stack.pop() {
            let children = self.children_of(next);
            count += children.len();
            stack.extend(children);
        }
        count
    }

    /// Objects `brain` currently drives, in apprentice index order.
    pub fn apprentices_of(&self, brain: Handle<Brain>) -> Vec<Handle<Object>> {
        self.get(brain)
            .map(|brain| {
                brain
                    .apprentices()
                    .iter()
                    .filter_map(|(_, handle)| handle.downcast::<Object>())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The brain driving `object`.
    pub fn master_of(&self, object: Handle<Object>) -> Option<Handle<Brain>> {
        self.get(object)?
            .apprentice_module()
            .get_master()?
            .downcast::<Brain>()
    }

    /// Global name of a live entity. Empty names read as `None`.
    pub fn global_name_of(&self, handle: impl Into<AnyHandle>) -> Option<&str> {
        Some(self.core(handle.into())?.global_name()).filter(|name| !name.is_empty())
    }

    /// Local name of a live entity. Empty names read as `None`.
    pub fn local_name_of(&self, handle: impl Into<AnyHandle>) -> Option<&str> {
        Some(self.core(handle.into())?.local_name()).filter(|name| !name.is_empty())
    }

    /// Index within the parent's child vector, [`ChildId::UNBOUND`] for
    /// roots and dead handles.
    pub fn child_id_of(&self, handle: impl Into<AnyHandle>) -> ChildId {
        self.core(handle.into())
            .map_or(ChildId::UNBOUND, |core| core.child_id())
    }

    /// Process-unique identity of a live entity or of the universe.
    pub fn entity_id_of(&self, handle: impl Into<AnyHandle>) -> Option<EntityId> {
        let handle = handle.into();
        if handle.is_universe() {
            return Some(self.entity_id());
        }
        self.core(handle).map(|core| core.entity_id())
    }

    /// The local registry of a live scene.
    pub fn scene_registry(&self, scene: Handle<Scene>) -> Option<&Registry> {
        self.get(scene).map(Scene::registry)
    }

    /// Handles of every live entity of `kind`, in storage order.
    pub fn handles_of(&self, kind: EntityKind) -> Vec<AnyHandle> {
        let slots = match kind {
            EntityKind::Universe => return vec![AnyHandle::UNIVERSE],
            EntityKind::Scene => Scene::allocator(self).handles(),
            EntityKind::Camera => Camera::allocator(self).handles(),
            EntityKind::Brain => Brain::allocator(self).handles(),
            EntityKind::Object => Object::allocator(self).handles(),
        };
        slots
            .into_iter()
            .map(|slot| AnyHandle::new(kind, slot))
            .collect()
    }
}
