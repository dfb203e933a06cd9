//! State shared by every slot-allocated entity.

use lineage_arena::{Constructible, ConstructibleRecord};
use lineage_core::{ChildId, EntityId, EntityType};

use crate::parent::ChildModule;

/// Identity, names and ownership edge of one entity.
#[derive(Clone, Debug)]
pub struct EntityCore {
    pub(crate) record: ConstructibleRecord,
    entity_id: EntityId,
    pub(crate) global_name: String,
    pub(crate) local_name: String,
    pub(crate) child: ChildModule,
}

impl EntityCore {
    pub(crate) fn new(record: ConstructibleRecord) -> Self {
        Self {
            record,
            entity_id: EntityId::next(),
            global_name: String::new(),
            local_name: String::new(),
            child: ChildModule::unbound(),
        }
    }

    /// Where the entity lives.
    pub fn record(&self) -> &ConstructibleRecord {
        &self.record
    }

    /// Process-unique identity.
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Name in the universe registry, or `""`.
    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    /// Name in the parent's registry, or `""`.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// The ownership edge.
    pub fn child_module(&self) -> &ChildModule {
        &self.child
    }

    /// Index within the parent's child vector.
    pub fn child_id(&self) -> ChildId {
        self.child.child_id()
    }
}

/// A slot-allocated entity kind.
pub trait Entity: EntityType + Constructible {
    /// Shared entity state.
    fn core(&self) -> &EntityCore;

    /// Mutable shared entity state.
    fn core_mut(&mut self) -> &mut EntityCore;
}

macro_rules! impl_entity {
    ($ty:ty, $kind:ident) => {
        impl lineage_core::EntityType for $ty {
            const KIND: lineage_core::EntityKind = lineage_core::EntityKind::$kind;
        }

        impl lineage_arena::Constructible for $ty {
            fn record(&self) -> &lineage_arena::ConstructibleRecord {
                self.core.record()
            }

            fn record_mut(&mut self) -> &mut lineage_arena::ConstructibleRecord {
                &mut self.core.record
            }
        }

        impl $crate::entity::Entity for $ty {
            fn core(&self) -> &$crate::entity::EntityCore {
                &self.core
            }

            fn core_mut(&mut self) -> &mut $crate::entity::EntityCore {
                &mut self.core
            }
        }
    };
}

pub(crate) use impl_entity;
