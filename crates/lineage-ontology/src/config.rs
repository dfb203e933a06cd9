//! Universe configuration.

use lineage_arena::ArenaConfig;
use lineage_core::EntityKind;

use crate::error::OntologyError;

/// Per-kind storage sizing for a [`Universe`](crate::Universe).
///
/// Each entity kind gets its own allocator. Validated by
/// [`Universe::new`](crate::Universe::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniverseConfig {
    /// Allocator for scenes. Default: 16 slots per storage.
    pub scenes: ArenaConfig,
    /// Allocator for cameras. Default: 64 slots per storage.
    pub cameras: ArenaConfig,
    /// Allocator for brains. Default: 64 slots per storage.
    pub brains: ArenaConfig,
    /// Allocator for objects. Default: 256 slots per storage.
    pub objects: ArenaConfig,
}

impl UniverseConfig {
    /// Default slots per scene storage.
    pub const DEFAULT_SCENE_SLOTS: u32 = 16;
    /// Default slots per camera or brain storage.
    pub const DEFAULT_COMPONENT_SLOTS: u32 = 64;

    /// Use the same storage size for every kind.
    pub fn uniform(slots_per_storage: u32) -> Self {
        let arena = ArenaConfig::new(slots_per_storage);
        Self {
            scenes: arena.clone(),
            cameras: arena.clone(),
            brains: arena.clone(),
            objects: arena,
        }
    }

    /// The allocator config for one kind, or `None` for the universe.
    pub fn arena_for(&self, kind: EntityKind) -> Option<&ArenaConfig> {
        match kind {
            EntityKind::Universe => None,
            EntityKind::Scene => Some(&self.scenes),
            EntityKind::Camera => Some(&self.cameras),
            EntityKind::Brain => Some(&self.brains),
            EntityKind::Object => Some(&self.objects),
        }
    }

    /// Check every per-kind allocator config.
    pub fn validate(&self) -> Result<(), OntologyError> {
        for kind in [
            EntityKind::Scene,
            EntityKind::Camera,
            EntityKind::Brain,
            EntityKind::Object,
        ] {
            if let Some(arena) = self.arena_for(kind) {
                arena.validate().map_err(OntologyError::arena(kind))?;
            }
        }
        Ok(())
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            scenes: ArenaConfig::new(Self::DEFAULT_SCENE_SLOTS),
            cameras: ArenaConfig::new(Self::DEFAULT_COMPONENT_SLOTS),
            brains: ArenaConfig::new(Self::DEFAULT_COMPONENT_SLOTS),
            objects: ArenaConfig::default(),
        }
    }
}
