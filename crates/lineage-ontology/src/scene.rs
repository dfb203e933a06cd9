//! Scenes: direct children of the universe and owners of everything
//! scene-scoped.

use crate::entity::{impl_entity, EntityCore};
use crate::parent::ParentModule;
use crate::registry::Registry;

/// A scene.
///
/// Owns cameras, brains and objects through one child vector, and holds
/// the registry their local names live in.
#[derive(Debug)]
pub struct Scene {
    pub(crate) core: EntityCore,
    pub(crate) children: ParentModule,
    pub(crate) registry: Registry,
}

impl Scene {
    pub(crate) fn new(core: EntityCore) -> Self {
        Self {
            core,
            children: ParentModule::new(),
            registry: Registry::new(),
        }
    }

    /// Cameras, brains and objects owned by this scene.
    pub fn children(&self) -> &ParentModule {
        &self.children
    }

    /// Local names of this scene's children.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl_entity!(Scene, Scene);

/// Creation parameters for a [`Scene`].
///
/// Scenes are children of the universe, so at most one of the two names
/// may be given; it becomes both the global and the local name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneStruct {
    /// Name in the universe registry.
    pub global_name: String,
    /// Same registry as `global_name` for universe children.
    pub local_name: String,
}

impl SceneStruct {
    /// A scene registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            global_name: name.into(),
            ..Self::default()
        }
    }
}
