//! Simulated objects.

use crate::brain::Brain;
use crate::entity::{impl_entity, EntityCore};
use crate::master::ApprenticeModule;
use crate::request::Request;
use crate::scene::Scene;

/// An object. Child of a scene, optionally driven by one brain of that
/// scene.
#[derive(Debug)]
pub struct Object {
    pub(crate) core: EntityCore,
    pub(crate) master: ApprenticeModule,
}

impl Object {
    pub(crate) fn new(core: EntityCore) -> Self {
        Self {
            core,
            master: ApprenticeModule::unbound(),
        }
    }

    /// The relationship edge to the driving brain.
    pub fn apprentice_module(&self) -> &ApprenticeModule {
        &self.master
    }
}

impl_entity!(Object, Object);

/// Creation parameters for an [`Object`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectStruct {
    /// Name in the universe registry.
    pub global_name: String,
    /// Name in the parent scene's registry.
    pub local_name: String,
    /// Owning scene.
    pub parent: Request<Scene>,
    /// Driving brain. Must belong to the same scene as `parent`.
    pub brain: Request<Brain>,
}
