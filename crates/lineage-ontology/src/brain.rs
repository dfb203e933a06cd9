//! Brains: per-scene controllers acting on objects they do not own.

use crate::entity::{impl_entity, EntityCore};
use crate::master::MasterModule;
use crate::request::Request;
use crate::scene::Scene;

/// A brain. Child of a scene and master of any number of objects in the
/// same scene.
#[derive(Debug)]
pub struct Brain {
    pub(crate) core: EntityCore,
    pub(crate) apprentices: MasterModule,
}

impl Brain {
    pub(crate) fn new(core: EntityCore) -> Self {
        Self {
            core,
            apprentices: MasterModule::new(),
        }
    }

    /// Objects this brain currently drives.
    pub fn apprentices(&self) -> &MasterModule {
        &self.apprentices
    }
}

impl_entity!(Brain, Brain);

/// Creation parameters for a [`Brain`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrainStruct {
    /// Name in the universe registry.
    pub global_name: String,
    /// Name in the parent scene's registry.
    pub local_name: String,
    /// Owning scene.
    pub parent: Request<Scene>,
}
