//! Cameras.

use crate::entity::{impl_entity, EntityCore};
use crate::request::Request;
use crate::scene::Scene;

/// A camera. Child of a scene; carries no state beyond the graph.
#[derive(Debug)]
pub struct Camera {
    pub(crate) core: EntityCore,
}

impl Camera {
    pub(crate) fn new(core: EntityCore) -> Self {
        Self { core }
    }
}

impl_entity!(Camera, Camera);

/// Creation parameters for a [`Camera`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraStruct {
    /// Name in the universe registry.
    pub global_name: String,
    /// Name in the parent scene's registry.
    pub local_name: String,
    /// Owning scene. Unresolved means the camera is created as a root.
    pub parent: Request<Scene>,
}
