//! Test utilities and fixture worlds for Lineage development.
//!
//! Provides a [`World`] builder with a populated scene and mock
//! [`Callback`](lineage_callback::Callback) implementations in
//! [`fixtures`] for exercising callback chains.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use lineage_core::Handle;
use lineage_ontology::{
    Brain, BrainStruct, Object, ObjectStruct, Request, Scene, SceneStruct, Universe,
    UniverseConfig,
};

/// A universe holding one scene, one brain and a row of objects driven by
/// that brain.
///
/// Global names: `scene`, `brain`, `object-0`, `object-1`, ...
pub struct World {
    pub universe: Universe,
    pub scene: Handle<Scene>,
    pub brain: Handle<Brain>,
    pub objects: Vec<Handle<Object>>,
}

impl World {
    /// Build a world with `objects` objects using the default config.
    pub fn new(objects: usize) -> Self {
        Self::with_config(UniverseConfig::default(), objects)
    }

    /// Build a world with `objects` objects.
    ///
    /// # Panics
    ///
    /// If the config is invalid or too small to hold the world.
    pub fn with_config(config: UniverseConfig, objects: usize) -> Self {
        let mut universe = Universe::new(config).expect("valid universe config");
        let scene = universe
            .create_scene(SceneStruct::named("scene"))
            .expect("scene fits");
        let brain = universe
            .create_brain(BrainStruct {
                global_name: "brain".into(),
                parent: Request::from(scene),
                ..BrainStruct::default()
            })
            .expect("brain fits");
        let objects = (0..objects)
            .map(|i| {
                universe
                    .create_object(ObjectStruct {
                        global_name: format!("object-{i}"),
                        parent: Request::from(scene),
                        brain: Request::from(brain),
                        ..ObjectStruct::default()
                    })
                    .expect("object fits")
            })
            .collect();
        Self {
            universe,
            scene,
            brain,
            objects,
        }
    }

    /// An empty universe with every kind sized to `slots_per_storage`.
    pub fn empty(slots_per_storage: u32) -> Universe {
        Universe::new(UniverseConfig::uniform(slots_per_storage)).expect("valid universe config")
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(0)
    }
}
