//! Lineage: an entity ownership kernel.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Lineage sub-crates. For most users, adding `lineage` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lineage::prelude::*;
//!
//! let mut universe = Universe::new(UniverseConfig::default()).unwrap();
//! let scene = universe.create_scene(SceneStruct::named("level-1")).unwrap();
//! let brain = universe
//!     .create_brain(BrainStruct {
//!         global_name: "ai".into(),
//!         parent: Request::from("level-1"),
//!         ..BrainStruct::default()
//!     })
//!     .unwrap();
//! let crate_ = universe
//!     .create_object(ObjectStruct {
//!         local_name: "crate".into(),
//!         parent: Request::from(scene),
//!         brain: Request::from("ai"),
//!         ..ObjectStruct::default()
//!     })
//!     .unwrap();
//!
//! assert_eq!(universe.master_of(crate_), Some(brain));
//! assert_eq!(universe.local_name_of(crate_), Some("crate"));
//!
//! // Destroying the scene takes everything it owns with it.
//! universe.destroy(scene);
//! assert!(!universe.is_alive(crate_));
//! assert!(universe.registry().is_empty());
//!
//! // Callback chains see each other's results.
//! let mut engine = CallbackEngine::new();
//! let neg = engine.create_callback_object(lineage::callback::snippets::neg);
//! engine
//!     .callback_object_mut(neg)
//!     .unwrap()
//!     .create_callback_parameter("", AnyValue::I32(3));
//! engine.create_callback_object(lineage::callback::snippets::square_last);
//! assert_eq!(
//!     engine.execute(&mut universe, &AnyValue::Bool(false)),
//!     Some(AnyValue::I32(9))
//! );
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lineage-core` | Handles, entity kinds, dynamic values |
//! | [`arena`] | `lineage-arena` | Slot storages and generational allocators |
//! | [`ontology`] | `lineage-ontology` | Universe, entities, ownership, registries, requests |
//! | [`callback`] | `lineage-callback` | Callback engine, objects and stock snippets |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Handles, entity kinds and dynamic values (`lineage-core`).
pub use lineage_core as types;

/// Slot storages and generational allocators (`lineage-arena`).
///
/// Only needed to store custom [`arena::Constructible`] types outside a
/// universe.
pub use lineage_arena as arena;

/// The universe and its entities (`lineage-ontology`).
///
/// [`ontology::Universe`] owns every allocator and is the only way to
/// create, reparent, rename or destroy entities.
pub use lineage_ontology as ontology;

/// Sequential callback chains (`lineage-callback`).
///
/// Stock callbacks live in [`callback::snippets`].
pub use lineage_callback as callback;

/// Common imports for typical Lineage usage.
///
/// ```rust
/// use lineage::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lineage_core::{AnyHandle, AnyValue, ChildId, Datatype, EntityKind, Handle};

    // Entities and creation parameters
    pub use lineage_ontology::{
        Brain, BrainStruct, Camera, CameraStruct, Object, ObjectStruct, Scene, SceneStruct,
    };

    // Universe
    pub use lineage_ontology::{OntologyError, Registry, Request, Universe, UniverseConfig};

    // Callbacks
    pub use lineage_callback::{Callback, CallbackEngine, CallbackObject, CallbackParameter};
}
