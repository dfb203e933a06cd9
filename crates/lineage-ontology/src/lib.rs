//! Ownership graph, relationship edges, registries and deferred references
//! for the Lineage entity kernel.
//!
//! Every entity has exactly one owner (or none, for roots) and may be the
//! apprentice of one master. Both edges are index-addressed on the owning
//! side so that removing one child or apprentice never renumbers the rest.
//!
//! # Architecture
//!
//! ```text
//! Universe (context; owns allocators + global Registry)
//! └── Scene × n          ParentModule ─┐  local Registry
//!     ├── Camera × n     ChildModule ◄─┤
//!     ├── Brain × n      ChildModule ◄─┤  MasterModule ─┐
//!     └── Object × n     ChildModule ◄─┘  ApprenticeModule ◄─┘
//! ```
//!
//! Creation parameter structs name their parent and master with a
//! [`Request`], resolved once by the factory. Destroying an entity
//! destroys what it owns, releases what it masters, and unbinds it from
//! its own owner and master.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod brain;
pub mod camera;
pub mod config;
pub mod entity;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod master;
pub mod object;
pub mod parent;
pub mod registry;
pub mod request;
pub mod scene;
pub mod universe;

pub use brain::{Brain, BrainStruct};
pub use camera::{Camera, CameraStruct};
pub use config::UniverseConfig;
pub use entity::{Entity, EntityCore};
pub use error::OntologyError;
pub use hierarchy::ChildSlots;
pub use master::{ApprenticeModule, MasterModule};
pub use object::{Object, ObjectStruct};
pub use parent::{ChildModule, ParentModule};
pub use registry::Registry;
pub use request::Request;
pub use scene::{Scene, SceneStruct};
pub use universe::{Member, Universe};
