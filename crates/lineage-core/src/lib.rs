//! Core types for the Lineage entity kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers every other crate speaks: entity IDs and kinds,
//! generation-checked slot handles, child indices, and the [`AnyValue`]
//! carried through callback chains.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod value;

pub use error::ValueError;
pub use id::{AnyHandle, ChildId, EntityId, EntityKind, EntityType, Handle, SlotHandle};
pub use value::{AnyValue, Datatype};
