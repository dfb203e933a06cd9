//! Slot storages and generational allocators for the Lineage entity kernel.
//!
//! Every entity lives in exactly one slot of one [`Storage`]. An
//! [`Allocator`] owns a chain of equally sized storages for one entity
//! type and is the only path through which values of that type are
//! constructed or destroyed.
//!
//! # Architecture
//!
//! ```text
//! Allocator<T> (one per entity type)
//! └── Storage<T> × n (fixed capacity, appended on demand, never freed)
//!     └── Slot<T> × capacity
//!         ├── generation: u32 (bumped on destroy)
//!         └── Free | Reserved | Occupied(T)
//! ```
//!
//! # Handle validity
//!
//! A [`SlotHandle`](lineage_core::SlotHandle) resolves only while its slot
//! is occupied and the slot generation matches. Destroying a value bumps
//! the generation, so stale handles read as `None` rather than aliasing
//! whatever is built in the slot next.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod config;
pub mod error;
pub mod record;
pub mod storage;

pub use allocator::{Allocator, SlotAddress};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use record::{Constructible, ConstructibleRecord};
pub use storage::Storage;
