//! Errors for graph construction and mutation.

use lineage_arena::ArenaError;
use lineage_core::{AnyHandle, EntityKind};

/// Errors returned by [`Universe`](crate::Universe) and [`Registry`](crate::Registry).
///
/// Expected misses (unresolvable requests, lookups of unknown names,
/// destroying a stale handle) are not errors; they surface as `None` or
/// `false`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OntologyError {
    /// The allocator for one entity kind failed.
    #[error("{kind} allocator: {source}")]
    Arena {
        /// Which allocator failed.
        kind: EntityKind,
        /// The underlying arena error.
        #[source]
        source: ArenaError,
    },

    /// A registry already maps this name.
    #[error("name '{name}' is already in use")]
    NameTaken {
        /// The rejected name.
        name: String,
    },

    /// Registries never store the empty name.
    #[error("empty names cannot be registered")]
    EmptyName,

    /// A handle did not name a live entity.
    #[error("handle {handle} does not name a live entity")]
    StaleHandle {
        /// The offending handle.
        handle: AnyHandle,
    },

    /// The entity kind does not support the requested operation.
    #[error("{operation} is not supported for {kind} entities")]
    Unsupported {
        /// Kind of the entity passed in.
        kind: EntityKind,
        /// What was attempted.
        operation: &'static str,
    },

    /// A local name needs a parent registry to live in.
    #[error("{handle} has no parent to hold a local name")]
    NoParent {
        /// The parentless entity.
        handle: AnyHandle,
    },

    /// A master and apprentice must live in the same scene.
    #[error("{apprentice} and {master} belong to different scenes")]
    SceneMismatch {
        /// The apprentice being bound.
        apprentice: AnyHandle,
        /// The master it was bound to.
        master: AnyHandle,
    },
}

impl OntologyError {
    pub(crate) fn arena(kind: EntityKind) -> impl FnOnce(ArenaError) -> Self {
        move |source| Self::Arena { kind, source }
    }
}
