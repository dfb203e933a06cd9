//! Deferred entity references.
//!
//! Creation parameter structs name their parent or master with a
//! [`Request`]: either a handle the caller already holds, or a name that
//! the factory looks up at construction time. This lets a scene setup
//! script say "attach to the scene called `level_1`" before that scene
//! has a handle the script can see.

use std::fmt;

use lineage_core::{EntityType, Handle};

use crate::registry::Registry;

/// Unset, a direct handle, or a name to resolve later.
pub enum Request<T> {
    /// No reference was given.
    Unset,
    /// A direct handle, possibly `None`.
    Handle(Option<Handle<T>>),
    /// A name to look up in a registry.
    Name(String),
}

impl<T: EntityType> Request<T> {
    /// Resolve against `registry`.
    ///
    /// A direct handle is returned unchanged. A name resolves only if it
    /// is registered *and* names an entity of kind `T::KIND`; any miss or
    /// kind mismatch yields `None`. Resolution has no side effects.
    pub fn resolve(&self, registry: &Registry) -> Option<Handle<T>> {
        match self {
            Self::Unset => None,
            Self::Handle(handle) => *handle,
            Self::Name(name) => registry.get(name)?.downcast::<T>(),
        }
    }
}

impl<T> Request<T> {
    /// Whether the request is [`Request::Unset`].
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl<T> Default for Request<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Clone for Request<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Unset => Self::Unset,
            Self::Handle(handle) => Self::Handle(*handle),
            Self::Name(name) => Self::Name(name.clone()),
        }
    }
}

impl<T> PartialEq for Request<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unset, Self::Unset) => true,
            (Self::Handle(a), Self::Handle(b)) => a == b,
            (Self::Name(a), Self::Name(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Handle(handle) => f.debug_tuple("Handle").field(handle).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
        }
    }
}

impl<T> From<Handle<T>> for Request<T> {
    fn from(handle: Handle<T>) -> Self {
        Self::Handle(Some(handle))
    }
}

impl<T> From<Option<Handle<T>>> for Request<T> {
    fn from(handle: Option<Handle<T>>) -> Self {
        Self::Handle(handle)
    }
}

impl<T> From<&str> for Request<T> {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl<T> From<String> for Request<T> {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
