//! Strongly-typed identifiers and generation-checked handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`EntityId`] allocation.
static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique, monotonic identity of an entity.
///
/// Unlike a [`SlotHandle`], an `EntityId` is never reused: a slot that is
/// destroyed and rebuilt hands its new occupant a fresh ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh, unique entity ID.
    ///
    /// Each call returns an ID that has never been returned before within
    /// this process.
    pub fn next() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of entity kinds managed by the kernel.
///
/// Graph traversal dispatches on this tag instead of on virtual methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// The top-level universe. Exactly one per context; never slot-allocated.
    Universe,
    /// A scene: child of the universe, owner of scene-scoped entities.
    Scene,
    /// A camera: child of a scene.
    Camera,
    /// A brain (controller): child of a scene, master of objects.
    Brain,
    /// A simulated object: child of a scene, apprentice of a brain.
    Object,
}

impl EntityKind {
    /// Lower-case name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Universe => "universe",
            Self::Scene => "scene",
            Self::Camera => "camera",
            Self::Brain => "brain",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Associates a concrete entity type with its [`EntityKind`] tag.
pub trait EntityType: 'static {
    /// The tag stored in every [`AnyHandle`] pointing at this type.
    const KIND: EntityKind;
}

/// Location and generation of one occupied storage slot.
///
/// A handle is valid only while the slot it names is occupied *and* the
/// slot's generation still equals `generation`. Destroying the occupant
/// bumps the slot generation, so every outstanding handle to it goes
/// stale instead of silently aliasing the next occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct SlotHandle {
    /// Index of the storage within its allocator's chain.
    pub storage_index: u32,
    /// Index of the slot within that storage.
    pub slot_index: u32,
    /// Slot generation at construction time.
    pub generation: u32,
}

impl SlotHandle {
    /// Create a new handle.
    pub const fn new(storage_index: u32, slot_index: u32, generation: u32) -> Self {
        Self {
            storage_index,
            slot_index,
            generation,
        }
    }
}

impl fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}@{}",
            self.storage_index, self.slot_index, self.generation
        )
    }
}

/// Untyped entity handle: a kind tag plus a slot handle.
///
/// This is what parent and master modules store and what registries map
/// names to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct AnyHandle {
    kind: EntityKind,
    slot: SlotHandle,
}

impl AnyHandle {
    /// The handle of the universe itself.
    pub const UNIVERSE: AnyHandle = AnyHandle {
        kind: EntityKind::Universe,
        slot: SlotHandle::new(0, 0, 0),
    };

    /// Create a handle from its parts.
    pub const fn new(kind: EntityKind, slot: SlotHandle) -> Self {
        Self { kind, slot }
    }

    /// The entity kind tag.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The slot location.
    pub fn slot(&self) -> SlotHandle {
        self.slot
    }

    /// Whether this handle names the universe.
    pub fn is_universe(&self) -> bool {
        self.kind == EntityKind::Universe
    }

    /// Reinterpret as a typed handle, or `None` if the kind differs.
    pub fn downcast<T: EntityType>(self) -> Option<Handle<T>> {
        (self.kind == T::KIND).then(|| Handle::from_slot(self.slot))
    }
}

impl fmt::Display for AnyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.slot)
    }
}

/// Typed entity handle.
///
/// Zero-cost wrapper around a [`SlotHandle`]; the type parameter only
/// fixes the [`EntityKind`].
#[must_use]
pub struct Handle<T> {
    slot: SlotHandle,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Wrap a slot handle.
    pub const fn from_slot(slot: SlotHandle) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// The slot location.
    pub fn slot(&self) -> SlotHandle {
        self.slot
    }
}

impl<T: EntityType> Handle<T> {
    /// Erase the type, keeping the kind tag.
    pub fn erase(self) -> AnyHandle {
        AnyHandle::new(T::KIND, self.slot)
    }
}

impl<T: EntityType> From<Handle<T>> for AnyHandle {
    fn from(handle: Handle<T>) -> Self {
        handle.erase()
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.slot).finish()
    }
}

/// Index of a child within its parent's child vector.
///
/// [`ChildId::UNBOUND`] marks an entity that is not bound to any parent
/// (or apprentice not bound to any master).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub usize);

impl ChildId {
    /// Sentinel for "not bound".
    pub const UNBOUND: ChildId = ChildId(usize::MAX);

    /// Whether this ID refers to an actual index.
    pub fn is_bound(self) -> bool {
        self != Self::UNBOUND
    }

    /// The index, or `None` for the sentinel.
    pub fn index(self) -> Option<usize> {
        self.is_bound().then_some(self.0)
    }
}

impl Default for ChildId {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("unbound")
        }
    }
}
