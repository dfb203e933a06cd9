//! The universe: context object owning every allocator, the global
//! registry and the root of the ownership graph.
//!
//! All graph mutation goes through [`Universe`] because every edge has
//! two ends that live in different allocators. Each method updates both
//! ends before returning, so callers never observe a half-bound edge.

use lineage_arena::{Allocator, ArenaError};
use lineage_core::{AnyHandle, EntityId, EntityKind, Handle};
use smallvec::{smallvec, SmallVec};

use crate::brain::{Brain, BrainStruct};
use crate::camera::{Camera, CameraStruct};
use crate::config::UniverseConfig;
use crate::entity::{Entity, EntityCore};
use crate::error::OntologyError;
use crate::object::{Object, ObjectStruct};
use crate::parent::ParentModule;
use crate::registry::Registry;
use crate::request::Request;
use crate::scene::{Scene, SceneStruct};

/// Which registry a name belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Global,
    Local,
}

/// Entity kinds stored in a universe.
///
/// Gives typed read access through [`Universe::get`].
pub trait Member: Entity + Sized {
    /// The allocator holding every entity of this kind.
    fn allocator(universe: &Universe) -> &Allocator<Self>;
}

trait MemberMut: Member {
    fn allocator_mut(universe: &mut Universe) -> &mut Allocator<Self>;
}

macro_rules! impl_member {
    ($ty:ty, $field:ident) => {
        impl Member for $ty {
            fn allocator(universe: &Universe) -> &Allocator<Self> {
                &universe.$field
            }
        }

        impl MemberMut for $ty {
            fn allocator_mut(universe: &mut Universe) -> &mut Allocator<Self> {
                &mut universe.$field
            }
        }
    };
}

impl_member!(Scene, scenes);
impl_member!(Camera, cameras);
impl_member!(Brain, brains);
impl_member!(Object, objects);

/// Top-level context of one entity graph.
#[derive(Debug)]
pub struct Universe {
    config: UniverseConfig,
    entity_id: EntityId,
    registry: Registry,
    children: ParentModule,
    scenes: Allocator<Scene>,
    cameras: Allocator<Camera>,
    brains: Allocator<Brain>,
    objects: Allocator<Object>,
}

impl Universe {
    /// Create an empty universe.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::Arena`] if any per-kind allocator config
    /// is invalid, for example zero slots per storage.
    pub fn new(config: UniverseConfig) -> Result<Self, OntologyError> {
        if let Err(error) = config.validate() {
            tracing::error!(%error, "invalid universe configuration");
            return Err(error);
        }
        let scenes = allocator(&config, EntityKind::Scene)?;
        let cameras = allocator(&config, EntityKind::Camera)?;
        let brains = allocator(&config, EntityKind::Brain)?;
        let objects = allocator(&config, EntityKind::Object)?;
        Ok(Self {
            config,
            entity_id: EntityId::next(),
            registry: Registry::new(),
            children: ParentModule::new(),
            scenes,
            cameras,
            brains,
            objects,
        })
    }

    /// The configuration this universe was built with.
    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }

    /// Identity of the universe itself.
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// The global name registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Scenes, in child index order.
    pub fn children(&self) -> &ParentModule {
        &self.children
    }

    // ── Factories ──────────────────────────────────────────────────

    /// Create a scene as a child of the universe.
    ///
    /// Naming problems (both names given, name taken) are logged and leave
    /// the scene unnamed; they do not fail creation.
    pub fn create_scene(&mut self, params: SceneStruct) -> Result<Handle<Scene>, OntologyError> {
        let record = self
            .scenes
            .build_in(|record| Scene::new(EntityCore::new(record)))
            .map_err(creation_failed(EntityKind::Scene))?;
        let scene = Handle::<Scene>::from_slot(record.handle());
        let id = self.children.bind_child(scene.erase());
        if let Some(core) = self.core_mut(scene.erase()) {
            core.child.bind(AnyHandle::UNIVERSE, id);
        }
        self.name_universe_child(scene.erase(), &params.global_name, &params.local_name);
        tracing::debug!(handle = %scene.erase(), "scene created");
        Ok(scene)
    }

    /// Create a camera in the scene `params.parent` resolves to.
    pub fn create_camera(
        &mut self,
        params: CameraStruct,
    ) -> Result<Handle<Camera>, OntologyError> {
        self.create_scene_child(
            &params.parent,
            &params.global_name,
            &params.local_name,
            Camera::new,
        )
    }

    /// Create a brain in the scene `params.parent` resolves to.
    pub fn create_brain(&mut self, params: BrainStruct) -> Result<Handle<Brain>, OntologyError> {
        self.create_scene_child(
            &params.parent,
            &params.global_name,
            &params.local_name,
            Brain::new,
        )
    }

    /// Create an object, bind it to its scene and, if `params.brain`
    /// resolves to a brain of the same scene, make it that brain's
    /// apprentice.
    pub fn create_object(
        &mut self,
        params: ObjectStruct,
    ) -> Result<Handle<Object>, OntologyError> {
        let object = self.create_scene_child(
            &params.parent,
            &params.global_name,
            &params.local_name,
            Object::new,
        )?;
        if let Some(brain) = self.resolve(&params.brain) {
            if let Err(error) = self.set_master(object, Some(brain)) {
                tracing::warn!(%error, "object created without a master");
            }
        }
        Ok(object)
    }

    fn create_scene_child<T: MemberMut>(
        &mut self,
        parent: &Request<Scene>,
        global_name: &str,
        local_name: &str,
        build: impl FnOnce(EntityCore) -> T,
    ) -> Result<Handle<T>, OntologyError> {
        let scene = self.resolve(parent);
        let record = T::allocator_mut(self)
            .build_in(|record| build(EntityCore::new(record)))
            .map_err(creation_failed(T::KIND))?;
        let handle = Handle::<T>::from_slot(record.handle());
        if let Some(scene) = scene {
            self.bind_to_scene(handle.erase(), scene);
        }
        self.name_scene_child(handle.erase(), global_name, local_name);
        tracing::debug!(handle = %handle.erase(), "entity created");
        Ok(handle)
    }

    /// Resolve a request against the global registry, keeping only live
    /// results.
    ///
    /// An unresolvable request that was not [`Request::Unset`] is logged.
    pub fn resolve<T: Member>(&self, request: &Request<T>) -> Option<Handle<T>> {
        let resolved = request
            .resolve(&self.registry)
            .filter(|handle| T::allocator(self).is_alive(handle.slot()));
        if resolved.is_none() && !request.is_unset() {
            let kind = T::KIND;
            tracing::warn!(%kind, ?request, "request did not resolve to a live entity");
        }
        resolved
    }

    // ── Names ──────────────────────────────────────────────────────

    fn name_universe_child(&mut self, handle: AnyHandle, global_name: &str, local_name: &str) {
        let name = match (global_name.is_empty(), local_name.is_empty()) {
            (true, true) => return,
            (false, false) => {
                tracing::error!(
                    %handle,
                    global_name,
                    local_name,
                    "children of the universe take a global or a local name, not both; no name assigned"
                );
                return;
            }
            (false, true) => global_name,
            (true, false) => local_name,
        };
        if let Err(error) = self.rename(handle, name, Scope::Global) {
            tracing::warn!(%handle, %error, "name not assigned");
        }
    }

    fn name_scene_child(&mut self, handle: AnyHandle, global_name: &str, local_name: &str) {
        for (name, scope) in [(global_name, Scope::Global), (local_name, Scope::Local)] {
            if name.is_empty() {
                continue;
            }
            if let Err(error) = self.rename(handle, name, scope) {
                tracing::warn!(%handle, %error, "name not assigned");
            }
        }
    }

    /// Register `handle` under `name` in the global registry, replacing
    /// its previous global name. An empty `name` clears it.
    ///
    /// For scenes the global and local name are the same name, so this
    /// sets both.
    ///
    /// # Errors
    ///
    /// [`OntologyError::NameTaken`] if another entity holds `name` (the old
    /// name is kept), [`OntologyError::StaleHandle`] for dead handles.
    pub fn set_global_name(
        &mut self,
        handle: impl Into<AnyHandle>,
        name: &str,
    ) -> Result<(), OntologyError> {
        self.rename(handle.into(), name, Scope::Global)
    }

    /// Register `handle` under `name` in its parent scene's registry.
    ///
    /// For scenes this is the same as [`Universe::set_global_name`].
    ///
    /// # Errors
    ///
    /// As [`Universe::set_global_name`], plus [`OntologyError::NoParent`]
    /// for a scene child that has no scene.
    pub fn set_local_name(
        &mut self,
        handle: impl Into<AnyHandle>,
        name: &str,
    ) -> Result<(), OntologyError> {
        self.rename(handle.into(), name, Scope::Local)
    }

    fn rename(&mut self, handle: AnyHandle, name: &str, scope: Scope) -> Result<(), OntologyError> {
        if handle.is_universe() {
            return Err(OntologyError::Unsupported {
                kind: EntityKind::Universe,
                operation: "naming",
            });
        }
        let universe_child = handle.kind() == EntityKind::Scene;
        let core = self
            .core(handle)
            .ok_or(OntologyError::StaleHandle { handle })?;
        let old = match scope {
            Scope::Global => core.global_name.clone(),
            Scope::Local => core.local_name.clone(),
        };
        if old == name {
            return Ok(());
        }
        let parent = core.child.get_parent();

        let registry = if universe_child || scope == Scope::Global {
            &mut self.registry
        } else {
            parent
                .and_then(|p| p.downcast::<Scene>())
                .and_then(|scene| self.scenes.get_mut(scene.slot()))
                .map(|scene| &mut scene.registry)
                .ok_or(OntologyError::NoParent { handle })?
        };
        if !name.is_empty() && registry.has(name) {
            return Err(OntologyError::NameTaken {
                name: name.to_owned(),
            });
        }
        erase_name(registry, &old, handle);
        if !name.is_empty() {
            registry.add(name, handle)?;
        }

        if let Some(core) = self.core_mut(handle) {
            if universe_child {
                core.global_name = name.to_owned();
                core.local_name = name.to_owned();
            } else if scope == Scope::Global {
                core.global_name = name.to_owned();
            } else {
                core.local_name = name.to_owned();
            }
        }
        Ok(())
    }

    // ── Ownership ──────────────────────────────────────────────────

    fn bind_to_scene(&mut self, child: AnyHandle, scene: Handle<Scene>) {
        let Some(parent) = self.scenes.get_mut(scene.slot()) else {
            return;
        };
        let id = parent.children.bind_child(child);
        if let Some(core) = self.core_mut(child) {
            core.child.bind(scene.erase(), id);
        }
    }

    /// Move a camera, brain or object to another scene, or make it a root
    /// with `None`.
    ///
    /// Unbinding from the old scene and binding to the new one happen in
    /// this one call; passing the current parent is a no-op. The local
    /// name moves along with the entity and is dropped (with a warning)
    /// if the new scene already uses it. A brain leaving a scene lets go
    /// of apprentices in other scenes; an object leaving a scene is
    /// unbound from a master in another scene.
    ///
    /// # Errors
    ///
    /// [`OntologyError::Unsupported`] for scenes and the universe,
    /// [`OntologyError::StaleHandle`] if either handle is dead.
    pub fn set_parent(
        &mut self,
        child: impl Into<AnyHandle>,
        parent: Option<Handle<Scene>>,
    ) -> Result<(), OntologyError> {
        let child = child.into();
        if matches!(child.kind(), EntityKind::Universe | EntityKind::Scene) {
            return Err(OntologyError::Unsupported {
                kind: child.kind(),
                operation: "reparenting",
            });
        }
        let core = self
            .core(child)
            .ok_or(OntologyError::StaleHandle { handle: child })?;
        if core.child.get_parent() == parent.map(Handle::erase) {
            return Ok(());
        }
        let local_name = core.local_name.clone();
        if let Some(scene) = parent {
            if !self.scenes.is_alive(scene.slot()) {
                return Err(OntologyError::StaleHandle {
                    handle: scene.erase(),
                });
            }
        }

        if let Some((old, id)) = self.core_mut(child).and_then(|core| core.child.unbind()) {
            if let Some(module) = self.parent_module_mut(old) {
                module.unbind_child(id);
            }
            if let Some(registry) = self.scene_registry_mut(old) {
                erase_name(registry, &local_name, child);
            }
        }
        if let Some(scene) = parent {
            self.bind_to_scene(child, scene);
        }
        self.carry_local_name(child, &local_name, parent);

        match child.kind() {
            EntityKind::Brain => {
                if let Some(brain) = child.downcast::<Brain>() {
                    for object in self.apprentices_of(brain) {
                        if self.scene_of(object.erase()) != parent {
                            self.unbind_master(object);
                        }
                    }
                }
            }
            EntityKind::Object => {
                if let Some(object) = child.downcast::<Object>() {
                    let master_scene = self
                        .master_of(object)
                        .and_then(|brain| self.scene_of(brain.erase()));
                    if self.master_of(object).is_some() && master_scene != parent {
                        self.unbind_master(object);
                    }
                }
            }
            _ => {}
        }
        tracing::debug!(%child, ?parent, "parent changed");
        Ok(())
    }

    fn carry_local_name(&mut self, child: AnyHandle, name: &str, parent: Option<Handle<Scene>>) {
        if name.is_empty() {
            return;
        }
        let added = match parent.and_then(|scene| self.scenes.get_mut(scene.slot())) {
            Some(scene) => scene.registry.add(name, child),
            None => Err(OntologyError::NoParent { handle: child }),
        };
        if let Err(error) = added {
            tracing::warn!(%child, %error, "local name dropped");
            if let Some(core) = self.core_mut(child) {
                core.local_name.clear();
            }
        }
    }

    // ── Relationships ──────────────────────────────────────────────

    /// Make `brain` the master of `object`, replacing any previous master.
    /// `None` leaves the object masterless.
    ///
    /// # Errors
    ///
    /// [`OntologyError::StaleHandle`] if either handle is dead,
    /// [`OntologyError::SceneMismatch`] if the two are in different scenes.
    pub fn set_master(
        &mut self,
        object: Handle<Object>,
        brain: Option<Handle<Brain>>,
    ) -> Result<(), OntologyError> {
        let current = self
            .get(object)
            .ok_or(OntologyError::StaleHandle {
                handle: object.erase(),
            })?
            .master
            .get_master();
        if let Some(brain) = brain {
            if !self.brains.is_alive(brain.slot()) {
                return Err(OntologyError::StaleHandle {
                    handle: brain.erase(),
                });
            }
            if self.scene_of(brain.erase()) != self.scene_of(object.erase()) {
                return Err(OntologyError::SceneMismatch {
                    apprentice: object.erase(),
                    master: brain.erase(),
                });
            }
        }
        if current == brain.map(Handle::erase) {
            return Ok(());
        }

        self.unbind_master(object);
        if let Some(brain) = brain {
            let Some(master) = self.brains.get_mut(brain.slot()) else {
                return Ok(());
            };
            let id = master.apprentices.bind_apprentice(object.erase());
            if let Some(apprentice) = self.objects.get_mut(object.slot()) {
                apprentice.master.bind(brain.erase(), id);
            }
        }
        Ok(())
    }

    fn unbind_master(&mut self, object: Handle<Object>) {
        let Some((master, id)) = self
            .objects
            .get_mut(object.slot())
            .and_then(|apprentice| apprentice.master.unbind())
        else {
            return;
        };
        if let Some(brain) = master
            .downcast::<Brain>()
            .and_then(|brain| self.brains.get_mut(brain.slot()))
        {
            brain.apprentices.unbind_apprentice(id);
        }
    }

    // ── Destruction ────────────────────────────────────────────────

    /// Destroy an entity and everything it owns, depth first.
    ///
    /// Each destroyed entity is unbound from its parent and master, its
    /// apprentices are released, and its names are erased. Returns `false`
    /// for a stale handle (no-op) and for the universe, which is destroyed
    /// only by dropping it. A handle minted by another universe is never
    /// alive here, so it is a no-op as well.
    pub fn destroy(&mut self, handle: impl Into<AnyHandle>) -> bool {
        let handle = handle.into();
        if handle.is_universe() {
            tracing::warn!("the universe cannot destroy itself");
            return false;
        }
        if !self.is_alive(handle) {
            return false;
        }
        let mut order = Vec::new();
        let mut stack: SmallVec<[AnyHandle; 8]> = smallvec![handle];
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.children_of(next));
        }
        // Children go before their parents.
        for next in order.into_iter().rev() {
            self.destroy_one(next);
        }
        true
    }

    fn destroy_one(&mut self, handle: AnyHandle) {
        let slot = handle.slot();
        let core = match handle.kind() {
            EntityKind::Universe => return,
            EntityKind::Scene => match self.scenes.destroy(slot) {
                Some(scene) => scene.core,
                None => return,
            },
            EntityKind::Camera => match self.cameras.destroy(slot) {
                Some(camera) => camera.core,
                None => return,
            },
            EntityKind::Brain => {
                let Some(mut brain) = self.brains.destroy(slot) else {
                    return;
                };
                for apprentice in brain.apprentices.unbind_all() {
                    if let Some(object) = apprentice
                        .downcast::<Object>()
                        .and_then(|object| self.objects.get_mut(object.slot()))
                    {
                        object.master.unbind();
                    }
                }
                brain.core
            }
            EntityKind::Object => {
                let Some(mut object) = self.objects.destroy(slot) else {
                    return;
                };
                if let Some((master, id)) = object.master.unbind() {
                    if let Some(brain) = master
                        .downcast::<Brain>()
                        .and_then(|brain| self.brains.get_mut(brain.slot()))
                    {
                        brain.apprentices.unbind_apprentice(id);
                    }
                }
                object.core
            }
        };
        self.detach(handle, core);
    }

    fn detach(&mut self, handle: AnyHandle, mut core: EntityCore) {
        let parent = core.child.unbind();
        if let Some((parent, id)) = parent {
            if let Some(module) = self.parent_module_mut(parent) {
                module.unbind_child(id);
            }
        }
        erase_name(&mut self.registry, &core.global_name, handle);
        if handle.kind() != EntityKind::Scene {
            if let Some(registry) = parent.and_then(|(p, _)| self.scene_registry_mut(p)) {
                erase_name(registry, &core.local_name, handle);
            }
        }
        tracing::debug!(%handle, entity_id = %core.entity_id(), "entity destroyed");
    }

    // ── Dispatch ───────────────────────────────────────────────────

    /// Typed access to a live entity.
    ///
    /// Dead handles and handles minted by another universe read as `None`.
    pub fn get<T: Member>(&self, handle: Handle<T>) -> Option<&T> {
        let allocator = T::allocator(self);
        if !allocator.is_alive(handle.slot()) {
            return None;
        }
        allocator.get(handle.slot())
    }

    /// Whether `handle` names a live entity. The universe is always alive.
    pub fn is_alive(&self, handle: impl Into<AnyHandle>) -> bool {
        let handle = handle.into();
        let slot = handle.slot();
        match handle.kind() {
            EntityKind::Universe => true,
            EntityKind::Scene => self.scenes.is_alive(slot),
            EntityKind::Camera => self.cameras.is_alive(slot),
            EntityKind::Brain => self.brains.is_alive(slot),
            EntityKind::Object => self.objects.is_alive(slot),
        }
    }

    /// Number of live entities of `kind`. The universe counts as one.
    pub fn number_of_instances(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Universe => 1,
            EntityKind::Scene => self.scenes.number_of_instances(),
            EntityKind::Camera => self.cameras.number_of_instances(),
            EntityKind::Brain => self.brains.number_of_instances(),
            EntityKind::Object => self.objects.number_of_instances(),
        }
    }

    pub(crate) fn core(&self, handle: AnyHandle) -> Option<&EntityCore> {
        if !self.is_alive(handle) {
            return None;
        }
        let slot = handle.slot();
        match handle.kind() {
            EntityKind::Universe => None,
            EntityKind::Scene => self.scenes.get(slot).map(Entity::core),
            EntityKind::Camera => self.cameras.get(slot).map(Entity::core),
            EntityKind::Brain => self.brains.get(slot).map(Entity::core),
            EntityKind::Object => self.objects.get(slot).map(Entity::core),
        }
    }

    fn core_mut(&mut self, handle: AnyHandle) -> Option<&mut EntityCore> {
        if !self.is_alive(handle) {
            return None;
        }
        let slot = handle.slot();
        match handle.kind() {
            EntityKind::Universe => None,
            EntityKind::Scene => self.scenes.get_mut(slot).map(Entity::core_mut),
            EntityKind::Camera => self.cameras.get_mut(slot).map(Entity::core_mut),
            EntityKind::Brain => self.brains.get_mut(slot).map(Entity::core_mut),
            EntityKind::Object => self.objects.get_mut(slot).map(Entity::core_mut),
        }
    }

    pub(crate) fn parent_module(&self, handle: AnyHandle) -> Option<&ParentModule> {
        match handle.kind() {
            EntityKind::Universe => Some(&self.children),
            EntityKind::Scene if self.scenes.is_alive(handle.slot()) => self
                .scenes
                .get(handle.slot())
                .map(|scene| &scene.children),
            _ => None,
        }
    }

    fn parent_module_mut(&mut self, handle: AnyHandle) -> Option<&mut ParentModule> {
        match handle.kind() {
            EntityKind::Universe => Some(&mut self.children),
            EntityKind::Scene if self.scenes.is_alive(handle.slot()) => self
                .scenes
                .get_mut(handle.slot())
                .map(|scene| &mut scene.children),
            _ => None,
        }
    }

    fn scene_registry_mut(&mut self, handle: AnyHandle) -> Option<&mut Registry> {
        let scene = handle.downcast::<Scene>()?;
        self.scenes
            .get_mut(scene.slot())
            .map(|scene| &mut scene.registry)
    }
}

fn allocator<T: Entity>(
    config: &UniverseConfig,
    kind: EntityKind,
) -> Result<Allocator<T>, OntologyError> {
    let arena = config.arena_for(kind).cloned().unwrap_or_default();
    Allocator::new(arena).map_err(OntologyError::arena(kind))
}

fn creation_failed(kind: EntityKind) -> impl FnOnce(ArenaError) -> OntologyError {
    move |source| {
        tracing::error!(%kind, error = %source, "entity creation failed");
        OntologyError::Arena { kind, source }
    }
}

/// Erase `name` only if it still maps to `handle`.
fn erase_name(registry: &mut Registry, name: &str, handle: AnyHandle) {
    if !name.is_empty() && registry.get(name) == Some(handle) {
        registry.erase(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_arena::ArenaConfig;
    use lineage_core::ChildId;

    fn universe() -> Universe {
        Universe::new(UniverseConfig::uniform(4)).unwrap()
    }

    fn scene(u: &mut Universe, name: &str) -> Handle<Scene> {
        u.create_scene(SceneStruct::named(name)).unwrap()
    }

    fn object_in(u: &mut Universe, scene: Handle<Scene>) -> Handle<Object> {
        u.create_object(ObjectStruct {
            parent: scene.into(),
            ..ObjectStruct::default()
        })
        .unwrap()
    }

    fn brain_in(u: &mut Universe, scene: Handle<Scene>) -> Handle<Brain> {
        u.create_brain(BrainStruct {
            parent: scene.into(),
            ..BrainStruct::default()
        })
        .unwrap()
    }

    #[test]
    fn zero_capacity_config_is_rejected() {
        let mut config = UniverseConfig::uniform(4);
        config.cameras = ArenaConfig::new(0);
        assert!(matches!(
            Universe::new(config),
            Err(OntologyError::Arena {
                kind: EntityKind::Camera,
                source: ArenaError::ZeroCapacity,
            })
        ));
    }

    #[test]
    fn scene_is_child_of_universe() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        assert_eq!(u.core(s.erase()).unwrap().child.get_parent(), Some(AnyHandle::UNIVERSE));
        assert_eq!(u.children().children(), vec![s.erase()]);
    }

    #[test]
    fn global_name_sets_both_names_for_universe_child() {
        let mut u = universe();
        let s = scene(&mut u, "foo");
        let core = u.core(s.erase()).unwrap();
        assert_eq!(core.global_name(), "foo");
        assert_eq!(core.local_name(), "foo");
        assert_eq!(u.registry().get("foo"), Some(s.erase()));
    }

    #[test]
    fn local_name_alone_also_sets_both() {
        let mut u = universe();
        let s = u
            .create_scene(SceneStruct {
                local_name: "bar".into(),
                ..SceneStruct::default()
            })
            .unwrap();
        let core = u.core(s.erase()).unwrap();
        assert_eq!(core.global_name(), "bar");
        assert_eq!(core.local_name(), "bar");
    }

    #[test]
    fn both_names_for_universe_child_assigns_neither() {
        let mut u = universe();
        let s = u
            .create_scene(SceneStruct {
                global_name: "foo".into(),
                local_name: "bar".into(),
            })
            .unwrap();
        let core = u.core(s.erase()).unwrap();
        assert_eq!(core.global_name(), "");
        assert_eq!(core.local_name(), "");
        assert!(u.registry().is_empty());
        assert!(u.is_alive(s));
    }

    #[test]
    fn taken_name_leaves_second_scene_unnamed() {
        let mut u = universe();
        let first = scene(&mut u, "dup");
        let second = scene(&mut u, "dup");
        assert_eq!(u.registry().get("dup"), Some(first.erase()));
        assert_eq!(u.core(second.erase()).unwrap().global_name(), "");
    }

    #[test]
    fn scene_children_use_two_registries() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        let cam = u
            .create_camera(CameraStruct {
                global_name: "main_camera".into(),
                local_name: "cam".into(),
                parent: "level".into(),
            })
            .unwrap();
        assert_eq!(u.registry().get("main_camera"), Some(cam.erase()));
        assert!(!u.registry().has("cam"));
        let local = &u.scenes.get(s.slot()).unwrap().registry;
        assert_eq!(local.get("cam"), Some(cam.erase()));
    }

    #[test]
    fn unresolved_parent_creates_root() {
        let mut u = universe();
        let cam = u
            .create_camera(CameraStruct {
                parent: "nowhere".into(),
                ..CameraStruct::default()
            })
            .unwrap();
        let core = u.core(cam.erase()).unwrap();
        assert_eq!(core.child.get_parent(), None);
        assert_eq!(core.child_id(), ChildId::UNBOUND);
    }

    #[test]
    fn local_name_without_parent_is_dropped() {
        let mut u = universe();
        let cam = u
            .create_camera(CameraStruct {
                local_name: "orphan".into(),
                ..CameraStruct::default()
            })
            .unwrap();
        assert_eq!(u.core(cam.erase()).unwrap().local_name(), "");
        assert_eq!(
            u.set_local_name(cam, "orphan"),
            Err(OntologyError::NoParent {
                handle: cam.erase()
            })
        );
    }

    #[test]
    fn rename_erases_old_name() {
        let mut u = universe();
        let s = scene(&mut u, "old");
        u.set_global_name(s, "new").unwrap();
        assert!(!u.registry().has("old"));
        assert_eq!(u.registry().get("new"), Some(s.erase()));
        assert_eq!(u.core(s.erase()).unwrap().local_name(), "new");
    }

    #[test]
    fn rename_to_taken_name_keeps_old() {
        let mut u = universe();
        let a = scene(&mut u, "a");
        scene(&mut u, "b");
        assert_eq!(
            u.set_global_name(a, "b"),
            Err(OntologyError::NameTaken { name: "b".into() })
        );
        assert_eq!(u.registry().get("a"), Some(a.erase()));
    }

    #[test]
    fn empty_rename_clears_name() {
        let mut u = universe();
        let s = scene(&mut u, "gone");
        u.set_global_name(s, "").unwrap();
        assert!(u.registry().is_empty());
        assert_eq!(u.core(s.erase()).unwrap().global_name(), "");
    }

    #[test]
    fn universe_cannot_be_named_or_destroyed() {
        let mut u = universe();
        assert!(matches!(
            u.set_global_name(AnyHandle::UNIVERSE, "u"),
            Err(OntologyError::Unsupported { .. })
        ));
        assert!(!u.destroy(AnyHandle::UNIVERSE));
    }

    #[test]
    fn destroying_scene_cascades() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        let brain = brain_in(&mut u, s);
        let object = object_in(&mut u, s);
        u.set_master(object, Some(brain)).unwrap();

        assert!(u.destroy(s));
        assert!(!u.is_alive(s));
        assert!(!u.is_alive(brain));
        assert!(!u.is_alive(object));
        assert_eq!(u.number_of_instances(EntityKind::Object), 0);
        assert!(u.registry().is_empty());
        assert_eq!(u.children().number_of_children(), 0);
    }

    #[test]
    fn destroying_stale_handle_is_noop() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        assert!(u.destroy(s));
        assert!(!u.destroy(s));
    }

    #[test]
    fn destroying_master_unbinds_apprentices() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        let brain = brain_in(&mut u, s);
        let a = object_in(&mut u, s);
        let b = object_in(&mut u, s);
        u.set_master(a, Some(brain)).unwrap();
        u.set_master(b, Some(brain)).unwrap();

        u.destroy(brain);
        for object in [a, b] {
            assert!(u.is_alive(object));
            assert!(u.get(object).unwrap().apprentice_module().get_master().is_none());
        }
    }

    #[test]
    fn destroying_apprentice_frees_its_index_only() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        let brain = brain_in(&mut u, s);
        let a = object_in(&mut u, s);
        let b = object_in(&mut u, s);
        u.set_master(a, Some(brain)).unwrap();
        u.set_master(b, Some(brain)).unwrap();

        u.destroy(a);
        let master = u.get(brain).unwrap().apprentices();
        assert_eq!(master.number_of_apprentices(), 1);
        assert_eq!(master.get_apprentice(ChildId(1)), Some(b.erase()));
    }

    #[test]
    fn master_must_share_scene() {
        let mut u = universe();
        let here = scene(&mut u, "here");
        let there = scene(&mut u, "there");
        let brain = brain_in(&mut u, here);
        let object = object_in(&mut u, there);
        assert!(matches!(
            u.set_master(object, Some(brain)),
            Err(OntologyError::SceneMismatch { .. })
        ));
    }

    #[test]
    fn set_parent_to_same_scene_is_noop() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        let object = object_in(&mut u, s);
        let before = u.core(object.erase()).unwrap().child_id();
        u.set_parent(object, Some(s)).unwrap();
        assert_eq!(u.core(object.erase()).unwrap().child_id(), before);
        assert_eq!(u.scenes.get(s.slot()).unwrap().children.number_of_children(), 1);
    }

    #[test]
    fn moving_object_unbinds_foreign_master() {
        let mut u = universe();
        let here = scene(&mut u, "here");
        let there = scene(&mut u, "there");
        let brain = brain_in(&mut u, here);
        let object = object_in(&mut u, here);
        u.set_master(object, Some(brain)).unwrap();

        u.set_parent(object, Some(there)).unwrap();
        assert!(u.get(object).unwrap().apprentice_module().get_master().is_none());
        assert_eq!(u.get(brain).unwrap().apprentices().number_of_apprentices(), 0);
    }

    #[test]
    fn moving_brain_releases_apprentices_left_behind() {
        let mut u = universe();
        let here = scene(&mut u, "here");
        let there = scene(&mut u, "there");
        let brain = brain_in(&mut u, here);
        let object = object_in(&mut u, here);
        u.set_master(object, Some(brain)).unwrap();

        u.set_parent(brain, Some(there)).unwrap();
        assert!(u.get(object).unwrap().apprentice_module().get_master().is_none());
    }

    #[test]
    fn local_name_moves_with_entity() {
        let mut u = universe();
        let here = scene(&mut u, "here");
        let there = scene(&mut u, "there");
        let cam = u
            .create_camera(CameraStruct {
                local_name: "eye".into(),
                parent: here.into(),
                ..CameraStruct::default()
            })
            .unwrap();

        u.set_parent(cam, Some(there)).unwrap();
        assert!(!u.scenes.get(here.slot()).unwrap().registry.has("eye"));
        assert_eq!(
            u.scenes.get(there.slot()).unwrap().registry.get("eye"),
            Some(cam.erase())
        );
    }

    #[test]
    fn local_name_taken_in_destination_is_dropped() {
        let mut u = universe();
        let here = scene(&mut u, "here");
        let there = scene(&mut u, "there");
        let resident = u
            .create_camera(CameraStruct {
                local_name: "eye".into(),
                parent: there.into(),
                ..CameraStruct::default()
            })
            .unwrap();
        let visitor = u
            .create_camera(CameraStruct {
                local_name: "eye".into(),
                parent: here.into(),
                ..CameraStruct::default()
            })
            .unwrap();

        u.set_parent(visitor, Some(there)).unwrap();
        assert_eq!(u.core(visitor.erase()).unwrap().local_name(), "");
        assert!(!u.scenes.get(here.slot()).unwrap().registry.has("eye"));
        assert_eq!(
            u.scenes.get(there.slot()).unwrap().registry.get("eye"),
            Some(resident.erase())
        );
    }

    #[test]
    fn local_name_cleared_when_made_root() {
        let mut u = universe();
        let here = scene(&mut u, "here");
        let cam = u
            .create_camera(CameraStruct {
                global_name: "camera".into(),
                local_name: "eye".into(),
                parent: here.into(),
            })
            .unwrap();

        u.set_parent(cam, None).unwrap();
        let core = u.core(cam.erase()).unwrap();
        assert_eq!(core.local_name(), "");
        assert_eq!(core.global_name(), "camera");
        assert!(!u.scenes.get(here.slot()).unwrap().registry.has("eye"));
    }

    #[test]
    fn handles_from_another_universe_read_as_dead() {
        let mut a = Universe::new(UniverseConfig::uniform(1)).unwrap();
        let mut foreign = Vec::new();
        for _ in 0..3 {
            let s = a.create_scene(SceneStruct::default()).unwrap();
            let brain = brain_in(&mut a, s);
            let object = object_in(&mut a, s);
            foreign.push((s, brain, object));
        }
        let (s, brain, object) = foreign[2];

        let mut b = Universe::new(UniverseConfig::uniform(1)).unwrap();
        assert!(!b.is_alive(object));
        assert!(b.get(object).is_none());
        assert_eq!(b.parent_of(object), None);
        assert_eq!(b.master_of(object), None);
        assert!(b.apprentices_of(brain).is_empty());
        assert!(b.children_of(s).is_empty());
        assert!(b.scene_registry(s).is_none());
        assert!(matches!(
            b.set_master(object, None),
            Err(OntologyError::StaleHandle { .. })
        ));
        assert!(!b.destroy(s));
    }

    #[test]
    fn scenes_cannot_be_reparented() {
        let mut u = universe();
        let s = scene(&mut u, "level");
        assert!(matches!(
            u.set_parent(s, None),
            Err(OntologyError::Unsupported {
                kind: EntityKind::Scene,
                ..
            })
        ));
    }
}
