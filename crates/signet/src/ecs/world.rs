//! The [`World`] facade.
//!
//! The [`World`] is the single aggregation point of the ECS core. It owns the
//! entity registry, the component-type registry, one store per component
//! type, and the system scheduler, and it is the only object other subsystems
//! hold a reference to.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ World                                                │
//! │                                                      │
//! │  EntityRegistry: ids, generations, signatures,       │
//! │                  live list, names                    │
//! │                                                      │
//! │  ComponentRegistry: TypeId → dense index             │
//! │                                                      │
//! │  stores: Vec<Option<Box<dyn ErasedStore>>>           │
//! │    one sparse-set store per type index               │
//! │                                                      │
//! │  Scheduler: named systems in registration order      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## The signature invariant
//!
//! Signature bit `i` is set for entity `e` exactly when store `i` holds a
//! value at `e`'s slot. Every mutating call updates both sides as one logical
//! step, and no caller can observe a half-applied state: validation happens
//! before the first write, and the two writes happen back to back with no
//! API call in between. `has_component` is therefore a pure bit read, and
//! `get_component` never hands out data for a slot whose bit is unset.
//!
//! ## Frames
//!
//! The host calls [`World::update`] once per clock tick; the scheduler runs
//! every registered system synchronously in registration order. Systems query
//! views (frame-scoped snapshots), mutate components, and create or destroy
//! entities freely; writes are visible to systems that run later in the same
//! frame. The one discipline systems must keep: never dereference a retained
//! `Entity` across a destroy without re-validating it through
//! `has_component`/`get_component`; a stale handle degrades to `None`.

use crate::error::EcsError;

use super::component::ComponentRegistry;
use super::entity::{Entity, EntityRegistry};
use super::store::{ComponentStore, ErasedStore};
use super::system::{Scheduler, System};
use super::view::ComponentSet;

/// The central container for all entity and component state.
///
/// Construct one per process (or per test) and pass it by reference; there
/// is no global instance.
pub struct World {
    entities: EntityRegistry,
    components: ComponentRegistry,
    /// One store per component type, indexed by the type's dense index.
    /// `None` until the first value of that type is attached.
    stores: Vec<Option<Box<dyn ErasedStore>>>,
    scheduler: Scheduler,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityRegistry::new(),
            components: ComponentRegistry::new(),
            stores: Vec::new(),
            scheduler: Scheduler::new(),
        }
    }

    // ── Entity lifecycle ─────────────────────────────────────────────

    /// Create an entity with a cleared signature, or fail with
    /// [`EcsError::CapacityExceeded`] when the table is full.
    pub fn try_create_entity(&mut self) -> Result<Entity, EcsError> {
        match self.entities.allocate() {
            Some(entity) => {
                log::trace!("created entity {entity}");
                Ok(entity)
            }
            None => Err(EcsError::CapacityExceeded { live: self.entities.live_count() }),
        }
    }

    /// Create an entity, returning the [`Entity::NULL`] sentinel when the
    /// table is full. Callers must check; the sentinel fails every later
    /// operation as an invalid handle.
    pub fn create_entity(&mut self) -> Entity {
        match self.try_create_entity() {
            Ok(entity) => entity,
            Err(err) => {
                log::warn!("create_entity failed: {err}");
                Entity::NULL
            }
        }
    }

    /// Create a named entity. Same capacity behavior as [`create_entity`];
    /// on failure no name is recorded.
    ///
    /// [`create_entity`]: World::create_entity
    pub fn create_entity_named(&mut self, name: &str) -> Entity {
        let entity = self.create_entity();
        self.entities.set_name(entity, name);
        entity
    }

    /// Destroy an entity: clear its signature, drop every component it held,
    /// remove its name, and queue its id for FIFO reuse.
    ///
    /// A no-op on the null handle, a never-allocated id, or a stale handle.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if !self.entities.release(entity) {
            log::debug!("destroy_entity: ignoring invalid handle {entity}");
            return;
        }
        for store in self.stores.iter_mut().flatten() {
            store.entity_destroyed(entity.id());
        }
        log::trace!("destroyed entity {entity}");
    }

    /// Whether a handle refers to a currently live entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of currently live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.live_count()
    }

    /// The name assigned to a live entity, if any.
    pub fn entity_name(&self, entity: Entity) -> Option<&str> {
        self.entities.name(entity)
    }

    /// Find a live entity by name. With duplicate names an arbitrary match is
    /// returned.
    pub fn find_entity(&self, name: &str) -> Option<Entity> {
        self.entities.find_named(name)
    }

    /// Number of live entities currently carrying a `T`.
    pub fn component_count<T: 'static + Send + Sync>(&self) -> usize {
        self.components
            .get::<T>()
            .and_then(|index| self.store::<T>(index))
            .map_or(0, ComponentStore::len)
    }

    /// Destroy every live entity and drop every stored component. Names are
    /// cleared; handles created before the reset stay stale (generations are
    /// not rewound). Registered systems are kept.
    pub fn reset(&mut self) {
        for entity in self.entities.live().to_vec() {
            self.entities.release(entity);
        }
        for store in self.stores.iter_mut().flatten() {
            store.clear_all();
        }
        log::debug!("world reset: all entities destroyed");
    }

    // ── Components ──────────────────────────────────────────────────

    /// Attach a component to an entity, replacing any existing `T`.
    ///
    /// The store write and the signature bit are one logical step; on
    /// `Err(InvalidEntity)` neither has changed.
    ///
    /// # Panics
    ///
    /// Panics if this registers more than `MAX_COMPONENTS` distinct component
    /// types, which is a fixed engine-wide capacity misconfiguration and
    /// deliberately not a recoverable error.
    pub fn add_component<T: 'static + Send + Sync>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<(), EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::InvalidEntity(entity));
        }
        let index = self.components.index_of::<T>();
        if self.stores.len() <= index {
            self.stores.resize_with(index + 1, || None);
        }
        let store = self.stores[index]
            .get_or_insert_with(|| Box::new(ComponentStore::<T>::new()))
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .expect("store/index mapping out of sync");
        store.set(entity.id(), value);
        self.entities.set_signature_bit(entity, index);
        Ok(())
    }

    /// Attach a tuple of components in one call. The entity is validated
    /// once, up front; afterwards each member is added left to right.
    pub fn add_components<B: ComponentBundle>(
        &mut self,
        entity: Entity,
        bundle: B,
    ) -> Result<(), EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::InvalidEntity(entity));
        }
        bundle.add_to(self, entity)
    }

    /// Detach `T` from an entity, dropping the stored value and clearing the
    /// signature bit together. A no-op on an invalid handle, an entity
    /// without a `T`, or a type no entity ever had.
    pub fn remove_component<T: 'static + Send + Sync>(&mut self, entity: Entity) {
        if !self.entities.is_alive(entity) {
            return;
        }
        let Some(index) = self.components.get::<T>() else {
            return;
        };
        if !self.entities.signature_bits(entity.id()).test(index) {
            return;
        }
        if let Some(store) = self.store_mut::<T>(index) {
            store.clear(entity.id());
        }
        self.entities.clear_signature_bit(entity, index);
    }

    /// Whether the entity currently has a `T`. A pure signature-bit read
    /// with no store access. `false` for dead/stale handles and for types
    /// never attached to anything.
    pub fn has_component<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        match (self.entities.signature(entity), self.components.get::<T>()) {
            (Some(signature), Some(index)) => signature.test(index),
            _ => false,
        }
    }

    /// The entity's `T`, or `None` whenever [`has_component`] would be
    /// `false`. Emptiness is a normal, frequent, checked condition.
    ///
    /// [`has_component`]: World::has_component
    pub fn get_component<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        if !self.has_component::<T>(entity) {
            return None;
        }
        let index = self.components.get::<T>()?;
        self.store::<T>(index)?.get(entity.id())
    }

    /// Mutable access to the entity's `T`, with the same emptiness rules as
    /// [`get_component`](World::get_component).
    pub fn get_component_mut<T: 'static + Send + Sync>(
        &mut self,
        entity: Entity,
    ) -> Option<&mut T> {
        if !self.has_component::<T>(entity) {
            return None;
        }
        let index = self.components.get::<T>()?;
        self.store_mut::<T>(index)?.get_mut(entity.id())
    }

    // ── Views ────────────────────────────────────────────────────────

    /// Collect every live entity whose signature contains all of `S`'s
    /// component types, in ascending id order.
    ///
    /// The result is a snapshot: mutations made after the call never alter a
    /// sequence already returned, so it is safe to destroy or re-tag entities
    /// while walking it. `view::<()>()` matches every live entity. Cost is
    /// O(live entities).
    pub fn view<S: ComponentSet>(&mut self) -> Vec<Entity> {
        let required = S::required(&mut self.components);
        self.entities
            .live()
            .iter()
            .filter(|e| self.entities.signature_bits(e.id()).contains_all(required))
            .copied()
            .collect()
    }

    /// Snapshot of every live entity, in ascending id order. Equivalent to
    /// `view::<()>()` without touching the component registry.
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.live().to_vec()
    }

    // ── Systems ──────────────────────────────────────────────────────

    /// Register a system under `name` and call its `initialize` exactly once.
    /// Systems update in registration order; re-registering a name replaces
    /// the system but keeps its order slot.
    pub fn register_system<S: System + 'static>(&mut self, name: &str, mut system: S) {
        system.initialize(self);
        self.scheduler.add(name, Box::new(system));
    }

    /// Run one frame: every registered system's `update(dt)`, exactly once,
    /// synchronously, in registration order.
    ///
    /// Systems registered from inside a system run for the first time next
    /// frame, appended after the existing order.
    pub fn update(&mut self, dt: f32) {
        // The scheduler is detached while it runs so systems can borrow the
        // world mutably; registrations made meanwhile land in the fresh
        // scheduler and are merged back afterwards.
        let mut scheduler = std::mem::take(&mut self.scheduler);
        scheduler.run(self, dt);
        let late = std::mem::replace(&mut self.scheduler, scheduler);
        if !late.is_empty() {
            self.scheduler.merge(late);
        }
    }

    /// Whether a system is registered under `name`.
    pub fn has_system(&self, name: &str) -> bool {
        self.scheduler.contains(name)
    }

    /// Registered system names, in update order.
    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.scheduler.names()
    }

    // ── Store plumbing ───────────────────────────────────────────────

    fn store<T: 'static + Send + Sync>(&self, index: usize) -> Option<&ComponentStore<T>> {
        self.stores.get(index)?.as_ref()?.as_any().downcast_ref()
    }

    fn store_mut<T: 'static + Send + Sync>(
        &mut self,
        index: usize,
    ) -> Option<&mut ComponentStore<T>> {
        self.stores.get_mut(index)?.as_mut()?.as_any_mut().downcast_mut()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ── Component bundles ───────────────────────────────────────────────────

/// A tuple of components that can be attached in one
/// [`World::add_components`] call. Implemented for tuples of up to 8
/// components.
pub trait ComponentBundle {
    /// Attach every member of the bundle to `entity`, left to right.
    #[doc(hidden)]
    fn add_to(self, world: &mut World, entity: Entity) -> Result<(), EcsError>;
}

macro_rules! impl_component_bundle {
    ($($t:ident),+) => {
        impl<$($t: 'static + Send + Sync),+> ComponentBundle for ($($t,)+) {
            #[allow(non_snake_case)]
            fn add_to(self, world: &mut World, entity: Entity) -> Result<(), EcsError> {
                let ($($t,)+) = self;
                $(world.add_component(entity, $t)?;)+
                Ok(())
            }
        }
    };
}

impl_component_bundle!(A);
impl_component_bundle!(A, B);
impl_component_bundle!(A, B, C);
impl_component_bundle!(A, B, C, D);
impl_component_bundle!(A, B, C, D, E);
impl_component_bundle!(A, B, C, D, E, F);
impl_component_bundle!(A, B, C, D, E, F, G);
impl_component_bundle!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::signature::MAX_ENTITIES;

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    #[derive(Debug, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }
    struct Health(u32);
    struct Marker;

    fn ids(entities: &[Entity]) -> Vec<u32> {
        entities.iter().map(|e| e.id()).collect()
    }

    // ── Entity lifecycle ─────────────────────────────────────────────

    #[test]
    fn live_entities_have_unique_ids() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        assert_eq!(ids(&world.entities()), vec![1, 2, 3]);
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn recycle_and_clear() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Health(10)).unwrap();
        world.add_component(e, Marker).unwrap();

        world.destroy_entity(e);
        let reused = world.create_entity();

        // FIFO reuse hands back the same numeric id with nothing attached.
        assert_eq!(reused.id(), e.id());
        assert!(!world.has_component::<Health>(reused));
        assert!(!world.has_component::<Marker>(reused));
        // The old handle is stale, not an alias of the new entity.
        assert!(!world.is_alive(e));
        assert!(!world.has_component::<Health>(e));
    }

    #[test]
    fn destroy_invalid_is_a_noop() {
        let mut world = World::new();
        let e = world.create_entity();
        world.destroy_entity(Entity::NULL);
        world.destroy_entity(e);
        world.destroy_entity(e); // double destroy
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn capacity_boundary() {
        let mut world = World::new();
        for _ in 1..MAX_ENTITIES {
            assert!(!world.create_entity().is_null());
        }
        assert_eq!(world.entity_count(), MAX_ENTITIES - 1);

        // Table full: sentinel, not a panic.
        let overflow = world.create_entity();
        assert!(overflow.is_null());
        assert_eq!(
            world.try_create_entity(),
            Err(EcsError::CapacityExceeded { live: MAX_ENTITIES - 1 })
        );

        // Destroying one entity makes creation succeed again.
        let victim = world.entities()[0];
        world.destroy_entity(victim);
        let replacement = world.create_entity();
        assert!(!replacement.is_null());
        assert_eq!(replacement.id(), victim.id());
    }

    #[test]
    fn named_entities() {
        let mut world = World::new();
        let player = world.create_entity_named("player");
        let anon = world.create_entity();

        assert_eq!(world.entity_name(player), Some("player"));
        assert_eq!(world.entity_name(anon), None);
        assert_eq!(world.find_entity("player"), Some(player));
        assert_eq!(world.find_entity("ghost"), None);

        world.destroy_entity(player);
        assert_eq!(world.find_entity("player"), None);
    }

    // ── Components ──────────────────────────────────────────────────

    #[test]
    fn add_then_get_then_remove() {
        let mut world = World::new();
        let e = world.create_entity();

        world.add_component(e, Position { x: 1.0, y: 2.0 }).unwrap();
        assert!(world.has_component::<Position>(e));
        assert_eq!(world.get_component::<Position>(e), Some(&Position { x: 1.0, y: 2.0 }));

        world.remove_component::<Position>(e);
        assert!(!world.has_component::<Position>(e));
        assert_eq!(world.get_component::<Position>(e), None);
    }

    #[test]
    fn add_replaces_existing_value() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Health(50)).unwrap();
        world.add_component(e, Health(100)).unwrap();
        assert_eq!(world.get_component::<Health>(e).unwrap().0, 100);
    }

    #[test]
    fn get_component_mut_writes_through() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Position { x: 0.0, y: 0.0 }).unwrap();

        world.get_component_mut::<Position>(e).unwrap().x = 7.0;
        assert_eq!(world.get_component::<Position>(e).unwrap().x, 7.0);
    }

    #[test]
    fn add_to_invalid_entity_changes_nothing() {
        let mut world = World::new();
        let e = world.create_entity();
        world.destroy_entity(e);

        assert_eq!(
            world.add_component(e, Health(1)),
            Err(EcsError::InvalidEntity(e))
        );
        assert_eq!(world.add_component(Entity::NULL, Health(1)), Err(EcsError::InvalidEntity(Entity::NULL)));

        // The failed add left no trace: a fresh entity with the reused id has
        // no Health.
        let reused = world.create_entity();
        assert_eq!(reused.id(), e.id());
        assert!(!world.has_component::<Health>(reused));
    }

    #[test]
    fn never_added_type_reads_empty() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(!world.has_component::<Velocity>(e));
        assert_eq!(world.get_component::<Velocity>(e), None);
        world.remove_component::<Velocity>(e); // must not panic or register
    }

    #[test]
    fn remove_without_the_component_is_a_noop() {
        let mut world = World::new();
        let e = world.create_entity();
        let other = world.create_entity();
        world.add_component(other, Health(5)).unwrap();

        world.remove_component::<Health>(e);
        assert_eq!(world.get_component::<Health>(other).unwrap().0, 5);
    }

    #[test]
    fn components_are_per_entity() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, Health(1)).unwrap();
        world.add_component(b, Health(2)).unwrap();

        world.destroy_entity(a);
        assert_eq!(world.get_component::<Health>(b).unwrap().0, 2);
    }

    #[test]
    fn bundle_attach() {
        let mut world = World::new();
        let e = world.create_entity();
        world
            .add_components(e, (Position { x: 1.0, y: 1.0 }, Velocity { dx: 0.0, dy: 0.0 }, Marker))
            .unwrap();
        assert!(world.has_component::<Position>(e));
        assert!(world.has_component::<Velocity>(e));
        assert!(world.has_component::<Marker>(e));

        assert_eq!(
            world.add_components(Entity::NULL, (Marker,)),
            Err(EcsError::InvalidEntity(Entity::NULL))
        );
    }

    #[test]
    fn destroy_drops_component_values() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct Resource;
        impl Drop for Resource {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        DROP_COUNT.store(0, Ordering::SeqCst);
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Resource).unwrap();

        world.destroy_entity(e);
        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 1);
    }

    // ── Views ────────────────────────────────────────────────────────

    #[test]
    fn view_matches_exactly_the_tagged_entities() {
        let mut world = World::new();
        let both = world.create_entity();
        let pos_only = world.create_entity();
        let neither = world.create_entity();

        world
            .add_components(both, (Position { x: 0.0, y: 0.0 }, Velocity { dx: 1.0, dy: 1.0 }))
            .unwrap();
        world.add_component(pos_only, Position { x: 1.0, y: 1.0 }).unwrap();

        assert_eq!(world.view::<(Position, Velocity)>(), vec![both]);
        assert_eq!(world.view::<(Position,)>(), vec![both, pos_only]);
        assert!(world.view::<(Health,)>().is_empty());
        assert_eq!(world.view::<()>(), vec![both, pos_only, neither]);
    }

    #[test]
    fn view_is_a_frozen_snapshot() {
        let mut world = World::new();
        let a = world.create_entity();
        world.add_component(a, Marker).unwrap();

        let snapshot = world.view::<(Marker,)>();

        // Later mutations must not leak into the returned sequence.
        let b = world.create_entity();
        world.add_component(b, Marker).unwrap();
        world.remove_component::<Marker>(a);
        world.destroy_entity(a);

        assert_eq!(snapshot, vec![a]);
        assert_eq!(world.view::<(Marker,)>(), vec![b]);
    }

    #[test]
    fn views_are_idempotent_between_mutations() {
        let mut world = World::new();
        for i in 0..10 {
            let e = world.create_entity();
            if i % 2 == 0 {
                world.add_component(e, Marker).unwrap();
            }
        }
        let first = world.view::<(Marker,)>();
        let second = world.view::<(Marker,)>();
        assert_eq!(first, second);
    }

    #[test]
    fn recycled_id_scenario() {
        let mut world = World::new();
        let a = world.create_entity_named("A");
        let b = world.create_entity_named("B");
        assert_eq!((a.id(), b.id()), (1, 2));

        world.destroy_entity(a);
        let c = world.create_entity_named("C");
        let d = world.create_entity_named("D");
        assert_eq!(c.id(), 1); // reused
        assert_eq!(d.id(), 3);

        // Full view in table order: [C(1), B(2), D(3)].
        assert_eq!(world.view::<()>(), vec![c, b, d]);
        assert_eq!(world.entity_name(c), Some("C"));
    }

    // ── Reset ────────────────────────────────────────────────────────

    #[test]
    fn reset_leaves_an_empty_reusable_world() {
        let mut world = World::new();
        let e = world.create_entity_named("keep");
        world.add_component(e, Health(3)).unwrap();
        world.register_system("noop", |_: &mut World, _: f32| {});

        world.reset();
        assert_eq!(world.entity_count(), 0);
        assert!(!world.is_alive(e));
        assert_eq!(world.find_entity("keep"), None);
        assert!(world.has_system("noop")); // systems survive a reset

        // Old handles stay stale even though ids get reused.
        let fresh = world.create_entity();
        assert_eq!(fresh.id(), e.id());
        assert!(!world.has_component::<Health>(fresh));
        assert!(!world.is_alive(e));
    }

    // ── Systems ──────────────────────────────────────────────────────

    struct Movement;
    impl System for Movement {
        fn update(&mut self, world: &mut World, dt: f32) {
            for entity in world.view::<(Position, Velocity)>() {
                let (dx, dy) = {
                    let v = world.get_component::<Velocity>(entity).unwrap();
                    (v.dx, v.dy)
                };
                let p = world.get_component_mut::<Position>(entity).unwrap();
                p.x += dx * dt;
                p.y += dy * dt;
            }
        }
    }

    struct Spawner;
    impl System for Spawner {
        fn initialize(&mut self, world: &mut World) {
            let e = world.create_entity_named("spawned");
            world
                .add_components(e, (Position { x: 0.0, y: 0.0 }, Velocity { dx: 1.0, dy: 0.0 }))
                .unwrap();
        }
        fn update(&mut self, _world: &mut World, _dt: f32) {}
    }

    #[test]
    fn initialize_runs_once_at_registration() {
        let mut world = World::new();
        world.register_system("spawner", Spawner);
        assert_eq!(world.entity_count(), 1);

        world.update(0.016);
        world.update(0.016);
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn systems_drive_component_updates() {
        let mut world = World::new();
        world.register_system("spawner", Spawner);
        world.register_system("movement", Movement);

        world.update(0.5);
        let e = world.find_entity("spawned").unwrap();
        assert_eq!(world.get_component::<Position>(e).unwrap().x, 0.5);

        world.update(0.5);
        assert_eq!(world.get_component::<Position>(e).unwrap().x, 1.0);
    }

    #[test]
    fn writes_are_visible_to_later_systems_in_the_same_frame() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add_component(e, Health(0)).unwrap();

        world.register_system("writer", move |world: &mut World, _: f32| {
            world.get_component_mut::<Health>(e).unwrap().0 = 42;
        });
        world.register_system("reader", move |world: &mut World, _: f32| {
            let seen = world.get_component::<Health>(e).unwrap().0;
            world.add_component(e, Position { x: seen as f32, y: 0.0 }).unwrap();
        });

        world.update(0.016);
        assert_eq!(world.get_component::<Position>(e).unwrap().x, 42.0);
    }

    #[test]
    fn systems_registered_mid_frame_start_next_frame() {
        use std::cell::Cell;
        use std::rc::Rc;

        let late_calls = Rc::new(Cell::new(0u32));

        let mut world = World::new();
        let handle = Rc::clone(&late_calls);
        let mut registered = false;
        world.register_system("registrar", move |world: &mut World, _: f32| {
            if !registered {
                registered = true;
                let handle = Rc::clone(&handle);
                world.register_system("late", move |_: &mut World, _: f32| {
                    handle.set(handle.get() + 1);
                });
            }
        });

        world.update(0.016);
        assert_eq!(late_calls.get(), 0); // registered this frame, not yet run

        world.update(0.016);
        assert_eq!(late_calls.get(), 1);
        assert!(world.has_system("late"));
    }

    #[test]
    fn destroying_entities_inside_a_system_is_safe() {
        let mut world = World::new();
        for _ in 0..5 {
            let e = world.create_entity();
            world.add_component(e, Marker).unwrap();
        }

        world.register_system("reaper", |world: &mut World, _: f32| {
            for entity in world.view::<(Marker,)>() {
                world.destroy_entity(entity);
            }
        });

        world.update(0.016);
        assert_eq!(world.entity_count(), 0);
    }
}
