//! The [`System`] trait and the ordered scheduler.
//!
//! A [`System`] is a unit of per-frame logic: it queries views, reads and
//! writes components, and may create or destroy entities. Systems own no
//! entity data themselves, only transient working state.
//!
//! ## Scheduling
//!
//! The [`Scheduler`] is an order-preserving list of named systems. Each frame
//! it invokes every system's `update(world, dt)` exactly once, synchronously,
//! in registration order, which is deterministic and reproducible in tests,
//! unlike a hash-map registry. There is no parallelism: systems run strictly
//! sequentially, so a write made by one system is visible to every system
//! that runs later in the same frame, and to all systems next frame.
//!
//! ## Lifecycle
//!
//! `initialize(world)` runs exactly once, at registration. There is no
//! explicit teardown; systems live as long as the world that holds them.

use super::world::World;

/// A unit of per-frame logic. Implement `update`; `initialize` is optional
/// one-time setup run at registration.
///
/// Any `FnMut(&mut World, f32)` closure is also a `System` (with a no-op
/// `initialize`), which keeps small systems lightweight:
///
/// ```
/// # use signet::prelude::*;
/// let mut world = World::new();
/// world.register_system("gravity", |world: &mut World, dt: f32| {
///     let _ = (world, dt);
/// });
/// ```
pub trait System {
    /// One-time setup, called when the system is registered. May create
    /// entities, attach components, or build working state.
    fn initialize(&mut self, world: &mut World) {
        let _ = world;
    }

    /// Called once per frame with the frame's delta time.
    fn update(&mut self, world: &mut World, dt: f32);
}

impl<F: FnMut(&mut World, f32)> System for F {
    fn update(&mut self, world: &mut World, dt: f32) {
        (self)(world, dt);
    }
}

/// A registered system with the name it was registered under.
struct Entry {
    name: String,
    system: Box<dyn System>,
}

/// An order-preserving registry of named systems.
///
/// Owned by the [`World`]; use
/// [`World::register_system`](super::world::World::register_system) and
/// [`World::update`](super::world::World::update).
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { systems: Vec::new() }
    }

    /// Add a system under `name`. Re-registering an existing name replaces
    /// the system in place, keeping its slot in the update order.
    pub(crate) fn add(&mut self, name: &str, system: Box<dyn System>) {
        if let Some(pos) = self.systems.iter().position(|e| e.name == name) {
            log::warn!("replacing system \"{name}\" (keeps update-order slot {pos})");
            self.systems[pos].system = system;
        } else {
            log::debug!("registered system \"{name}\" at slot {}", self.systems.len());
            self.systems.push(Entry { name: name.to_string(), system });
        }
    }

    /// Run every system exactly once, in registration order.
    pub(crate) fn run(&mut self, world: &mut World, dt: f32) {
        for entry in &mut self.systems {
            entry.system.update(world, dt);
        }
    }

    /// Append the systems of `other`, preserving replace-in-place semantics
    /// for duplicate names. Used for systems registered mid-frame.
    pub(crate) fn merge(&mut self, other: Scheduler) {
        for Entry { name, system } in other.systems {
            self.add(&name, system);
        }
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no system is registered.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Whether a system is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.systems.iter().any(|e| e.name == name)
    }

    /// The registered names, in update order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|e| e.name.as_str())
    }
}
