//! # Signet
//!
//! A small, single-threaded Entity Component System built around per-entity
//! signature bitmasks and per-type sparse-set storage.
//!
//! The [`World`](ecs::World) is the single aggregation point: it owns entity
//! identity, component storage, and the system schedule, and every consumer
//! mutates state only through its API. There are no global singletons;
//! construct one `World` per process (or per test) and pass it by reference.
//!
//! ```
//! use signet::prelude::*;
//!
//! struct Position { x: f32 }
//! struct Velocity { dx: f32 }
//!
//! struct Movement;
//! impl System for Movement {
//!     fn update(&mut self, world: &mut World, dt: f32) {
//!         for entity in world.view::<(Position, Velocity)>() {
//!             let dx = world.get_component::<Velocity>(entity).unwrap().dx;
//!             world.get_component_mut::<Position>(entity).unwrap().x += dx * dt;
//!         }
//!     }
//! }
//!
//! let mut world = World::new();
//! let e = world.create_entity();
//! world.add_components(e, (Position { x: 0.0 }, Velocity { dx: 2.0 })).unwrap();
//! world.register_system("movement", Movement);
//! world.update(0.5);
//! assert_eq!(world.get_component::<Position>(e).unwrap().x, 1.0);
//! ```

pub mod ecs;
pub mod error;
pub mod prelude;
