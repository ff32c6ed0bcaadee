//! # Signature-Bitmask ECS
//!
//! A deliberately small Entity Component System: per-entity signature
//! bitmasks, per-type sparse-set stores, eagerly materialized views, and a
//! sequential system scheduler. No archetypes, no parallelism, no `unsafe`.
//!
//! ## Module Overview
//!
//! - [`entity`]: entity handles (id + generation) and the id registry
//! - [`signature`]: the per-entity component bitmask and capacity constants
//! - [`component`]: lazy `TypeId` to dense index registration
//! - `store`: sparse-set storage, one store per component type
//! - [`view`]: tuple-of-types queries folded into signature masks
//! - [`system`]: the `System` trait and the ordered scheduler
//! - [`world`]: the facade everything else holds a reference to

pub mod component;
pub mod entity;
pub mod signature;
pub(crate) mod store;
pub mod system;
pub mod view;
pub mod world;

pub use entity::Entity;
pub use signature::{MAX_COMPONENTS, MAX_ENTITIES, Signature};
pub use system::{Scheduler, System};
pub use view::ComponentSet;
pub use world::{ComponentBundle, World};
