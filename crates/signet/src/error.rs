//! Error taxonomy for the ECS core.
//!
//! Everything recoverable is expressed as a value (a `Result`, an `Option`,
//! or the [`Entity::NULL`](crate::ecs::Entity::NULL) sentinel) and resolved
//! at the API boundary; no recoverable condition ever crosses it as a panic.
//! The one fatal condition, exceeding `MAX_COMPONENTS` distinct component
//! types, is a build-time capacity misconfiguration and panics in
//! [`ComponentRegistry`](crate::ecs::component::ComponentRegistry) instead of
//! appearing here.

use thiserror::Error;

use crate::ecs::Entity;

/// Recoverable failures of mutating ECS operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The entity table is full; no id in `[1, MAX_ENTITIES)` is free.
    /// Destroying any entity makes creation succeed again.
    #[error("entity table is full ({live} live entities)")]
    CapacityExceeded {
        /// Live entities at the time of the failed call.
        live: usize,
    },

    /// The operation targeted the null handle, a never-allocated id, or a
    /// handle whose entity has since been destroyed (stale generation).
    /// The world is left untouched.
    #[error("invalid or stale entity handle {0}")]
    InvalidEntity(Entity),
}
