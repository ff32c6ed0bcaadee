//! Convenience re-exports: `use signet::prelude::*` for the common items.

pub use crate::ecs::{
    ComponentBundle, ComponentSet, Entity, MAX_COMPONENTS, MAX_ENTITIES, Signature, System, World,
};
pub use crate::error::EcsError;
