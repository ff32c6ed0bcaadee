//! Per-entity component bitmask.
//!
//! Every live entity carries a [`Signature`]: one bit per registered component
//! type. Bit `i` is set for entity `e` exactly when the store for type `i`
//! holds a value at `e`'s slot. The [`World`](super::world::World) updates the
//! store slot and the bit together, so the invariant is never observable as
//! violated: `has_component` is a pure bit test and never touches a store.
//!
//! The mask is a plain `u32`, which caps the engine at [`MAX_COMPONENTS`]
//! distinct component types. That limit is a build-time configuration, not a
//! runtime resource: exceeding it aborts (see
//! [`ComponentRegistry`](super::component::ComponentRegistry)).

use std::fmt;

/// Hard ceiling on distinct component types. One bit each in a [`Signature`].
pub const MAX_COMPONENTS: usize = 32;

/// Hard ceiling on the entity table. Valid entity ids are `[1, MAX_ENTITIES)`;
/// id `0` is the reserved sentinel ([`Entity::NULL`](super::entity::Entity::NULL)).
pub const MAX_ENTITIES: usize = 1000;

/// A fixed-width bitmask recording which component types an entity has.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Signature(u32);

impl Signature {
    /// The empty mask, which is also a freshly created entity's signature.
    pub const EMPTY: Self = Self(0);

    /// Set the bit for component type `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_COMPONENTS`. Indices come from the component
    /// registry, which never hands out an index past the limit.
    pub fn set(&mut self, index: usize) {
        assert!(index < MAX_COMPONENTS, "component index {index} out of range");
        self.0 |= 1 << index;
    }

    /// Clear the bit for component type `index`.
    pub fn clear(&mut self, index: usize) {
        assert!(index < MAX_COMPONENTS, "component index {index} out of range");
        self.0 &= !(1 << index);
    }

    /// Test the bit for component type `index`.
    pub fn test(&self, index: usize) -> bool {
        index < MAX_COMPONENTS && (self.0 & (1 << index)) != 0
    }

    /// Returns `true` if every bit set in `required` is also set in `self`.
    ///
    /// This is the view-matching test: `signature & required == required`.
    pub fn contains_all(&self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns `true` if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#034b})", self.0)
    }
}
