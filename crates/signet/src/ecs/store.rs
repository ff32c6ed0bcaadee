//! Sparse-set component storage, one store per type.
//!
//! One [`ComponentStore<T>`] exists per registered component type. It maps
//! entity ids to `T` values with O(1) insert/lookup/remove and keeps the
//! values packed in a dense array, so memory scales with the number of
//! entities that *have* the component, not with the entity-table capacity.
//!
//! ## Layout
//!
//! ```text
//! sparse:  [_, 0, NONE, 1, NONE, ...]   ← id → dense slot, sized MAX_ENTITIES
//! dense:   [T(id 1), T(id 3)]            ← packed values
//! owners:  [1, 3]                        ← owning id per dense slot
//! ```
//!
//! Removal swap-removes the dense slot and patches the moved owner's sparse
//! entry, so the dense array never holds stale values; a cleared slot simply
//! does not exist. Dropping a value runs `T`'s own `Drop`; a component that
//! owns an external resource (a physics body handle, say) releases it there,
//! and the store never special-cases resource types.
//!
//! ## Type erasure
//!
//! The [`World`](super::world::World) owns one store per type index but cannot
//! name `T` for all of them, so it holds `Box<dyn ErasedStore>` and downcasts
//! at the typed API boundary. All access is safe; type correctness is checked
//! by `downcast_ref`/`downcast_mut` at runtime.

use std::any::Any;

use super::signature::MAX_ENTITIES;

/// Sentinel for an empty sparse slot.
const NONE: u32 = u32::MAX;

/// Sparse-set storage for a single component type.
///
/// Entries are written and cleared only through the facade's paired signature
/// update, which is what keeps signature bits and store occupancy in lockstep.
pub(crate) struct ComponentStore<T> {
    /// Entity id → index into `dense`, or [`NONE`].
    sparse: Box<[u32]>,
    /// Packed component values.
    dense: Vec<T>,
    /// Owning entity id for each dense slot, parallel to `dense`.
    owners: Vec<u32>,
}

impl<T: 'static + Send + Sync> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            sparse: vec![NONE; MAX_ENTITIES].into_boxed_slice(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }

    /// Insert or overwrite the value for `id`.
    pub fn set(&mut self, id: u32, value: T) {
        let slot = self.sparse[id as usize];
        if slot != NONE {
            self.dense[slot as usize] = value;
        } else {
            self.sparse[id as usize] = self.dense.len() as u32;
            self.dense.push(value);
            self.owners.push(id);
        }
    }

    /// The value for `id`, if present.
    pub fn get(&self, id: u32) -> Option<&T> {
        let slot = self.sparse[id as usize];
        (slot != NONE).then(|| &self.dense[slot as usize])
    }

    /// Mutable access to the value for `id`, if present.
    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        let slot = self.sparse[id as usize];
        (slot != NONE).then(|| &mut self.dense[slot as usize])
    }

    /// Drop the value for `id`. Returns `false` if no value was present.
    ///
    /// Swap-removes the dense slot; the previously-last value moves into the
    /// hole and its owner's sparse entry is patched.
    pub fn clear(&mut self, id: u32) -> bool {
        let slot = self.sparse[id as usize];
        if slot == NONE {
            return false;
        }
        self.sparse[id as usize] = NONE;
        self.dense.swap_remove(slot as usize);
        self.owners.swap_remove(slot as usize);
        if (slot as usize) < self.owners.len() {
            let moved = self.owners[slot as usize];
            self.sparse[moved as usize] = slot;
        }
        true
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.dense.len()
    }
}

/// Object-safe face of a [`ComponentStore`], held by the facade in a table
/// indexed by component type index.
pub(crate) trait ErasedStore {
    /// The entity was destroyed: drop its value if one exists, no-op otherwise.
    fn entity_destroyed(&mut self, id: u32);

    /// Drop every stored value.
    fn clear_all(&mut self);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static + Send + Sync> ErasedStore for ComponentStore<T> {
    fn entity_destroyed(&mut self, id: u32) {
        self.clear(id);
    }

    fn clear_all(&mut self) {
        self.sparse.fill(NONE);
        self.dense.clear();
        self.owners.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
