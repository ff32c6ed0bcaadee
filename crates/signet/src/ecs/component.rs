//! Component type registration.
//!
//! Components are plain Rust value types: no required base trait, any
//! `'static + Send + Sync` type qualifies. The engine still needs a *dense
//! integer index* per type to address signature bits and the store table, and
//! Rust has no reflection to derive one. [`ComponentRegistry`] closes the gap:
//! the first time a type is seen it is assigned the next unused index, keyed
//! by its [`TypeId`]; every later lookup returns the same index.
//!
//! Registration order is therefore call-order dependent. If signatures must be
//! bit-identical across runs (replay logs, network lockstep), touch every
//! component type once in a fixed order at startup.
//!
//! Indices are never freed: a component type exists for the process lifetime.
//! Running out of indices means the engine-wide [`MAX_COMPONENTS`] is
//! misconfigured for this game (a build defect, not a runtime condition), so
//! the registry panics rather than returning a recoverable error.

use std::any::TypeId;
use std::collections::HashMap;

use super::signature::MAX_COMPONENTS;

/// Assigns each component type a dense index in `[0, MAX_COMPONENTS)` on first
/// use, and answers reverse lookups for diagnostics.
///
/// Owned by the [`World`](super::world::World); exposed mainly because
/// [`ComponentSet`](super::view::ComponentSet) folds type tuples through it.
#[derive(Default)]
pub struct ComponentRegistry {
    /// Type → dense index, in first-use order.
    indices: HashMap<TypeId, usize>,
    /// Human-readable type name per index, for log messages.
    names: Vec<&'static str>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// The dense index for `T`, assigning the next unused one on first call.
    ///
    /// Idempotent: every call for the same `T` returns the same index.
    ///
    /// # Panics
    ///
    /// Panics if this would register a [`MAX_COMPONENTS`]-plus-one-th distinct
    /// type. That is a fixed capacity misconfiguration discovered too late to
    /// recover from meaningfully.
    pub fn index_of<T: 'static>(&mut self) -> usize {
        if let Some(&index) = self.indices.get(&TypeId::of::<T>()) {
            return index;
        }
        let index = self.names.len();
        assert!(
            index < MAX_COMPONENTS,
            "component type limit exceeded: cannot register `{}` (MAX_COMPONENTS = {})",
            std::any::type_name::<T>(),
            MAX_COMPONENTS
        );
        self.indices.insert(TypeId::of::<T>(), index);
        self.names.push(std::any::type_name::<T>());
        log::debug!("registered component type `{}` as index {index}", self.names[index]);
        index
    }

    /// The index for `T` if it has been registered, without registering it.
    ///
    /// Read-only paths (`has_component`, `remove_component`) use this so that
    /// probing for a never-attached type does not burn an index.
    pub fn get<T: 'static>(&self) -> Option<usize> {
        self.indices.get(&TypeId::of::<T>()).copied()
    }

    /// Human-readable name of the type at `index`.
    pub fn type_name(&self, index: usize) -> &'static str {
        self.names.get(index).copied().unwrap_or("<unregistered>")
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no component type has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
