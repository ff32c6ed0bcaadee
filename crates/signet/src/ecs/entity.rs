//! Entity handles and the id registry.
//!
//! An [`Entity`] is an opaque handle and carries no payload of its own. The
//! [`World`](super::world::World) maps entities to components; the entity
//! itself is just an id plus a generation counter.
//!
//! ## Ids, the sentinel, and recycling
//!
//! Valid ids live in `[1, MAX_ENTITIES)`. Id `0` is reserved as the invalid
//! sentinel [`Entity::NULL`], returned when the entity table is full so
//! callers can check for failure without an unwind.
//!
//! Released ids are recycled **FIFO**, and an id is always reused before the
//! id counter grows further, which bounds table growth under churn. A raw
//! recycled id would silently alias any stale handle held elsewhere, so every
//! handle also carries a **generation**, bumped each time its id is released:
//!
//! ```text
//! Entity { id: 3, generation: 0 }  ← original
//! Entity { id: 3, generation: 1 }  ← after release + reuse
//! ```
//!
//! A stale handle fails the generation check and every access degrades to a
//! no-op or `None`, never a read of the unrelated new occupant.
//!
//! ## The registry
//!
//! [`EntityRegistry`] owns everything keyed purely by entity identity: the
//! generation and liveness tables, the per-entity [`Signature`], the id-sorted
//! live list that views iterate, and the optional entity names. Component
//! values live elsewhere, in per-type stores.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use super::signature::{MAX_ENTITIES, Signature};

/// A lightweight handle to an entity.
///
/// Only valid for the [`World`](super::world::World) that created it, and only
/// while its generation matches; a destroyed-and-recycled id yields handles
/// with a higher generation, so stale copies are detected on every access.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Numeric id in `[1, MAX_ENTITIES)`. `0` only for [`Entity::NULL`].
    pub(crate) id: u32,
    /// Incarnation counter for this id. Bumped on every release.
    pub(crate) generation: u32,
}

impl Entity {
    /// The reserved invalid handle, id `0`. Returned by
    /// [`World::create_entity`](super::world::World::create_entity) when the
    /// entity table is full.
    pub const NULL: Self = Self { id: 0, generation: 0 };

    /// Returns the numeric id. FIFO recycling means a destroyed entity's id
    /// reappears on a later entity; compare whole handles, not ids, unless id
    /// reuse is exactly what you are probing for.
    pub fn id(self) -> u32 {
        self.id
    }

    /// Returns the generation (incarnation counter) of this handle.
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Returns `true` if this is the reserved invalid handle.
    pub fn is_null(self) -> bool {
        self.id == 0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(NULL)")
        } else {
            write!(f, "Entity({}v{})", self.id, self.generation)
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.id, self.generation)
    }
}

/// Allocates, recycles, and validates entity ids, and owns all per-entity
/// bookkeeping that is independent of any component type.
///
/// ## Memory layout
///
/// ```text
/// generations: [_, 0, 1, 0, ...]   ← one per id slot, index 0 unused
/// alive:       [_, t, f, t, ...]   ← liveness flag per id slot
/// signatures:  [_, 0b101, 0, ...]  ← component bitmask per id slot
/// live:        [1v0, 3v0]          ← live handles, ascending id
/// free:        [2]                  ← released ids, FIFO
/// next_id:     4                    ← next fresh id (if `free` is empty)
/// ```
pub(crate) struct EntityRegistry {
    /// Generation counter per id slot.
    generations: Vec<u32>,
    /// Liveness flag per id slot.
    alive: Vec<bool>,
    /// Component bitmask per id slot. Mutated only through the facade's
    /// paired store update.
    signatures: Vec<Signature>,
    /// Live handles in ascending id order. This is the domain views iterate;
    /// a recycled id reclaims its table position, so the order is stable and
    /// deterministic under churn.
    live: Vec<Entity>,
    /// Released ids awaiting FIFO reuse.
    free: VecDeque<u32>,
    /// Optional entity names, keyed by id. Cleared on release.
    names: HashMap<u32, String>,
    /// Next never-used id. Ids start at 1; `0` is the sentinel.
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            generations: vec![0; MAX_ENTITIES],
            alive: vec![false; MAX_ENTITIES],
            signatures: vec![Signature::EMPTY; MAX_ENTITIES],
            live: Vec::new(),
            free: VecDeque::new(),
            names: HashMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh or recycled entity with a cleared signature.
    ///
    /// Released ids are reused (FIFO) before the id counter grows. Returns
    /// `None` when every id in `[1, MAX_ENTITIES)` is live; the caller maps
    /// that to the [`Entity::NULL`] sentinel.
    pub fn allocate(&mut self) -> Option<Entity> {
        let id = if let Some(id) = self.free.pop_front() {
            id
        } else if self.next_id < MAX_ENTITIES as u32 {
            let id = self.next_id;
            self.next_id += 1;
            id
        } else {
            return None;
        };

        let slot = id as usize;
        let entity = Entity { id, generation: self.generations[slot] };
        self.alive[slot] = true;
        self.signatures[slot] = Signature::EMPTY;

        // Fresh ids are monotonically increasing, so pushing keeps the list
        // sorted; a recycled id has to be re-inserted at its table position.
        match self.live.binary_search_by_key(&id, |e| e.id) {
            Ok(_) => unreachable!("id {id} allocated twice"),
            Err(pos) => self.live.insert(pos, entity),
        }
        Some(entity)
    }

    /// Release an entity: clear its signature and name, bump its generation so
    /// outstanding handles go stale, and queue the id for FIFO reuse.
    ///
    /// Returns `false` (a no-op, not an error) for the null handle, an
    /// out-of-range id, a stale generation, or an already-free id.
    pub fn release(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = entity.id as usize;
        self.signatures[slot] = Signature::EMPTY;
        self.alive[slot] = false;
        self.generations[slot] += 1;
        self.names.remove(&entity.id);
        if let Ok(pos) = self.live.binary_search_by_key(&entity.id, |e| e.id) {
            self.live.remove(pos);
        }
        self.free.push_back(entity.id);
        true
    }

    /// Check whether a handle refers to a currently live entity. Stale
    /// generations, the null handle, and out-of-range ids all fail.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.id as usize;
        !entity.is_null()
            && slot < MAX_ENTITIES
            && self.alive[slot]
            && self.generations[slot] == entity.generation
    }

    /// The live handles in ascending id order. Views iterate this slice.
    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    /// Number of currently live entities.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// The signature of a live entity, or `None` for a dead/stale handle.
    pub fn signature(&self, entity: Entity) -> Option<Signature> {
        self.is_alive(entity).then(|| self.signatures[entity.id as usize])
    }

    /// Raw signature lookup by id. Only meaningful for ids taken from the
    /// live list.
    pub fn signature_bits(&self, id: u32) -> Signature {
        self.signatures[id as usize]
    }

    /// Set one signature bit for a live entity. Callers pair this with the
    /// matching store write.
    pub fn set_signature_bit(&mut self, entity: Entity, index: usize) {
        debug_assert!(self.is_alive(entity));
        self.signatures[entity.id as usize].set(index);
    }

    /// Clear one signature bit for a live entity. Callers pair this with the
    /// matching store clear.
    pub fn clear_signature_bit(&mut self, entity: Entity, index: usize) {
        debug_assert!(self.is_alive(entity));
        self.signatures[entity.id as usize].clear(index);
    }

    /// Assign a name to a live entity, replacing any previous name. Names are
    /// not required to be unique. No-op on a dead/stale handle.
    pub fn set_name(&mut self, entity: Entity, name: &str) {
        if self.is_alive(entity) {
            self.names.insert(entity.id, name.to_string());
        }
    }

    /// The name of a live entity, if one was assigned.
    pub fn name(&self, entity: Entity) -> Option<&str> {
        if self.is_alive(entity) {
            self.names.get(&entity.id).map(String::as_str)
        } else {
            None
        }
    }

    /// Find a live entity by name. Names need not be unique; with duplicates
    /// an arbitrary match is returned.
    pub fn find_named(&self, name: &str) -> Option<Entity> {
        self.names.iter().find(|(_, n)| n.as_str() == name).map(|(&id, _)| Entity {
            id,
            generation: self.generations[id as usize],
        })
    }
}
