//! Signature queries over live entities.
//!
//! A view answers "which live entities currently carry all of these component
//! types?". The request is a tuple of component types; [`ComponentSet`] folds
//! it into a required [`Signature`] mask, and the
//! [`World`](super::world::World) walks its live list collecting every entity
//! whose signature contains the mask.
//!
//! The result is an eagerly materialized `Vec<Entity>` snapshot:
//!
//! - finite and restartable: iterate it as many times as you like;
//! - ordered by ascending entity id, stable and deterministic under churn;
//! - frozen at the moment of the call. Entities created, destroyed, or
//!   re-tagged afterwards never appear in (or vanish from) a sequence you
//!   already hold, which makes it safe to mutate the world while walking one.
//!
//! Cost is proportional to the number of live entities, not to the entity
//! table capacity. The match itself is a single mask comparison per entity.

use super::component::ComponentRegistry;
use super::signature::Signature;

/// A set of component types that a view requires, expressed as a tuple.
///
/// Implemented for tuples of up to 8 component types, and for `()`, the
/// empty set, which matches every live entity.
pub trait ComponentSet {
    /// Fold this set into a required-signature mask, registering any
    /// first-seen types along the way. A never-attached type simply yields a
    /// bit no entity has, i.e. an empty view.
    #[doc(hidden)]
    fn required(components: &mut ComponentRegistry) -> Signature;
}

impl ComponentSet for () {
    fn required(_components: &mut ComponentRegistry) -> Signature {
        Signature::EMPTY
    }
}

macro_rules! impl_component_set {
    ($($t:ident),+) => {
        impl<$($t: 'static + Send + Sync),+> ComponentSet for ($($t,)+) {
            fn required(components: &mut ComponentRegistry) -> Signature {
                let mut mask = Signature::EMPTY;
                $(mask.set(components.index_of::<$t>());)+
                mask
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
