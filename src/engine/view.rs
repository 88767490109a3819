//! Typed joins over the intersection of component columns.
//!
//! A [`View`] is parameterized by a tuple of element types and visits
//! every entity that carries all of them. Construction resolves each
//! element type to its component id (registering on first use) and then
//! borrows the registry shared, so no structural mutation can happen
//! while the view is alive.
//!
//! ## Execution model
//! 1. Pick the participating column with the fewest elements.
//! 2. Walk its dense entity array.
//! 3. Probe every other participating column for each candidate.
//! 4. Invoke the caller's closure with references into each column.
//!
//! Iteration order is the driving column's dense order; no stronger
//! guarantee is given, and swap-removal or sorting may reorder entities
//! arbitrarily between traversals.
//!
//! Single-type views skip the probing machinery entirely and scan the
//! dense element array front to back, a guaranteed sequential-memory
//! pass.

use std::marker::PhantomData;

use crate::engine::registry::Registry;
use crate::engine::types::{ComponentId, EntityId};

/// Tuple of element types usable as a view or presence query.
///
/// Implemented for tuples of one through four component types. Resolving
/// registers each element type on first use, so a query over a
/// never-stored type simply drives an empty column.
pub trait ViewSet {
    /// Resolves every element type to its component id, registering
    /// types on first use.
    fn resolve(registry: &mut Registry) -> Vec<ComponentId>;
}

/// Typed cursor over the entities carrying all of `Q`'s element types.
///
/// Created by `World::view`; consumed by `each`.
pub struct View<'r, Q> {
    registry: &'r Registry,
    component_ids: Vec<ComponentId>,
    marker: PhantomData<fn() -> Q>,
}

impl<'r, Q> View<'r, Q> {
    pub(crate) fn new(registry: &'r Registry, component_ids: Vec<ComponentId>) -> Self {
        Self { registry, component_ids, marker: PhantomData }
    }

    /// Upper bound on the number of entities this view can visit: the
    /// size of the smallest participating column.
    pub fn len_hint(&self) -> usize {
        self.registry
            .smallest_of(&self.component_ids)
            .and_then(|component_id| self.registry.erased_column(component_id))
            .map_or(0, |column| column.len())
    }
}

impl<A: 'static> ViewSet for (A,) {
    fn resolve(registry: &mut Registry) -> Vec<ComponentId> {
        vec![registry.register_type::<A>()]
    }
}

impl<'r, A: 'static> View<'r, (A,)> {
    /// Visits every entity carrying `A` in dense slot order.
    ///
    /// This is the single-column fast path: the closure receives
    /// references straight out of the contiguous element array, with no
    /// per-entity probing.
    pub fn each<F>(self, mut f: F)
    where
        F: FnMut(EntityId, &A),
    {
        let Some(column) = self.registry.column::<A>() else {
            return;
        };
        for (entity, value) in column.iter() {
            f(entity, value);
        }
    }
}

macro_rules! impl_view_join {
    ($(($ty:ident, $col:ident, $val:ident)),+) => {
        impl<$($ty: 'static),+> ViewSet for ($($ty,)+) {
            fn resolve(registry: &mut Registry) -> Vec<ComponentId> {
                vec![$(registry.register_type::<$ty>()),+]
            }
        }

        impl<'r, $($ty: 'static),+> View<'r, ($($ty,)+)> {
            /// Visits every entity carrying all of the view's element
            /// types.
            ///
            /// Drives the smallest participating column and probes the
            /// rest per entity; the closure receives one reference into
            /// each column.
            pub fn each<F>(self, mut f: F)
            where
                F: FnMut(EntityId, $(&$ty),+),
            {
                let Some(smallest) = self.registry.smallest_of(&self.component_ids) else {
                    return;
                };
                let Some(driver) = self.registry.erased_column(smallest) else {
                    return;
                };
                $(
                    let Some($col) = self.registry.column::<$ty>() else {
                        return;
                    };
                )+
                for &entity in driver.entities() {
                    if let ($(Some($val),)+) = ($($col.get(entity),)+) {
                        f(entity, $($val),+);
                    }
                }
            }
        }
    };
}

impl_view_join!((A, column_a, a), (B, column_b, b));
impl_view_join!((A, column_a, a), (B, column_b, b), (C, column_c, c));
impl_view_join!((A, column_a, a), (B, column_b, b), (C, column_c, c), (D, column_d, d));
