//! Top-level container tying the storage layers together.
//!
//! A [`World`] owns a [`Registry`] plus a map of singleton values keyed
//! by type identity. Worlds are fully isolated from one another: an
//! application can hold several, and nothing is shared between them.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::engine::entity::EntityRef;
use crate::engine::registry::Registry;
use crate::engine::types::{ComponentId, EntityId, INVALID_COMPONENT};
use crate::engine::view::{View, ViewSet};

/// Entry point of the engine: entity construction, name lookup, views,
/// sorting, and singleton values.
#[derive(Default)]
pub struct World {
    registry: Registry,
    singletons: HashMap<TypeId, Box<dyn Any>>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new anonymous entity and returns its handle.
    pub fn entity(&mut self) -> EntityRef<'_> {
        let id = self.registry.create_entity();
        EntityRef::new(id, &mut self.registry)
    }

    /// Creates or finds the entity bound to `name` and returns its
    /// handle. Calling twice with the same name yields the same entity.
    pub fn entity_named(&mut self, name: &str) -> EntityRef<'_> {
        let id = self.registry.create_named(name);
        EntityRef::new(id, &mut self.registry)
    }

    /// Wraps an existing entity id in a handle.
    pub fn entity_ref(&mut self, id: EntityId) -> EntityRef<'_> {
        EntityRef::new(id, &mut self.registry)
    }

    /// Looks up an entity by name.
    ///
    /// An unbound name yields a handle over the invalid sentinel whose
    /// `is_valid()` answers `false`.
    pub fn lookup(&mut self, name: &str) -> EntityRef<'_> {
        let id = self.registry.entity_by_name(name);
        EntityRef::new(id, &mut self.registry)
    }

    /// Destroys an entity by id. See `Registry::destroy_entity`.
    pub fn destroy(&mut self, entity: EntityId) {
        self.registry.destroy_entity(entity);
    }

    /// Builds a view over the entities carrying every element type in
    /// the tuple `Q`, e.g. `world.view::<(Position, Velocity)>()`.
    pub fn view<Q: ViewSet>(&mut self) -> View<'_, Q> {
        let component_ids = Q::resolve(&mut self.registry);
        View::new(&self.registry, component_ids)
    }

    /// Mutably scans every `T` element in dense slot order.
    ///
    /// The single-column counterpart of `View::each` for mutation; the
    /// closure receives references straight out of the contiguous
    /// element array. Element mutations are not tracked against the
    /// column's sorted hint.
    pub fn each_mut<T, F>(&mut self, mut f: F)
    where
        T: 'static,
        F: FnMut(EntityId, &mut T),
    {
        let component_id: ComponentId = self.registry.register_type::<T>();
        if component_id == INVALID_COMPONENT {
            return;
        }
        if let Some(column) = self.registry.column_mut::<T>() {
            for (entity, value) in column.iter_mut() {
                f(entity, value);
            }
        }
    }

    /// Sorts the column of `T` in place under `cmp`, keeping per-entity
    /// lookups intact.
    ///
    /// `cmp(a, b)` returns `true` when `a` must precede `b`. The sort is
    /// unstable and skips work when the column is already flagged
    /// sorted or holds fewer than two elements.
    pub fn sort_by<T, F>(&mut self, cmp: F)
    where
        T: 'static,
        F: FnMut(&T, &T) -> bool,
    {
        let component_id = self.registry.register_type::<T>();
        if component_id == INVALID_COMPONENT {
            return;
        }
        if let Some(column) = self.registry.column_mut::<T>() {
            column.sort_by(cmp);
        }
    }

    /// Stores a world-wide singleton value of type `T`, or returns the
    /// existing one.
    ///
    /// The first stored value wins; subsequent calls with the same type
    /// hand back the original. Use [`World::get_singleton_mut`] to
    /// update in place.
    pub fn set_singleton<T: 'static>(&mut self, value: T) -> &mut T {
        self.singletons
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(value))
            .downcast_mut::<T>()
            .expect("singleton entry diverged from its type key")
    }

    /// Shared reference to the `T` singleton, if one was stored.
    pub fn get_singleton<T: 'static>(&self) -> Option<&T> {
        self.singletons.get(&TypeId::of::<T>())?.downcast_ref::<T>()
    }

    /// Mutable reference to the `T` singleton, if one was stored.
    pub fn get_singleton_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.singletons
            .get_mut(&TypeId::of::<T>())?
            .downcast_mut::<T>()
    }

    /// Shared access to the underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the underlying registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}
