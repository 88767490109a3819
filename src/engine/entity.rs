//! Chaining handle over a single entity.
//!
//! [`EntityRef`] pairs an entity id with a mutable registry borrow so
//! component operations can be chained fluently:
//!
//! ```ignore
//! let mut ship = world.entity_named("ship");
//! ship.set(Position { x: 0.0, y: 0.0 })
//!     .add::<Velocity>()
//!     .set(Velocity { dx: 1.0, dy: 1.0 });
//! ```
//!
//! The handle adds no state of its own; every call routes straight to
//! the registry. Handles returned by a failed name lookup wrap the
//! invalid sentinel and answer `is_valid() == false`.

use crate::engine::registry::Registry;
use crate::engine::types::EntityId;
use crate::engine::view::ViewSet;

/// Borrowed handle to one entity, routing component operations to the
/// registry that issued it.
pub struct EntityRef<'r> {
    id: EntityId,
    registry: &'r mut Registry,
}

impl<'r> EntityRef<'r> {
    pub(crate) fn new(id: EntityId, registry: &'r mut Registry) -> Self {
        Self { id, registry }
    }

    /// The wrapped entity identifier.
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `true` if the wrapped id could have been issued by the
    /// owning registry.
    pub fn is_valid(&self) -> bool {
        self.registry.is_valid(self.id)
    }

    /// Name bound to this entity, if any.
    pub fn name(&self) -> Option<&str> {
        self.registry.name_of(self.id)
    }

    /// Human-readable names of the component types this entity carries.
    pub fn component_names(&self) -> Vec<&'static str> {
        self.registry.component_names(self.id)
    }

    /// Attaches a default-constructed `T` element, registering the type
    /// on first use.
    ///
    /// If the entity already carries `T`, the element is reset to the
    /// default value.
    pub fn add<T: Default + 'static>(&mut self) -> &mut Self {
        self.registry.insert(self.id, T::default());
        self
    }

    /// Stores `value` as this entity's `T` element, attaching it first
    /// when absent.
    pub fn set<T: 'static>(&mut self, value: T) -> &mut Self {
        self.registry.insert(self.id, value);
        self
    }

    /// Detaches the `T` element. No-op when absent.
    pub fn remove<T: 'static>(&mut self) -> &mut Self {
        self.registry.remove_component::<T>(self.id);
        self
    }

    /// Returns `true` if this entity carries a `T` element.
    pub fn has<T: 'static>(&self) -> bool {
        self.registry.has::<T>(self.id)
    }

    /// Returns `true` if this entity carries every element type in the
    /// tuple `Q`, e.g. `has_all::<(Position, Velocity)>()`.
    ///
    /// Element types are registered on first use, matching single-type
    /// presence checks reached through a view.
    pub fn has_all<Q: ViewSet>(&mut self) -> bool {
        let component_ids = Q::resolve(self.registry);
        component_ids.iter().all(|&component_id| {
            self.registry
                .erased_column(component_id)
                .map_or(false, |column| column.contains(self.id))
        })
    }

    /// Shared reference to this entity's `T` element, if present.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.registry.get::<T>(self.id)
    }

    /// Mutable reference to this entity's `T` element, if present.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.registry.get_mut::<T>(self.id)
    }

    /// Destroys this entity: detaches every element, unbinds its name,
    /// and releases the id for reuse.
    pub fn destroy(self) {
        self.registry.destroy_entity(self.id);
    }
}
