//! Column ownership, component-type identity, and entity allocation.
//!
//! The [`Registry`] is the underlying brain of the engine: it owns one
//! [`Column`] per registered component type, assigns each distinct
//! element type a stable [`ComponentId`] on first use, allocates and
//! recycles entity identifiers, and routes typed operations to the
//! owning column.
//!
//! ## Design
//! - Columns are stored as `Box<dyn ErasedColumn>` indexed by component
//!   id; typed dispatch downcasts through `as_any` / `as_any_mut`.
//! - Component identity is keyed on [`TypeId`], the compile-time-unique
//!   token per element type. Identifiers are assigned monotonically from
//!   zero and never recycled.
//! - Entity identifiers come from a monotone counter; released ids are
//!   queued and handed out again first-in first-out.
//! - Each registry is fully self-contained: independent registries share
//!   no state, so separate worlds are completely isolated.
//!
//! ## Invariants
//! - Every entry in `type_map` indexes a column whose element type
//!   matches the mapped [`TypeId`].
//! - `columns.len() <= MAX_COMPONENT_TYPES`.
//! - An id in `free_entities` is below `next_entity` and appears once.
//!
//! ## Concurrency
//! The registry is single-threaded shared mutable state; a registry
//! instance must not be accessed concurrently from multiple threads.

use std::any::{type_name, TypeId};
use std::collections::{HashMap, VecDeque};

use crate::engine::column::{Column, ErasedColumn};
use crate::engine::error::{
    ComponentLimitError, RegistryError, RegistryResult, ZeroSizedComponentError,
};
use crate::engine::types::{
    ComponentId, EntityId, INVALID_COMPONENT, INVALID_ENTITY, MAX_COMPONENT_TYPES,
};

/// Owner of all component columns and the entity id allocator.
///
/// See the module docs for the design and invariants. Most callers reach
/// the registry through the world façade; the typed dispatch methods here
/// are the layer the façade is built on.
#[derive(Default)]
pub struct Registry {
    columns: Vec<Box<dyn ErasedColumn>>,
    type_map: HashMap<TypeId, ComponentId>,
    next_entity: EntityId,
    free_entities: VecDeque<EntityId>,
    names: HashMap<String, EntityId>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers element type `T` and returns its assigned identifier.
    ///
    /// ## Behavior
    /// - Idempotent: if `T` is already registered, returns the existing
    ///   identifier without touching storage.
    /// - Otherwise appends a new column for `T` and assigns the next
    ///   identifier, monotonically from zero. Identifiers are never
    ///   recycled.
    ///
    /// ## Errors
    /// - `ComponentLimit` once the per-registry type cap is reached.
    /// - `ZeroSized` for element types without storable layout.
    pub fn try_register<T: 'static>(&mut self) -> RegistryResult<ComponentId> {
        let type_id = TypeId::of::<T>();
        if let Some(&existing) = self.type_map.get(&type_id) {
            return Ok(existing);
        }

        if std::mem::size_of::<T>() == 0 {
            return Err(ZeroSizedComponentError { name: type_name::<T>() }.into());
        }

        if self.columns.len() >= MAX_COMPONENT_TYPES {
            return Err(ComponentLimitError {
                registered: self.columns.len(),
                cap: MAX_COMPONENT_TYPES,
            }
            .into());
        }

        let component_id = self.columns.len() as ComponentId;
        self.columns.push(Box::new(Column::<T>::new()));
        self.type_map.insert(type_id, component_id);
        log::debug!(
            "registered component type {} as id {}",
            type_name::<T>(),
            component_id
        );
        Ok(component_id)
    }

    /// Registers element type `T`, folding failures into the sentinel.
    ///
    /// Returns [`INVALID_COMPONENT`] when the type space is exhausted or
    /// the type cannot be stored; callers that need the cause use
    /// [`Registry::try_register`].
    pub fn register_type<T: 'static>(&mut self) -> ComponentId {
        self.try_register::<T>().unwrap_or(INVALID_COMPONENT)
    }

    /// Identifier of `T` if it has been registered.
    pub fn component_id_of<T: 'static>(&self) -> Option<ComponentId> {
        self.type_map.get(&TypeId::of::<T>()).copied()
    }

    /// Number of registered component types.
    pub fn component_count(&self) -> usize {
        self.columns.len()
    }

    /// Typed shared access to the column of `T`, if registered.
    pub fn column<T: 'static>(&self) -> Option<&Column<T>> {
        let component_id = self.component_id_of::<T>()?;
        self.columns[component_id as usize]
            .as_any()
            .downcast_ref::<Column<T>>()
    }

    /// Typed mutable access to the column of `T`, if registered.
    pub fn column_mut<T: 'static>(&mut self) -> Option<&mut Column<T>> {
        let component_id = self.component_id_of::<T>()?;
        self.columns[component_id as usize]
            .as_any_mut()
            .downcast_mut::<Column<T>>()
    }

    /// Erased access to the column behind `component_id`, if assigned.
    pub fn erased_column(&self, component_id: ComponentId) -> Option<&dyn ErasedColumn> {
        self.columns.get(component_id as usize).map(|boxed| &**boxed)
    }

    /// Erased access to the column behind `component_id`.
    ///
    /// ## Errors
    /// `UnknownComponent` when the identifier is not assigned.
    pub fn try_erased_column(
        &self,
        component_id: ComponentId,
    ) -> RegistryResult<&dyn ErasedColumn> {
        self.erased_column(component_id)
            .ok_or(RegistryError::UnknownComponent { component_id })
    }

    /// Typed shared access to the column behind `component_id`.
    ///
    /// ## Errors
    /// - `UnknownComponent` when the identifier is not assigned.
    /// - `ColumnTypeMismatch` when the column declares an element type
    ///   other than `T`.
    pub fn try_column<T: 'static>(
        &self,
        component_id: ComponentId,
    ) -> RegistryResult<&Column<T>> {
        let column = self.try_erased_column(component_id)?;
        let expected = column.type_name();
        column
            .as_any()
            .downcast_ref::<Column<T>>()
            .ok_or(RegistryError::ColumnTypeMismatch { expected, actual: type_name::<T>() })
    }

    /// Typed mutable access to the column behind `component_id`.
    ///
    /// ## Errors
    /// - `UnknownComponent` when the identifier is not assigned.
    /// - `ColumnTypeMismatch` when the column declares an element type
    ///   other than `T`.
    pub fn try_column_mut<T: 'static>(
        &mut self,
        component_id: ComponentId,
    ) -> RegistryResult<&mut Column<T>> {
        let Some(boxed) = self.columns.get_mut(component_id as usize) else {
            return Err(RegistryError::UnknownComponent { component_id });
        };
        let expected = boxed.type_name();
        boxed
            .as_any_mut()
            .downcast_mut::<Column<T>>()
            .ok_or(RegistryError::ColumnTypeMismatch { expected, actual: type_name::<T>() })
    }

    /// Among `component_ids`, the identifier of the column with the
    /// fewest elements. Ties break toward the first occurrence.
    ///
    /// Returns `None` when the list is empty or names an unassigned
    /// identifier.
    pub fn smallest_of(&self, component_ids: &[ComponentId]) -> Option<ComponentId> {
        let mut best: Option<(ComponentId, usize)> = None;
        for &component_id in component_ids {
            let len = self.erased_column(component_id)?.len();
            match best {
                Some((_, smallest)) if smallest <= len => {}
                _ => best = Some((component_id, len)),
            }
        }
        best.map(|(component_id, _)| component_id)
    }
}

impl Registry {
    /// Creates a new anonymous entity.
    ///
    /// Pops the oldest released identifier if any are queued, otherwise
    /// draws from the monotone counter.
    pub fn create_entity(&mut self) -> EntityId {
        if let Some(id) = self.free_entities.pop_front() {
            return id;
        }
        debug_assert!(self.next_entity != INVALID_ENTITY, "entity id space exhausted");
        let id = self.next_entity;
        self.next_entity += 1;
        id
    }

    /// Creates or finds the entity bound to `name`.
    ///
    /// If the name is already bound, the existing entity is returned;
    /// otherwise a fresh id is allocated and bound. A name maps to at
    /// most one entity.
    pub fn create_named(&mut self, name: &str) -> EntityId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }
        let id = self.create_entity();
        self.names.insert(name.to_owned(), id);
        id
    }

    /// Destroys an entity: removes it from every column that holds it,
    /// unbinds any name pointing at it, and releases its id for reuse.
    ///
    /// Invalid or already-released ids are ignored.
    pub fn destroy_entity(&mut self, entity: EntityId) {
        if !self.is_valid(entity) || self.free_entities.contains(&entity) {
            return;
        }
        for column in &mut self.columns {
            column.remove(entity);
        }
        self.names.retain(|_, bound| *bound != entity);
        self.free_entities.push_back(entity);
        log::debug!("destroyed entity {entity}");
    }

    /// Entity bound to `name`, or [`INVALID_ENTITY`] if unbound.
    pub fn entity_by_name(&self, name: &str) -> EntityId {
        self.names.get(name).copied().unwrap_or(INVALID_ENTITY)
    }

    /// Name bound to `entity`, if any.
    pub fn name_of(&self, entity: EntityId) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, bound)| **bound == entity)
            .map(|(name, _)| name.as_str())
    }

    /// Returns `true` if `entity` could have been issued by this
    /// registry.
    ///
    /// Without per-entity generations a destroyed-then-recycled id is
    /// indistinguishable from a live one; this check rejects the
    /// sentinel and ids never handed out.
    pub fn is_valid(&self, entity: EntityId) -> bool {
        entity != INVALID_ENTITY && entity < self.next_entity
    }
}

impl Registry {
    /// Stores the element of `entity` in the column of `T`, registering
    /// the type on first use.
    ///
    /// If `entity` already has a `T` element the value is overwritten in
    /// place; otherwise it is appended. Returns a reference to the
    /// stored element, or `None` when the component-type space is
    /// exhausted.
    pub fn insert<T: 'static>(&mut self, entity: EntityId, value: T) -> Option<&mut T> {
        let component_id = self.register_type::<T>();
        if component_id == INVALID_COMPONENT {
            return None;
        }
        let column = self
            .try_column_mut::<T>(component_id)
            .expect("column element type diverged from registration");
        if column.contains(entity) {
            column.write(entity, value)
        } else {
            Some(column.push(entity, value))
        }
    }

    /// Removes the `T` element of `entity`. No-op if `entity` has none
    /// or `T` was never registered.
    pub fn remove_component<T: 'static>(&mut self, entity: EntityId) {
        if let Some(column) = self.column_mut::<T>() {
            column.remove(entity);
        }
    }

    /// Returns `true` if `entity` has a `T` element.
    pub fn has<T: 'static>(&self, entity: EntityId) -> bool {
        self.column::<T>()
            .map_or(false, |column| column.contains(entity))
    }

    /// Shared reference to the `T` element of `entity`, if present.
    pub fn get<T: 'static>(&self, entity: EntityId) -> Option<&T> {
        self.column::<T>()?.get(entity)
    }

    /// Mutable reference to the `T` element of `entity`, if present.
    pub fn get_mut<T: 'static>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.column_mut::<T>()?.get_mut(entity)
    }

    /// Human-readable names of the component types `entity` carries.
    pub fn component_names(&self, entity: EntityId) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|column| column.contains(entity))
            .map(|column| column.type_name())
            .collect()
    }
}
