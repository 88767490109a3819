//! Dense component columns with a paired sparse index.
//!
//! A [`Column`] stores every live element of one component type in a
//! contiguous dense array, together with two bidirectional mappings:
//! a dense array of entity identifiers (slot → entity) and a sparse map
//! (entity → slot). The pair behaves as a single logical data structure:
//! every mutation updates both sides or neither.
//!
//! ## Purpose
//! Columns are the storage substrate of the engine. The registry owns one
//! column per registered component type behind the type-erased
//! [`ErasedColumn`] trait; typed access is re-established by downcasting
//! through `as_any` at the dispatch layer.
//!
//! ## Design
//! - Elements live in a `Vec<T>` whose capacity is managed explicitly:
//!   columns start at [`INITIAL_COLUMN_CAPACITY`] slots and double when
//!   full, so capacity stays on a power-of-two progression.
//! - Removal is swap-remove: the last element fills the hole, preserving
//!   density but not relative order.
//! - An in-place quicksort reorders elements while updating the sparse
//!   index per swap, so the mappings never disagree mid-sort.
//!
//! ## Invariants
//! After every operation:
//! - `len == entities.len() == slots.len()`.
//! - `slots[entities[i]] == i` for every live slot `i`.
//! - `entities[slots[e]] == e` for every entity `e` in the column.
//! - `capacity >= len`, and capacity is a power-of-two progression from
//!   the initial capacity.
//!
//! ## Concurrency
//! Columns are single-threaded. No operation suspends; every call runs to
//! completion on the caller's thread.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::engine::types::{EntityId, INITIAL_COLUMN_CAPACITY, INVALID_SLOT};

/// Type-erased surface of a component column.
///
/// The registry stores columns as `Box<dyn ErasedColumn>` so it can route
/// untyped operations (presence probes, removal, destruction sweeps)
/// without knowing element types. Typed operations downcast through
/// [`ErasedColumn::as_any`] / [`ErasedColumn::as_any_mut`].
pub trait ErasedColumn: Any {
    /// Number of live elements in the column.
    fn len(&self) -> usize;

    /// Returns `true` if the column holds no elements.
    fn is_empty(&self) -> bool;

    /// Human-readable name of the element type.
    fn type_name(&self) -> &'static str;

    /// Runtime identity token of the element type.
    fn element_type_id(&self) -> TypeId;

    /// Returns `true` if `entity` has an element in this column.
    fn contains(&self, entity: EntityId) -> bool;

    /// Swap-removes the element of `entity`, if present.
    ///
    /// Returns `true` if an element was removed.
    fn remove(&mut self, entity: EntityId) -> bool;

    /// Entity occupying dense slot `slot`, if in bounds.
    fn entity_at(&self, slot: usize) -> Option<EntityId>;

    /// Dense array of entity identifiers, in slot order.
    fn entities(&self) -> &[EntityId];

    /// Returns `true` if the sorted hint is set.
    fn is_sorted(&self) -> bool;

    /// Clears the sorted hint, forcing the next sort to run.
    fn clear_sorted(&mut self);

    /// Upcast for typed downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense, contiguous storage for all live elements of one component type.
///
/// ## Purpose
/// `Column<T>` packs the elements of every entity carrying `T` into one
/// contiguous array for sequential scans, while the paired sparse map
/// gives O(1) per-entity access.
///
/// ## Invariants
/// - `data.len() == entities.len() == slots.len()`.
/// - `slots[entities[i]] == i` for all `i < data.len()`.
/// - `entities[slots[e]] == e` for all `(e, _)` in `slots`.
/// - `capacity >= data.len()`; capacity doubles from the initial value
///   and never shrinks.
///
/// ## Sorted hint
/// `sorted` is `true` only if the last mutation was a completed sort.
/// Inserting, overwriting, and removing clear it; handing out a mutable
/// element reference cannot be tracked and is the caller's
/// responsibility.
pub struct Column<T> {
    data: Vec<T>,
    entities: Vec<EntityId>,
    slots: HashMap<EntityId, usize>,
    capacity: usize,
    sorted: bool,
}

impl<T: 'static> Default for Column<T> {
    fn default() -> Self { Self::new() }
}

impl<T: 'static> Column<T> {
    /// Creates an empty column with the initial capacity reserved.
    pub fn new() -> Self {
        log::debug!(
            "allocating column for {} ({} slots)",
            type_name::<T>(),
            INITIAL_COLUMN_CAPACITY
        );
        Self {
            data: Vec::with_capacity(INITIAL_COLUMN_CAPACITY),
            entities: Vec::with_capacity(INITIAL_COLUMN_CAPACITY),
            slots: HashMap::new(),
            capacity: INITIAL_COLUMN_CAPACITY,
            sorted: false,
        }
    }

    /// Doubles capacity when the column is full.
    fn ensure_capacity(&mut self) {
        if self.data.len() < self.capacity {
            return;
        }
        let grown = self.capacity * 2;
        self.data.reserve_exact(grown - self.data.len());
        self.entities.reserve_exact(grown - self.entities.len());
        log::debug!(
            "growing column for {} from {} to {} slots",
            type_name::<T>(),
            self.capacity,
            grown
        );
        self.capacity = grown;
    }

    /// Appends the element of a new entity and returns a reference to it.
    ///
    /// ## Behavior
    /// - Grows storage when full.
    /// - Records `entity` in both the dense and sparse mappings.
    /// - Clears the sorted hint.
    ///
    /// ## Preconditions
    /// `entity` must not already be present; this is debug-asserted. The
    /// dispatch layer routes insertions for present entities to
    /// [`Column::write`] instead.
    pub fn push(&mut self, entity: EntityId, value: T) -> &mut T {
        debug_assert!(
            !self.slots.contains_key(&entity),
            "entity {entity} already present in column for {}",
            type_name::<T>()
        );

        self.ensure_capacity();
        let slot = self.data.len();
        self.slots.insert(entity, slot);
        self.entities.push(entity);
        self.data.push(value);
        self.sorted = false;
        &mut self.data[slot]
    }

    /// Overwrites the element of a present entity in place.
    ///
    /// Returns a reference to the stored element, or `None` if `entity`
    /// is absent. Clears the sorted hint: the new value may break a
    /// previously established order.
    pub fn write(&mut self, entity: EntityId, value: T) -> Option<&mut T> {
        let slot = *self.slots.get(&entity)?;
        self.data[slot] = value;
        self.sorted = false;
        Some(&mut self.data[slot])
    }

    /// Returns `true` if `entity` has an element in this column.
    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Shared reference to the element of `entity`, if present.
    #[inline]
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        let slot = *self.slots.get(&entity)?;
        self.data.get(slot)
    }

    /// Mutable reference to the element of `entity`, if present.
    ///
    /// ## Notes
    /// Mutating the element through the returned reference cannot be
    /// tracked, so the sorted hint is left untouched; callers that break
    /// an established order must clear it via [`Column::set_sorted`].
    #[inline]
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        let slot = *self.slots.get(&entity)?;
        self.data.get_mut(slot)
    }

    /// Swap-removes the element of `entity`.
    ///
    /// ## Behavior
    /// The last element fills the vacated slot and both mappings are
    /// updated for the moved entity, preserving density but not relative
    /// order. Clears the sorted hint. Returns `true` if an element was
    /// removed.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        let Some(slot) = self.slots.remove(&entity) else {
            return false;
        };

        let last = self.data.len() - 1;
        if slot != last {
            self.data.swap(slot, last);
            self.entities.swap(slot, last);
            let moved = self.entities[slot];
            self.slots.insert(moved, slot);
        }

        self.data.pop();
        self.entities.pop();
        self.sorted = false;
        true
    }

    /// Swaps the elements at dense slots `a` and `b`, keeping both
    /// mappings consistent.
    ///
    /// Used by the in-place sort; every reorder step goes through here so
    /// the sparse index never disagrees with the dense array.
    ///
    /// ## Panics
    /// Panics if `a` or `b` is out of bounds.
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.data.swap(a, b);
        self.entities.swap(a, b);
        self.slots.insert(self.entities[a], a);
        self.slots.insert(self.entities[b], b);
    }

    /// Sorts the column in place under a caller-supplied strict order.
    ///
    /// ## Behavior
    /// - `cmp(a, b)` returns `true` when `a` must precede `b`.
    /// - Uses an in-place quicksort with last-element pivots; every swap
    ///   routes through [`Column::swap_slots`], so per-entity lookups
    ///   stay correct throughout.
    /// - The sort is unstable: equal elements may be reordered.
    /// - Skips work when the sorted hint is set or fewer than two
    ///   elements are present; sets the hint on completion.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.sorted || self.data.len() < 2 {
            return;
        }
        let hi = self.data.len() - 1;
        self.quicksort(0, hi, &mut cmp);
        self.sorted = true;
    }

    fn quicksort<F>(&mut self, lo: usize, hi: usize, cmp: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        if lo >= hi {
            return;
        }
        let pivot = self.partition(lo, hi, cmp);
        if pivot > lo {
            self.quicksort(lo, pivot - 1, cmp);
        }
        self.quicksort(pivot + 1, hi, cmp);
    }

    /// Partitions `[lo, hi]` around the element at `hi`.
    fn partition<F>(&mut self, lo: usize, hi: usize, cmp: &mut F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut store = lo;
        for probe in lo..hi {
            if cmp(&self.data[probe], &self.data[hi]) {
                self.swap_slots(store, probe);
                store += 1;
            }
        }
        self.swap_slots(store, hi);
        store
    }

    /// Number of live elements in the column.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the column holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dense slot of `entity`, or [`INVALID_SLOT`] if absent.
    #[inline]
    pub fn slot_of(&self, entity: EntityId) -> usize {
        self.slots.get(&entity).copied().unwrap_or(INVALID_SLOT)
    }

    /// Entity occupying dense slot `slot`, if in bounds.
    #[inline]
    pub fn entity_at(&self, slot: usize) -> Option<EntityId> {
        self.entities.get(slot).copied()
    }

    /// Dense array of entity identifiers, in slot order.
    #[inline]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Dense element slice, in slot order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable dense element slice, in slot order.
    ///
    /// ## Notes
    /// Like [`Column::get_mut`], mutations through the slice are not
    /// tracked against the sorted hint.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates `(entity, element)` pairs in dense slot order.
    ///
    /// This is a guaranteed sequential-memory scan over the element
    /// array.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entities.iter().copied().zip(self.data.iter())
    }

    /// Iterates `(entity, element)` pairs mutably in dense slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entities.iter().copied().zip(self.data.iter_mut())
    }

    /// Drops every element and mapping entry, keeping reserved capacity.
    pub fn clear(&mut self) {
        self.data.clear();
        self.entities.clear();
        self.slots.clear();
        self.sorted = false;
    }

    /// Number of element slots currently reserved.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the sorted hint is set.
    ///
    /// The hint is `true` only when the last mutation was a completed
    /// sort; [`Column::sort_by`] short-circuits while it holds.
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Overrides the sorted hint.
    ///
    /// Callers that mutate elements through [`Column::get_mut`] or
    /// [`Column::as_mut_slice`] can clear the hint here to force the next
    /// sort to run.
    #[inline]
    pub fn set_sorted(&mut self, sorted: bool) {
        self.sorted = sorted;
    }
}

impl<T: 'static> ErasedColumn for Column<T> {
    fn len(&self) -> usize { Column::len(self) }

    fn is_empty(&self) -> bool { Column::is_empty(self) }

    fn type_name(&self) -> &'static str { type_name::<T>() }

    fn element_type_id(&self) -> TypeId { TypeId::of::<T>() }

    fn contains(&self, entity: EntityId) -> bool { Column::contains(self, entity) }

    fn remove(&mut self, entity: EntityId) -> bool { Column::remove(self, entity) }

    fn entity_at(&self, slot: usize) -> Option<EntityId> {
        Column::entity_at(self, slot)
    }

    fn entities(&self) -> &[EntityId] { Column::entities(self) }

    fn is_sorted(&self) -> bool { Column::is_sorted(self) }

    fn clear_sorted(&mut self) { self.sorted = false; }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}
