//! Core identifiers, sentinels, and capacity constants.
//!
//! This module defines the **fundamental types and constants** shared by
//! every layer of the engine: entity identifiers, component-type
//! identifiers, the reserved sentinel values, and the storage capacity
//! policy.
//!
//! ## Identifier model
//!
//! - An entity is a bare 32-bit identifier. There is no per-entity record;
//!   identity is the value itself. Released identifiers are recycled
//!   first-in first-out by the registry.
//! - A component type is an 8-bit identifier assigned on first use,
//!   monotonically from zero, and never recycled for the lifetime of a
//!   registry.
//!
//! ## Sentinels
//!
//! The maximum value of each identifier type is reserved as its invalid
//! marker. Lookups that miss return the sentinel rather than panicking,
//! so callers can branch without unwinding.
//!
//! ## Capacity policy
//!
//! Columns start at [`INITIAL_COLUMN_CAPACITY`] slots and double when
//! full, keeping capacity on a power-of-two progression. At most
//! [`MAX_COMPONENT_TYPES`] distinct component types can be registered per
//! registry; the identifier above the last usable one is reserved as
//! [`INVALID_COMPONENT`].

/// Bare 32-bit entity identifier.
pub type EntityId = u32;

/// Compact identifier for a registered component type.
pub type ComponentId = u8;

/// Sentinel entity identifier returned by failed name lookups.
pub const INVALID_ENTITY: EntityId = EntityId::MAX;

/// Sentinel component identifier returned when the type space is exhausted.
pub const INVALID_COMPONENT: ComponentId = ComponentId::MAX;

/// Sentinel dense-slot index returned for entities absent from a column.
pub const INVALID_SLOT: usize = usize::MAX;

/// Number of element slots a freshly created column reserves.
pub const INITIAL_COLUMN_CAPACITY: usize = 32;

/// Maximum number of distinct component types per registry.
///
/// Identifiers run `0..MAX_COMPONENT_TYPES`; the value above the last
/// usable identifier is reserved as [`INVALID_COMPONENT`].
pub const MAX_COMPONENT_TYPES: usize = (ComponentId::MAX as usize) - 1;

const _: [(); 1] = [(); INITIAL_COLUMN_CAPACITY.is_power_of_two() as usize];
const _: [(); 1] = [(); (MAX_COMPONENT_TYPES < INVALID_COMPONENT as usize) as usize];
