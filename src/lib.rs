//! # Sparse ECS
//!
//! Embeddable sparse-set entity-component storage engine for
//! interactive applications.
//!
//! ## Design Goals
//! - Dense per-type columns for cache-friendly iteration
//! - O(1) per-entity access through a paired sparse index
//! - Multi-column joins driven by the smallest participating column
//! - In-place sorting that keeps per-entity lookups intact
//!
//! The engine is single-threaded by contract: a [`World`] and everything
//! reached through it run on the caller's thread with no internal
//! locking. Independent worlds are fully isolated.

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod engine;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (Public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use engine::world::World;

pub use engine::entity::EntityRef;

pub use engine::registry::Registry;

pub use engine::column::{
    Column,
    ErasedColumn,
};

pub use engine::view::{
    View,
    ViewSet,
};

pub use engine::error::{
    ComponentLimitError,
    RegistryError,
    RegistryResult,
    ZeroSizedComponentError,
};

pub use engine::types::{
    ComponentId,
    EntityId,
    INITIAL_COLUMN_CAPACITY,
    INVALID_COMPONENT,
    INVALID_ENTITY,
    INVALID_SLOT,
    MAX_COMPONENT_TYPES,
};

// ─────────────────────────────────────────────────────────────────────────────
// Prelude (Optional but recommended)
// ─────────────────────────────────────────────────────────────────────────────

/// Commonly used engine types.
///
/// Import with:
/// ```rust
/// use sparse_ecs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ComponentId,
        EntityId,
        EntityRef,
        Registry,
        View,
        ViewSet,
        World,
        INVALID_COMPONENT,
        INVALID_ENTITY,
    };
}
