//! Error types for component-type registration and column lookup.
//!
//! This module declares the focused, composable error types surfaced by
//! the registry. Each error carries enough context to make failures
//! actionable while remaining small and cheap to pass around or convert
//! into the aggregate [`RegistryError`].
//!
//! ## Goals
//! * **Specificity:** Each error type models a single failure mode (type
//!   space exhaustion, unsupported element layout, unassigned column
//!   identifiers, mistyped column access).
//! * **Ergonomics:** All errors implement [`std::error::Error`] and
//!   [`fmt::Display`], and provide `From<T>` conversions into
//!   [`RegistryError`].
//! * **Actionability:** Structured fields (registered count vs. cap,
//!   offending type name) make logs useful without reproducing the issue.
//!
//! ## Typical flow
//! `Registry::try_register` returns [`RegistryResult`]; the sentinel
//! wrapper `Registry::register_type` folds the error into
//! `INVALID_COMPONENT` for callers that branch on identifiers rather
//! than match on error values.
//!
//! ## Display vs. Debug
//! * [`fmt::Display`] is optimized for operator logs (short, imperative
//!   phrasing).
//! * [`fmt::Debug`] (derived) retains full structure for diagnostics.

use std::fmt;

use crate::engine::types::ComponentId;

/// Result alias for fallible registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Returned when registering a component type would exceed the per-registry
/// type cap.
///
/// Component identifiers are never recycled, so once the cap is reached no
/// further types can be registered for the registry's lifetime.
///
/// ### Fields
/// * `registered` — Number of component types already registered.
/// * `cap` — Maximum number of distinct component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentLimitError {
    /// Number of component types already registered.
    pub registered: usize,

    /// Maximum number of distinct component types per registry.
    pub cap: usize,
}

impl fmt::Display for ComponentLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "component type limit reached ({} registered; cap {})",
            self.registered, self.cap
        )
    }
}

impl std::error::Error for ComponentLimitError {}

/// Returned when a component type has a layout the column storage cannot
/// hold, i.e. a zero-sized element.
///
/// Zero-sized elements would break the column's capacity accounting; tag
/// information should be carried in a field instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroSizedComponentError {
    /// Name of the offending element type.
    pub name: &'static str,
}

impl fmt::Display for ZeroSizedComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component type {} is zero-sized", self.name)
    }
}

impl std::error::Error for ZeroSizedComponentError {}

/// Aggregate error for component-type registration and column lookup.
///
/// Conversions (`From<T>`) are implemented for the low-level errors so
/// registration paths can use `?` and still return a single type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry's component-type space is exhausted.
    ComponentLimit(ComponentLimitError),

    /// The element type is zero-sized and cannot be stored.
    ZeroSized(ZeroSizedComponentError),

    /// A column lookup named an identifier no column is assigned to.
    UnknownComponent {
        /// Identifier that missed the column table.
        component_id: ComponentId,
    },

    /// A typed column lookup named a different element type than the
    /// column declares (e.g. reading a `Velocity` column as `Position`).
    ColumnTypeMismatch {
        /// Element type the column declares.
        expected: &'static str,

        /// Element type the caller requested.
        actual: &'static str,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::ComponentLimit(e) => write!(f, "{e}"),
            RegistryError::ZeroSized(e) => write!(f, "{e}"),
            RegistryError::UnknownComponent { component_id } => {
                write!(f, "component id {} is not assigned to a column", component_id)
            }
            RegistryError::ColumnTypeMismatch { expected, actual } => {
                write!(
                    f,
                    "column element type mismatch: column declares {}, caller requested {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<ComponentLimitError> for RegistryError {
    fn from(e: ComponentLimitError) -> Self { RegistryError::ComponentLimit(e) }
}

impl From<ZeroSizedComponentError> for RegistryError {
    fn from(e: ZeroSizedComponentError) -> Self { RegistryError::ZeroSized(e) }
}
