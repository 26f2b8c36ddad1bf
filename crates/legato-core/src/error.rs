//! Error types for the lifecycle bridge.
//!
//! ## Error Hierarchy
//!
//! ```text
//! BridgeError (top-level wrapper)
//! ├── WrapError         - native construction failed (recoverable, callers branch on it)
//! ├── AccessError       - use-after-free, wrong kind, stale reference (programmer fault)
//! └── RegistrationError - kind descriptor registration errors
//! ```
//!
//! Destroying an already destroyed handle is not an error and has no variant.

use thiserror::Error;

use crate::KindHash;

// ============================================================================
// Construction Errors
// ============================================================================

/// Errors returned by `wrap` and `wrap_by_pointer`.
///
/// A null native result is routine (file not found, display creation
/// refused), so this is returned as a value for the caller to branch on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    /// The native constructor returned null.
    #[error("cannot create object '{kind}'")]
    NullPointer { kind: String },

    /// The kind was never registered.
    #[error("unknown resource kind {hash}")]
    UnknownKind { hash: KindHash },

    /// The requested dependency has already been collected.
    #[error(
        "dependency for '{kind}' refers to a collected value (slot {index}, generation {generation})"
    )]
    DeadDependency {
        kind: String,
        index: u32,
        generation: u32,
    },
}

// ============================================================================
// Access Errors
// ============================================================================

/// Errors raised when script code hands the bridge an unusable reference.
///
/// These are faults at the host boundary: recoverable by a protected call,
/// never undefined behavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The handle is of a different kind than the operation expects.
    #[error("expected '{expected}', got '{found}'")]
    TypeMismatch { expected: String, found: String },

    /// The handle has been invalidated.
    #[error("attempt to operate on destroyed '{kind}'")]
    UseAfterFree { kind: String },

    /// The value is a plain script value, not a resource handle.
    #[error("expected a resource handle, got a script value")]
    NotAHandle,

    /// The reference outlived its slot.
    #[error("reference to a collected value (slot {index}, generation {generation})")]
    Collected { index: u32, generation: u32 },

    /// The kind was never registered.
    #[error("unknown resource kind {hash}")]
    UnknownKind { hash: KindHash },
}

impl AccessError {
    /// Returns true for faults caused by a destroyed or collected resource.
    pub fn is_dead_resource(&self) -> bool {
        matches!(
            self,
            AccessError::UseAfterFree { .. } | AccessError::Collected { .. }
        )
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering kind descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A kind with this name is already registered.
    #[error("resource kind '{name}' is already registered")]
    DuplicateKind { name: String },

    /// Kind names must be non-empty.
    #[error("resource kind name must not be empty")]
    EmptyName,
}

// ============================================================================
// Unified Error
// ============================================================================

/// Top-level error for any bridge operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Wrap(#[from] WrapError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// Result alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
