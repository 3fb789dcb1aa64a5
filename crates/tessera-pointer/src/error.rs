//! Error types for pointer operations.

use tessera_types::Address;
use thiserror::Error;

/// Errors that can occur during pointer operations.
#[derive(Debug, Error)]
pub enum PointerError {
    /// No pointer exists at this address.
    #[error("pointer not found: {0}")]
    NotFound(Address),

    /// A pointer already exists at this owner-derived address.
    #[error("pointer already exists: {0}")]
    AlreadyExists(Address),

    /// The caller's expected version is stale; re-read and retry.
    #[error("version conflict: expected {expected}, current is {current}")]
    VersionConflict { expected: u64, current: u64 },

    /// The update signature does not verify against the owning key.
    ///
    /// Authorization failures are never retried automatically.
    #[error("unauthorized: signature does not verify against owner key")]
    Unauthorized,
}

/// Convenience type alias for pointer operations.
pub type PointerResult<T> = Result<T, PointerError>;
