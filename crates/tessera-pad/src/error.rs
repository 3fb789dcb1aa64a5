//! Error types for scratchpad operations.
//!
//! Counter races are not errors: they are reported in
//! [`UpdateOutcome`](crate::pad::UpdateOutcome) so the caller can inspect
//! the winning version and decide to retry or merge.

use tessera_types::Address;
use thiserror::Error;

/// Errors that can occur during scratchpad operations.
#[derive(Debug, Error)]
pub enum PadError {
    /// No scratchpad exists at this address.
    #[error("scratchpad not found: {0}")]
    NotFound(Address),

    /// A scratchpad already exists at this owner-derived address.
    #[error("scratchpad already exists: {0}")]
    AlreadyExists(Address),

    /// The update signature does not verify against the owning key.
    ///
    /// Authorization failures are never retried automatically.
    #[error("unauthorized: signature does not verify against owner key")]
    Unauthorized,
}

/// Convenience alias for scratchpad results.
pub type PadResult<T> = Result<T, PadError>;
