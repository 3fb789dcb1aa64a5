//! Error types for graph operations.

use tessera_types::{Address, EntryId};
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// No graph exists at this address.
    #[error("graph not found: {0}")]
    NotFound(Address),

    /// A graph already exists at this owner-derived address.
    #[error("graph already exists: {0}")]
    AlreadyExists(Address),

    /// The requested entry is not present in the graph.
    #[error("unknown entry: {0}")]
    UnknownEntry(EntryId),

    /// An append referenced a parent that is not present in the graph.
    #[error("unknown parent: {0}")]
    UnknownParent(EntryId),

    /// The append signature does not verify against the graph owner's key.
    ///
    /// Authorization failures are never retried automatically.
    #[error("unauthorized: signature does not verify against owner key")]
    Unauthorized,
}

/// Convenience alias for graph results.
pub type GraphResult<T> = Result<T, GraphError>;
