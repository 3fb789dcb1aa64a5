//! Error types for client operations.
//!
//! The client aggregates the per-store errors and adds the two failure
//! modes owned by the facade boundary: missing payment proofs and
//! exhausted-network transients. Integrity and authorization failures from
//! the stores pass through untouched and are never retried here; version
//! and counter conflicts are for the caller's optimistic-concurrency loop.

use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Chunk store failure.
    #[error(transparent)]
    Chunk(#[from] tessera_chunk::ChunkError),

    /// Pointer registry failure.
    #[error(transparent)]
    Pointer(#[from] tessera_pointer::PointerError),

    /// Graph store failure.
    #[error(transparent)]
    Graph(#[from] tessera_graph::GraphError),

    /// Scratchpad store failure.
    #[error(transparent)]
    Pad(#[from] tessera_pad::PadError),

    /// The payment layer declined to supply a proof for this write.
    #[error("payment required: {0}")]
    PaymentRequired(String),

    /// The network is unreachable after bounded retries (transient;
    /// eligible for caller retry).
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;
