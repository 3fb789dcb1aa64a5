use tessera_types::Address;

/// Errors from chunk store operations.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    /// The requested chunk was not found.
    #[error("chunk not found: {0}")]
    NotFound(Address),

    /// Stored content no longer derives to its address (data corruption).
    ///
    /// Integrity failures are never retried automatically — they indicate
    /// corruption and must surface to the caller.
    #[error("corrupted chunk at {address}: content derives to {computed}")]
    Corrupted {
        address: Address,
        computed: Address,
    },

}

/// Result alias for chunk store operations.
pub type ChunkResult<T> = Result<T, ChunkError>;
