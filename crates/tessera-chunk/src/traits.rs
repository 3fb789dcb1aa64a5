//! The [`ChunkStore`] trait defining the chunk storage interface.

use tessera_types::Address;

use crate::chunk::ChunkMetadata;
use crate::error::ChunkResult;

/// Content-addressed chunk store.
///
/// All implementations must satisfy these invariants:
/// - Chunks are immutable once written; the same content always produces
///   the same address.
/// - `put` is idempotent and deduplicating: re-storing identical content
///   returns the existing address without a duplicate write.
/// - `get` verifies integrity on read and never returns bytes that do not
///   derive to the requested address.
/// - Chunk writes require no synchronization beyond address-level dedup,
///   since identical content produces identical results in any write order.
pub trait ChunkStore: Send + Sync {
    /// Store content and return its content-derived address.
    ///
    /// If identical content is already stored, returns the existing address
    /// with no duplicate write.
    fn put(&self, content: &[u8]) -> ChunkResult<Address>;

    /// Retrieve chunk content by address.
    ///
    /// Fails with `NotFound` if absent, `Corrupted` if the stored bytes no
    /// longer derive to `address`.
    fn get(&self, address: &Address) -> ChunkResult<Vec<u8>>;

    /// Check whether a chunk exists at the given address.
    fn contains(&self, address: &Address) -> ChunkResult<bool>;

    /// Read-only metadata for a stored chunk (no content transfer).
    fn get_metadata(&self, address: &Address) -> ChunkResult<ChunkMetadata>;

    /// Store multiple chunks, applying the per-item `put` contract
    /// independently. No cross-item atomicity.
    fn put_batch(&self, contents: &[Vec<u8>]) -> Vec<ChunkResult<Address>> {
        contents.iter().map(|c| self.put(c)).collect()
    }

    /// Retrieve multiple chunks, applying the per-item `get` contract
    /// independently. No cross-item atomicity.
    fn get_batch(&self, addresses: &[Address]) -> Vec<ChunkResult<Vec<u8>>> {
        addresses.iter().map(|a| self.get(a)).collect()
    }
}
