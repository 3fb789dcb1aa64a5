use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tessera_crypto::AddressDeriver;
use tessera_types::Address;
use tracing::debug;

use crate::chunk::{Chunk, ChunkMetadata};
use crate::error::{ChunkError, ChunkResult};
use crate::traits::ChunkStore;

/// One stored chunk record: content plus first-stored timestamp.
#[derive(Clone, Debug)]
struct StoredChunk {
    content: Vec<u8>,
    stored_at: DateTime<Utc>,
}

/// In-memory, HashMap-based chunk store.
///
/// Intended for tests and embedding. All chunks are held in memory behind a
/// `RwLock` for safe concurrent access.
pub struct InMemoryChunkStore {
    chunks: RwLock<HashMap<Address, StoredChunk>>,
}

impl InMemoryChunkStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            chunks: RwLock::new(HashMap::new()),
        }
    }

    /// Number of chunks currently stored.
    pub fn len(&self) -> usize {
        self.chunks.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored chunks.
    pub fn total_bytes(&self) -> u64 {
        self.chunks
            .read()
            .expect("lock poisoned")
            .values()
            .map(|c| c.content.len() as u64)
            .sum()
    }

    /// Remove all chunks from the store.
    pub fn clear(&self) {
        self.chunks.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all chunk addresses in the store.
    pub fn all_addresses(&self) -> Vec<Address> {
        let map = self.chunks.read().expect("lock poisoned");
        let mut addrs: Vec<Address> = map.keys().copied().collect();
        addrs.sort();
        addrs
    }

    /// Overwrite the stored bytes at an address without re-deriving it.
    ///
    /// Only for corruption tests; violates the store invariant on purpose.
    #[cfg(test)]
    fn corrupt(&self, address: &Address, bytes: Vec<u8>) {
        let mut map = self.chunks.write().expect("lock poisoned");
        if let Some(stored) = map.get_mut(address) {
            stored.content = bytes;
        }
    }
}

impl Default for InMemoryChunkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStore for InMemoryChunkStore {
    fn put(&self, content: &[u8]) -> ChunkResult<Address> {
        let address = AddressDeriver::CHUNK.derive(content);
        let mut map = self.chunks.write().expect("lock poisoned");
        // Dedup short-circuit: identical content always maps to the same
        // address, so a second put is a no-op.
        map.entry(address).or_insert_with(|| {
            debug!(address = %address.short_hex(), size = content.len(), "stored chunk");
            StoredChunk {
                content: content.to_vec(),
                stored_at: Utc::now(),
            }
        });
        Ok(address)
    }

    fn get(&self, address: &Address) -> ChunkResult<Vec<u8>> {
        let map = self.chunks.read().expect("lock poisoned");
        let stored = map
            .get(address)
            .ok_or(ChunkError::NotFound(*address))?;
        // Integrity gate: rebuild the chunk and recompute its address
        // before handing bytes out.
        let chunk = Chunk::new(stored.content.clone());
        if chunk.address != *address {
            return Err(ChunkError::Corrupted {
                address: *address,
                computed: chunk.address,
            });
        }
        Ok(chunk.content)
    }

    fn contains(&self, address: &Address) -> ChunkResult<bool> {
        let map = self.chunks.read().expect("lock poisoned");
        Ok(map.contains_key(address))
    }

    fn get_metadata(&self, address: &Address) -> ChunkResult<ChunkMetadata> {
        let map = self.chunks.read().expect("lock poisoned");
        let stored = map
            .get(address)
            .ok_or(ChunkError::NotFound(*address))?;
        Ok(ChunkMetadata {
            size: stored.content.len() as u64,
            stored_at: stored.stored_at,
        })
    }
}

impl std::fmt::Debug for InMemoryChunkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryChunkStore")
            .field("chunk_count", &self.len())
            .finish()
    }
}
