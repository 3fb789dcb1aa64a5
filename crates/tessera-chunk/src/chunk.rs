use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tessera_crypto::AddressDeriver;
use tessera_types::Address;

/// An immutable content-addressed blob.
///
/// The address is derived from the content at construction and never
/// changes; content bytes are never mutated after the address is assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Content-derived address of this chunk.
    pub address: Address,
    /// The opaque content bytes.
    pub content: Vec<u8>,
}

impl Chunk {
    /// Create a chunk from raw content, deriving its address.
    pub fn new(content: Vec<u8>) -> Self {
        let address = AddressDeriver::CHUNK.derive(&content);
        Self { address, content }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Re-derive the address from the content and compare.
    pub fn verify(&self) -> bool {
        AddressDeriver::CHUNK.validate(&self.content, &self.address)
    }
}

/// Read-only metadata about a stored chunk (no content transfer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Size of the chunk content in bytes.
    pub size: u64,
    /// When this store first accepted the chunk.
    pub stored_at: DateTime<Utc>,
}
