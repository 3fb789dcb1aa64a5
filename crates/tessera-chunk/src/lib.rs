//! Immutable content-addressed chunk storage for the Tessera data network.
//!
//! A chunk is an opaque blob whose address is a pure function of its
//! content. Identical content always produces the same address, so repeated
//! puts deduplicate automatically, and every read can be verified against
//! the address it was requested by.
//!
//! # Design Rules
//!
//! 1. Chunks are immutable once written (content-addressing guarantees this).
//! 2. `put` is idempotent: re-storing identical content is a no-op beyond
//!    the first write.
//! 3. `get` re-derives the address from the stored bytes and fails with
//!    [`ChunkError::Corrupted`] on mismatch — wrong bytes are never returned.
//! 4. Concurrent reads are always safe (chunks are immutable).
//! 5. The store never interprets chunk contents — encryption, chunking of
//!    large payloads, and manifests all happen above this layer.
//!
//! # Storage Backends
//!
//! All backends implement the [`ChunkStore`] trait:
//!
//! - [`InMemoryChunkStore`] — `HashMap`-based store for tests and embedding

pub mod chunk;
pub mod error;
pub mod memory;
pub mod traits;

pub use chunk::{Chunk, ChunkMetadata};
pub use error::{ChunkError, ChunkResult};
pub use memory::InMemoryChunkStore;
pub use traits::ChunkStore;
