//! Client facade for the Tessera data network.
//!
//! [`Client`] is the single entry point composing the four primitive
//! stores — chunks, pointers, graphs, scratchpads — behind one API. It
//! validates and routes each operation to the owning store, caches recent
//! `get`/`resolve` results with explicit invalidation on local writes,
//! exposes batch variants with per-item results, attaches payment proofs to
//! writes, and announces accepted writes over the transport with bounded
//! exponential-backoff retry.
//!
//! Store handles are injected at construction — there are no ambient
//! singletons. The client holds no ownership of network state; it is a
//! locally-caching accessor.
//!
//! # Modules
//!
//! - [`client`] — The [`Client`] facade itself
//! - [`cache`] — Bounded resolve/get cache with write invalidation
//! - [`config`] — [`ClientConfig`] with TOML loading
//! - [`error`] — [`ClientError`] aggregating the per-store errors
//! - [`payment`] — The [`PaymentLayer`] collaborator interface
//! - [`retry`] — Bounded exponential-backoff retry policy
//! - [`transport`] — The [`Transport`] collaborator interface

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod payment;
pub mod retry;
pub mod transport;

pub use cache::{CacheStats, ResolveCache};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use payment::{FreePayment, PaymentError, PaymentLayer, PaymentProof};
pub use retry::RetryPolicy;
pub use transport::{LoopbackTransport, Transport, TransportError};

// Re-export key types so applications need only this crate.
pub use tessera_chunk::{ChunkMetadata, ChunkStore, InMemoryChunkStore};
pub use tessera_crypto::{Signature, SigningKey, VerifyingKey};
pub use tessera_graph::{GraphEntry, GraphStore, History, InMemoryGraphStore};
pub use tessera_pad::{InMemoryPadStore, PadStore, ScratchPad, UpdateOutcome};
pub use tessera_pointer::{InMemoryPointerRegistry, Pointer, PointerMetadata, PointerRegistry};
pub use tessera_types::{Address, EntryId};
