//! The [`Client`] facade composing the four primitive stores.

use std::sync::Arc;

use tracing::warn;

use tessera_chunk::{ChunkMetadata, ChunkStore, InMemoryChunkStore};
use tessera_crypto::{AddressDeriver, SigningKey};
use tessera_graph::{GraphEntry, GraphStore, History, InMemoryGraphStore};
use tessera_pad::{InMemoryPadStore, PadStore, ScratchPad, UpdateOutcome};
use tessera_pointer::{
    InMemoryPointerRegistry, Pointer, PointerMetadata, PointerRegistry,
};
use tessera_types::{Address, EntryId};

use crate::cache::{CacheStats, CachedValue, ResolveCache};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::payment::{PaymentLayer, PaymentProof};
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Single entry point to the four Tessera data types.
///
/// All collaborators are injected at construction. The client caches
/// recent chunk gets and pointer resolutions (bounded, invalidated on
/// local writes), attaches a payment proof to every write, and announces
/// accepted writes over the transport with bounded backoff retry.
///
/// Signing keys are borrowed per call for the convenience signing paths
/// and never stored.
pub struct Client {
    chunks: Arc<dyn ChunkStore>,
    pointers: Arc<dyn PointerRegistry>,
    graphs: Arc<dyn GraphStore>,
    pads: Arc<dyn PadStore>,
    transport: Arc<dyn Transport>,
    payment: Arc<dyn PaymentLayer>,
    cache: ResolveCache,
    config: ClientConfig,
}

impl Client {
    /// Build a client from explicit store and collaborator handles.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chunks: Arc<dyn ChunkStore>,
        pointers: Arc<dyn PointerRegistry>,
        graphs: Arc<dyn GraphStore>,
        pads: Arc<dyn PadStore>,
        transport: Arc<dyn Transport>,
        payment: Arc<dyn PaymentLayer>,
        config: ClientConfig,
    ) -> Self {
        let cache = ResolveCache::new(config.cache_capacity);
        Self {
            chunks,
            pointers,
            graphs,
            pads,
            transport,
            payment,
            cache,
            config,
        }
    }

    /// Build a fully in-process client: in-memory stores, loopback
    /// transport, free payment. For tests and embedding.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryChunkStore::new()),
            Arc::new(InMemoryPointerRegistry::new()),
            Arc::new(InMemoryGraphStore::new()),
            Arc::new(InMemoryPadStore::new()),
            Arc::new(crate::transport::LoopbackTransport::new()),
            Arc::new(crate::payment::FreePayment::new()),
            ClientConfig::default(),
        )
    }

    /// Current cache hit/miss counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ---------------------------------------------------------------
    // Write-path plumbing
    // ---------------------------------------------------------------

    fn pay(&self, bytes: u64) -> ClientResult<PaymentProof> {
        self.payment
            .acquire_proof(bytes)
            .map_err(|e| ClientError::PaymentRequired(e.to_string()))
    }

    /// Announce an accepted write, best-effort with bounded backoff.
    ///
    /// The local store already holds the accepted state; redelivery is
    /// safe (idempotent put/append, version/counter-gated mutation), so an
    /// exhausted retry budget is logged rather than failing the write.
    fn announce(&self, address: &Address, kind: &'static str) {
        if !self.config.announce_writes {
            return;
        }
        let policy = RetryPolicy::new(self.config.max_retries, self.config.retry_base_delay);
        let result = policy.run(|| self.transport.broadcast(address, kind.as_bytes()));
        if let Err(err) = result {
            warn!(address = %address.short_hex(), kind, error = %err, "announce failed");
        }
    }

    /// Send a request toward the peers responsible for an address,
    /// retrying transient failures under the configured policy.
    ///
    /// Unlike write announcements, a request needs the response, so an
    /// exhausted retry budget surfaces as `NetworkUnavailable` instead of
    /// being dropped.
    pub fn request(&self, address: &Address, payload: &[u8]) -> ClientResult<Vec<u8>> {
        let policy = RetryPolicy::new(self.config.max_retries, self.config.retry_base_delay);
        policy
            .run(|| self.transport.send(address, payload))
            .map_err(|e| ClientError::NetworkUnavailable(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Chunks
    // ---------------------------------------------------------------

    /// Store an immutable chunk; returns its content-derived address.
    pub fn put_chunk(&self, content: &[u8]) -> ClientResult<Address> {
        self.pay(content.len() as u64)?;
        let address = self.chunks.put(content)?;
        self.cache.invalidate(&address);
        self.announce(&address, "chunk");
        Ok(address)
    }

    /// Retrieve chunk content, served from cache when possible.
    pub fn get_chunk(&self, address: &Address) -> ClientResult<Vec<u8>> {
        if let Some(CachedValue::Chunk(content)) = self.cache.get(address) {
            return Ok(content);
        }
        let content = self.chunks.get(address)?;
        self.cache.insert(*address, CachedValue::Chunk(content.clone()));
        Ok(content)
    }

    /// Chunk metadata without content transfer.
    pub fn chunk_metadata(&self, address: &Address) -> ClientResult<ChunkMetadata> {
        Ok(self.chunks.get_metadata(address)?)
    }

    /// Store many chunks; per-item results, no cross-item atomicity.
    pub fn put_chunks(&self, contents: &[Vec<u8>]) -> Vec<ClientResult<Address>> {
        contents.iter().map(|c| self.put_chunk(c)).collect()
    }

    /// Retrieve many chunks; per-item results, no cross-item atomicity.
    pub fn get_chunks(&self, addresses: &[Address]) -> Vec<ClientResult<Vec<u8>>> {
        addresses.iter().map(|a| self.get_chunk(a)).collect()
    }

    // ---------------------------------------------------------------
    // Pointers
    // ---------------------------------------------------------------

    /// Create a pointer owned by `owner`, targeting `target`, at version 0.
    pub fn create_pointer(&self, owner: &SigningKey, target: Address) -> ClientResult<Pointer> {
        self.pay(64)?;
        let pointer = self.pointers.create(&owner.verifying_key(), target)?;
        self.cache.invalidate(&pointer.address);
        self.announce(&pointer.address, "pointer");
        Ok(pointer)
    }

    /// Compare-and-swap the pointer owned by `owner` to a new target.
    ///
    /// Signs the new state and submits it with `expected_version`. A
    /// `VersionConflict` means another writer got there first: re-read via
    /// [`Client::pointer_metadata`] and retry with the current version.
    pub fn update_pointer(
        &self,
        owner: &SigningKey,
        new_target: Address,
        expected_version: u64,
    ) -> ClientResult<Pointer> {
        let address = AddressDeriver::POINTER.derive_owner(&owner.verifying_key());
        let payload = Pointer::signing_bytes(&address, &new_target, expected_version + 1);
        let signature = owner.sign(&payload);
        self.pay(64)?;
        let pointer = self
            .pointers
            .update(&address, new_target, &signature, expected_version)?;
        self.cache.invalidate(&address);
        self.announce(&address, "pointer");
        Ok(pointer)
    }

    /// Resolve a pointer to its current target, served from cache when
    /// possible.
    pub fn resolve_pointer(&self, address: &Address) -> ClientResult<Address> {
        if let Some(CachedValue::Target(target)) = self.cache.get(address) {
            return Ok(target);
        }
        let target = self.pointers.resolve(address)?;
        self.cache.insert(*address, CachedValue::Target(target));
        Ok(target)
    }

    /// Pointer metadata: version, owner, last update time.
    pub fn pointer_metadata(&self, address: &Address) -> ClientResult<PointerMetadata> {
        Ok(self.pointers.get_metadata(address)?)
    }

    // ---------------------------------------------------------------
    // Graphs
    // ---------------------------------------------------------------

    /// Create an empty graph owned by `owner`.
    pub fn create_graph(&self, owner: &SigningKey) -> ClientResult<Address> {
        self.pay(64)?;
        let address = self.graphs.create(&owner.verifying_key())?;
        self.announce(&address, "graph");
        Ok(address)
    }

    /// Sign and append an entry to the graph owned by `owner`.
    pub fn append_graph_entry(
        &self,
        owner: &SigningKey,
        graph: &Address,
        data: &[u8],
        parents: Vec<EntryId>,
    ) -> ClientResult<EntryId> {
        let parents = GraphEntry::sort_parents(parents);
        let canonical = GraphEntry::canonical_bytes(graph, &parents, data);
        let signature = owner.sign(&canonical);
        self.pay(data.len() as u64)?;
        let id = self.graphs.append(graph, data, &parents, &signature)?;
        self.announce(graph, "graph");
        Ok(id)
    }

    /// Unordered snapshot of all entries in a graph.
    pub fn read_graph(&self, graph: &Address) -> ClientResult<Vec<GraphEntry>> {
        Ok(self.graphs.read(graph)?)
    }

    /// Topological history of an entry and its ancestors.
    pub fn graph_history(&self, graph: &Address, from: &EntryId) -> ClientResult<History> {
        Ok(self.graphs.history(graph, from)?)
    }

    /// Root entry ids of a graph.
    pub fn graph_roots(&self, graph: &Address) -> ClientResult<Vec<EntryId>> {
        Ok(self.graphs.roots(graph)?)
    }

    // ---------------------------------------------------------------
    // Scratchpads
    // ---------------------------------------------------------------

    /// Create a scratchpad owned by `owner` at counter 0.
    pub fn create_pad(
        &self,
        owner: &SigningKey,
        content_type: u64,
        initial_data: &[u8],
    ) -> ClientResult<ScratchPad> {
        self.pay(initial_data.len() as u64)?;
        let pad = self
            .pads
            .create(&owner.verifying_key(), content_type, initial_data)?;
        self.announce(&pad.address, "pad");
        Ok(pad)
    }

    /// Sign and submit a scratchpad write with a claimed counter.
    ///
    /// The outcome reports whether the write won; a lost race carries the
    /// winning version in `conflict` for inspection and retry.
    pub fn update_pad(
        &self,
        owner: &SigningKey,
        new_data: &[u8],
        claimed_counter: u64,
    ) -> ClientResult<UpdateOutcome> {
        let address = AddressDeriver::PAD.derive_owner(&owner.verifying_key());
        let payload = ScratchPad::signing_bytes(&address, claimed_counter, new_data);
        let signature = owner.sign(&payload);
        self.pay(new_data.len() as u64)?;
        let outcome = self
            .pads
            .update(&address, new_data, &signature, claimed_counter)?;
        if outcome.accepted {
            self.announce(&address, "pad");
        }
        Ok(outcome)
    }

    /// Retrieve the current version of a scratchpad.
    pub fn get_pad(&self, address: &Address) -> ClientResult<ScratchPad> {
        Ok(self.pads.get(address)?)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("cache", &self.cache.stats())
            .finish()
    }
}
