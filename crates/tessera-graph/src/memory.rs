//! In-memory graph store for testing and ephemeral use.
//!
//! [`InMemoryGraphStore`] keeps one [`Graph`] arena per owner-derived
//! address in a `HashMap` behind a `RwLock`. Appends run fully under the
//! write lock, making each per-graph append atomic.

use std::collections::HashMap;
use std::sync::RwLock;

use tessera_crypto::{AddressDeriver, Signature, VerifyingKey};
use tessera_types::{Address, EntryId};
use tracing::debug;

use crate::dag::{Graph, History};
use crate::entry::GraphEntry;
use crate::error::{GraphError, GraphResult};
use crate::traits::GraphStore;

/// An in-memory implementation of [`GraphStore`].
///
/// All data lives in a `HashMap` behind a `RwLock`. Data is lost when the
/// store is dropped.
pub struct InMemoryGraphStore {
    graphs: RwLock<HashMap<Address, Graph>>,
}

impl InMemoryGraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            graphs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of graphs currently stored.
    pub fn len(&self) -> usize {
        self.graphs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no graphs are stored.
    pub fn is_empty(&self) -> bool {
        self.graphs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for InMemoryGraphStore {
    fn create(&self, owner: &VerifyingKey) -> GraphResult<Address> {
        let address = AddressDeriver::GRAPH.derive_owner(owner);
        let mut graphs = self.graphs.write().expect("lock poisoned");
        if graphs.contains_key(&address) {
            return Err(GraphError::AlreadyExists(address));
        }
        debug!(address = %address.short_hex(), "created graph");
        graphs.insert(address, Graph::new(owner.clone()));
        Ok(address)
    }

    fn append(
        &self,
        graph: &Address,
        data: &[u8],
        parents: &[EntryId],
        signature: &Signature,
    ) -> GraphResult<EntryId> {
        let mut graphs = self.graphs.write().expect("lock poisoned");
        let g = graphs.get_mut(graph).ok_or(GraphError::NotFound(*graph))?;
        g.append(data, parents.to_vec(), signature)
    }

    fn read(&self, graph: &Address) -> GraphResult<Vec<GraphEntry>> {
        let graphs = self.graphs.read().expect("lock poisoned");
        let g = graphs.get(graph).ok_or(GraphError::NotFound(*graph))?;
        Ok(g.snapshot())
    }

    fn get_entry(&self, graph: &Address, id: &EntryId) -> GraphResult<GraphEntry> {
        let graphs = self.graphs.read().expect("lock poisoned");
        let g = graphs.get(graph).ok_or(GraphError::NotFound(*graph))?;
        g.get_entry(id)
            .cloned()
            .ok_or(GraphError::UnknownEntry(*id))
    }

    fn history(&self, graph: &Address, from: &EntryId) -> GraphResult<History> {
        let graphs = self.graphs.read().expect("lock poisoned");
        let g = graphs.get(graph).ok_or(GraphError::NotFound(*graph))?;
        g.history(from)
    }

    fn roots(&self, graph: &Address) -> GraphResult<Vec<EntryId>> {
        let graphs = self.graphs.read().expect("lock poisoned");
        let g = graphs.get(graph).ok_or(GraphError::NotFound(*graph))?;
        Ok(g.roots())
    }

    fn contains_entry(&self, graph: &Address, id: &EntryId) -> GraphResult<bool> {
        let graphs = self.graphs.read().expect("lock poisoned");
        let g = graphs.get(graph).ok_or(GraphError::NotFound(*graph))?;
        Ok(g.contains_entry(id))
    }
}

impl std::fmt::Debug for InMemoryGraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryGraphStore")
            .field("graph_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::SigningKey;

    fn append_signed(
        store: &InMemoryGraphStore,
        graph: &Address,
        key: &SigningKey,
        data: &[u8],
        parents: Vec<EntryId>,
    ) -> GraphResult<EntryId> {
        let normalized = GraphEntry::sort_parents(parents);
        let canonical = GraphEntry::canonical_bytes(graph, &normalized, data);
        let sig = key.sign(&canonical);
        store.append(graph, data, &normalized, &sig)
    }

    #[test]
    fn create_and_append() {
        let store = InMemoryGraphStore::new();
        let key = SigningKey::generate();
        let graph = store.create(&key.verifying_key()).unwrap();

        let e1 = append_signed(&store, &graph, &key, b"data1", vec![]).unwrap();
        let e2 = append_signed(&store, &graph, &key, b"data2", vec![e1]).unwrap();

        assert!(store.contains_entry(&graph, &e1).unwrap());
        assert!(store.contains_entry(&graph, &e2).unwrap());
        assert_eq!(store.read(&graph).unwrap().len(), 2);
    }

    #[test]
    fn create_twice_fails() {
        let store = InMemoryGraphStore::new();
        let key = SigningKey::generate();
        store.create(&key.verifying_key()).unwrap();
        let err = store.create(&key.verifying_key()).unwrap_err();
        assert!(matches!(err, GraphError::AlreadyExists(_)));
    }

    #[test]
    fn append_to_missing_graph_fails() {
        let store = InMemoryGraphStore::new();
        let key = SigningKey::generate();
        let ghost = Address::from_content(b"no graph");
        let err = append_signed(&store, &ghost, &key, b"data", vec![]).unwrap_err();
        assert!(matches!(err, GraphError::NotFound(_)));
    }

    #[test]
    fn history_via_store() {
        let store = InMemoryGraphStore::new();
        let key = SigningKey::generate();
        let graph = store.create(&key.verifying_key()).unwrap();
        let e1 = append_signed(&store, &graph, &key, b"data1", vec![]).unwrap();
        let e2 = append_signed(&store, &graph, &key, b"data2", vec![e1]).unwrap();

        let ids: Vec<EntryId> = store.history(&graph, &e2).unwrap().map(|e| e.id).collect();
        assert_eq!(ids, vec![e1, e2]);
    }

    #[test]
    fn get_entry_returns_stored_data() {
        let store = InMemoryGraphStore::new();
        let key = SigningKey::generate();
        let graph = store.create(&key.verifying_key()).unwrap();
        let id = append_signed(&store, &graph, &key, b"payload", vec![]).unwrap();
        let entry = store.get_entry(&graph, &id).unwrap();
        assert_eq!(entry.data, b"payload");
    }

    #[test]
    fn roots_via_store() {
        let store = InMemoryGraphStore::new();
        let key = SigningKey::generate();
        let graph = store.create(&key.verifying_key()).unwrap();
        let root = append_signed(&store, &graph, &key, b"root", vec![]).unwrap();
        append_signed(&store, &graph, &key, b"child", vec![root]).unwrap();
        assert_eq!(store.roots(&graph).unwrap(), vec![root]);
    }

    #[test]
    fn concurrent_appends_all_land() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryGraphStore::new());
        let key = Arc::new(SigningKey::generate());
        let graph = store.create(&key.verifying_key()).unwrap();
        let root = append_signed(&store, &graph, &key, b"root", vec![]).unwrap();

        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = Arc::clone(&store);
                let key = Arc::clone(&key);
                thread::spawn(move || {
                    let canonical = GraphEntry::canonical_bytes(&graph, &[root], &[i]);
                    let sig = key.sign(&canonical);
                    store.append(&graph, &[i], &[root], &sig).unwrap()
                })
            })
            .collect();

        let ids: Vec<EntryId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(store.read(&graph).unwrap().len(), 9);
        for id in ids {
            assert!(store.contains_entry(&graph, &id).unwrap());
        }
    }
}
