//! The per-graph DAG structure and traversal algorithms.
//!
//! [`Graph`] stores entries in a `HashMap` arena keyed by entry id, with
//! parent references stored as id lists rather than live object pointers —
//! no ownership cycles. A forward-edge index (`children`) supports
//! descendant queries, and root entries are tracked separately for fast
//! enumeration.
//!
//! # Invariants
//!
//! - The graph is acyclic: an entry's id is derived from its parents' ids,
//!   so an edge back into an existing entry cannot be constructed.
//! - Every parent reference resolves to an existing entry at append time.
//! - Accepted entries are never removed or reordered.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tessera_crypto::{AddressDeriver, Signature, VerifyingKey};
use tessera_types::{Address, EntryId};
use tracing::debug;

use crate::entry::GraphEntry;
use crate::error::{GraphError, GraphResult};

/// An owner-addressed append-only DAG of signed entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Graph {
    address: Address,
    owner: VerifyingKey,
    entries: HashMap<EntryId, GraphEntry>,
    /// Forward-edge index: parent -> children.
    children: HashMap<EntryId, Vec<EntryId>>,
    roots: Vec<EntryId>,
}

impl Graph {
    /// Create an empty graph owned by `owner`, addressed by the owner key.
    pub fn new(owner: VerifyingKey) -> Self {
        let address = AddressDeriver::GRAPH.derive_owner(&owner);
        Self {
            address,
            owner,
            entries: HashMap::new(),
            children: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// The stable owner-derived address of this graph.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The key that owns this graph.
    pub fn owner(&self) -> &VerifyingKey {
        &self.owner
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the graph has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the entry is present.
    pub fn contains_entry(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    /// Retrieve an entry by id.
    pub fn get_entry(&self, id: &EntryId) -> Option<&GraphEntry> {
        self.entries.get(id)
    }

    /// Ids of all root entries (entries with no parents), sorted.
    pub fn roots(&self) -> Vec<EntryId> {
        let mut roots = self.roots.clone();
        roots.sort();
        roots
    }

    /// Ids of the direct children of an entry, sorted.
    pub fn children_of(&self, id: &EntryId) -> Vec<EntryId> {
        let mut children = self.children.get(id).cloned().unwrap_or_default();
        children.sort();
        children
    }

    /// Append a signed entry.
    ///
    /// Validates that every parent already exists and that the signature
    /// verifies against the graph owner over the canonical bytes. Because
    /// the entry id is content-derived, re-appending an identical entry is
    /// idempotent and returns the existing id (at-least-once delivery from
    /// the transport is safe).
    pub fn append(
        &mut self,
        data: &[u8],
        parents: Vec<EntryId>,
        signature: &Signature,
    ) -> GraphResult<EntryId> {
        let parents = GraphEntry::sort_parents(parents);
        for parent in &parents {
            if !self.entries.contains_key(parent) {
                return Err(GraphError::UnknownParent(*parent));
            }
        }

        let canonical = GraphEntry::canonical_bytes(&self.address, &parents, data);
        if self.owner.verify(&canonical, signature).is_err() {
            return Err(GraphError::Unauthorized);
        }

        let id = AddressDeriver::ENTRY.derive_entry(&canonical);
        if self.entries.contains_key(&id) {
            return Ok(id);
        }

        for parent in &parents {
            self.children.entry(*parent).or_default().push(id);
        }
        if parents.is_empty() {
            self.roots.push(id);
        }

        debug!(
            graph = %self.address.short_hex(),
            entry = %id.short_hex(),
            parents = parents.len(),
            "appended graph entry"
        );
        self.entries.insert(
            id,
            GraphEntry {
                id,
                data: data.to_vec(),
                parents,
                signature: signature.clone(),
            },
        );
        Ok(id)
    }

    /// Unordered snapshot of all entries.
    pub fn snapshot(&self) -> Vec<GraphEntry> {
        self.entries.values().cloned().collect()
    }

    /// Deterministic topological history of an entry: all of its ancestors
    /// plus the entry itself, parents before children, ties among
    /// independent entries broken by entry id.
    ///
    /// The traversal is side-effect free and restartable: calling this
    /// again (from any entry) yields a fresh iterator over the same state.
    pub fn history(&self, from: &EntryId) -> GraphResult<History> {
        if !self.entries.contains_key(from) {
            return Err(GraphError::UnknownEntry(*from));
        }

        // Collect the ancestor subgraph (inclusive of `from`).
        let mut subgraph = HashSet::new();
        let mut queue = VecDeque::new();
        subgraph.insert(*from);
        queue.push_back(*from);
        while let Some(current) = queue.pop_front() {
            if let Some(entry) = self.entries.get(&current) {
                for parent in &entry.parents {
                    if subgraph.insert(*parent) {
                        queue.push_back(*parent);
                    }
                }
            }
        }

        // Kahn's algorithm restricted to the subgraph, with a min-heap on
        // entry id for deterministic tie-breaking among siblings.
        let mut indegree: HashMap<EntryId, usize> = subgraph
            .iter()
            .map(|id| (*id, self.entries[id].parents.len()))
            .collect();
        let mut ready: BinaryHeap<Reverse<EntryId>> = indegree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| Reverse(*id))
            .collect();

        let mut ordered = Vec::with_capacity(subgraph.len());
        while let Some(Reverse(id)) = ready.pop() {
            ordered.push(self.entries[&id].clone());
            for child in self.children.get(&id).into_iter().flatten() {
                if let Some(deg) = indegree.get_mut(child) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push(Reverse(*child));
                    }
                }
            }
        }

        Ok(History {
            entries: ordered.into_iter(),
        })
    }
}

/// Lazy, restartable sequence of graph entries in topological order.
///
/// Produced by [`Graph::history`]; finite, and re-traversable by asking for
/// a new history from any entry.
#[derive(Debug)]
pub struct History {
    entries: std::vec::IntoIter<GraphEntry>,
}

impl Iterator for History {
    type Item = GraphEntry;

    fn next(&mut self) -> Option<GraphEntry> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for History {}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::SigningKey;

    fn signed_append(
        graph: &mut Graph,
        key: &SigningKey,
        data: &[u8],
        parents: Vec<EntryId>,
    ) -> GraphResult<EntryId> {
        let normalized = GraphEntry::sort_parents(parents);
        let canonical = GraphEntry::canonical_bytes(&graph.address(), &normalized, data);
        let sig = key.sign(&canonical);
        graph.append(data, normalized, &sig)
    }

    // -----------------------------------------------------------------------
    // Construction and appends
    // -----------------------------------------------------------------------

    #[test]
    fn new_graph_is_empty() {
        let key = SigningKey::generate();
        let graph = Graph::new(key.verifying_key());
        assert!(graph.is_empty());
        assert_eq!(
            graph.address(),
            AddressDeriver::GRAPH.derive_owner(&key.verifying_key())
        );
    }

    #[test]
    fn append_root_entry() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let id = signed_append(&mut graph, &key, b"root", vec![]).unwrap();
        assert!(graph.contains_entry(&id));
        assert_eq!(graph.roots(), vec![id]);
        assert!(graph.get_entry(&id).unwrap().is_root());
    }

    #[test]
    fn append_child_entry() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let root = signed_append(&mut graph, &key, b"root", vec![]).unwrap();
        let child = signed_append(&mut graph, &key, b"child", vec![root]).unwrap();
        assert_eq!(graph.children_of(&root), vec![child]);
        assert_eq!(graph.get_entry(&child).unwrap().parents, vec![root]);
    }

    #[test]
    fn append_with_unknown_parent_fails() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let ghost = EntryId::from_hash([9; 32]);
        let err = signed_append(&mut graph, &key, b"data", vec![ghost]).unwrap_err();
        assert!(matches!(err, GraphError::UnknownParent(p) if p == ghost));
        assert!(graph.is_empty());
    }

    #[test]
    fn append_with_wrong_key_is_unauthorized() {
        let owner = SigningKey::generate();
        let intruder = SigningKey::generate();
        let mut graph = Graph::new(owner.verifying_key());
        let canonical = GraphEntry::canonical_bytes(&graph.address(), &[], b"data");
        let sig = intruder.sign(&canonical);
        let err = graph.append(b"data", vec![], &sig).unwrap_err();
        assert!(matches!(err, GraphError::Unauthorized));
    }

    #[test]
    fn signature_does_not_transfer_to_reframed_entry() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let root = signed_append(&mut graph, &key, b"root", vec![]).unwrap();

        // Sign the honest entry: parent edge to root, payload "x".
        let canonical = GraphEntry::canonical_bytes(&graph.address(), &[root], b"x");
        let sig = key.sign(&canonical);

        // Re-frame the same bytes as a parentless entry with the parent id
        // inlined into the payload. The signature must not validate it.
        let mut inlined = root.as_bytes().to_vec();
        inlined.extend_from_slice(b"x");
        let err = graph.append(&inlined, vec![], &sig).unwrap_err();
        assert!(matches!(err, GraphError::Unauthorized));

        // The honest append still lands with its parent edge intact, and
        // history reaches the ancestor.
        let id = graph.append(b"x", vec![root], &sig).unwrap();
        assert_eq!(graph.get_entry(&id).unwrap().parents, vec![root]);
        let ids: Vec<EntryId> = graph.history(&id).unwrap().map(|e| e.id).collect();
        assert_eq!(ids, vec![root, id]);
    }

    #[test]
    fn duplicate_append_is_idempotent() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let id1 = signed_append(&mut graph, &key, b"same", vec![]).unwrap();
        let id2 = signed_append(&mut graph, &key, b"same", vec![]).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.roots().len(), 1);
    }

    #[test]
    fn accepted_entries_survive_later_appends() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let root = signed_append(&mut graph, &key, b"root", vec![]).unwrap();
        for i in 0..10u8 {
            signed_append(&mut graph, &key, &[i], vec![root]).unwrap();
            assert!(graph.contains_entry(&root));
            assert_eq!(graph.get_entry(&root).unwrap().data, b"root");
        }
        assert_eq!(graph.len(), 11);
    }

    // -----------------------------------------------------------------------
    // Branching
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_branches_coexist() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let root = signed_append(&mut graph, &key, b"root", vec![]).unwrap();
        // Two writers who both read `root` as the tip.
        let a = signed_append(&mut graph, &key, b"branch a", vec![root]).unwrap();
        let b = signed_append(&mut graph, &key, b"branch b", vec![root]).unwrap();
        assert_ne!(a, b);
        let mut children = graph.children_of(&root);
        children.sort();
        assert_eq!(children.len(), 2);
        // A merge entry can join the branches.
        let merge = signed_append(&mut graph, &key, b"merge", vec![a, b]).unwrap();
        assert_eq!(graph.get_entry(&merge).unwrap().parents.len(), 2);
    }

    // -----------------------------------------------------------------------
    // History traversal
    // -----------------------------------------------------------------------

    #[test]
    fn history_is_parents_before_children() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let e1 = signed_append(&mut graph, &key, b"data1", vec![]).unwrap();
        let e2 = signed_append(&mut graph, &key, b"data2", vec![e1]).unwrap();
        let ids: Vec<EntryId> = graph.history(&e2).unwrap().map(|e| e.id).collect();
        assert_eq!(ids, vec![e1, e2]);
    }

    #[test]
    fn history_excludes_non_ancestors() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let root = signed_append(&mut graph, &key, b"root", vec![]).unwrap();
        let a = signed_append(&mut graph, &key, b"a", vec![root]).unwrap();
        let b = signed_append(&mut graph, &key, b"b", vec![root]).unwrap();

        let ids: Vec<EntryId> = graph.history(&a).unwrap().map(|e| e.id).collect();
        assert_eq!(ids, vec![root, a]);
        assert!(!ids.contains(&b));
    }

    #[test]
    fn history_of_merge_is_deterministic_and_ordered() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let root = signed_append(&mut graph, &key, b"root", vec![]).unwrap();
        let a = signed_append(&mut graph, &key, b"a", vec![root]).unwrap();
        let b = signed_append(&mut graph, &key, b"b", vec![root]).unwrap();
        let merge = signed_append(&mut graph, &key, b"merge", vec![a, b]).unwrap();

        let ids: Vec<EntryId> = graph.history(&merge).unwrap().map(|e| e.id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(ids[0], root);
        assert_eq!(ids[3], merge);
        // Siblings ordered by entry id.
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        assert_eq!(ids[1], lo);
        assert_eq!(ids[2], hi);

        // Restartable: a second traversal yields the identical order.
        let again: Vec<EntryId> = graph.history(&merge).unwrap().map(|e| e.id).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn history_of_unknown_entry_fails() {
        let key = SigningKey::generate();
        let graph = Graph::new(key.verifying_key());
        let err = graph.history(&EntryId::from_hash([7; 32])).unwrap_err();
        assert!(matches!(err, GraphError::UnknownEntry(_)));
    }

    #[test]
    fn history_is_exact_size() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let e1 = signed_append(&mut graph, &key, b"1", vec![]).unwrap();
        let e2 = signed_append(&mut graph, &key, b"2", vec![e1]).unwrap();
        let history = graph.history(&e2).unwrap();
        assert_eq!(history.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Snapshot
    // -----------------------------------------------------------------------

    #[test]
    fn snapshot_contains_all_entries() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let e1 = signed_append(&mut graph, &key, b"1", vec![]).unwrap();
        let e2 = signed_append(&mut graph, &key, b"2", vec![e1]).unwrap();

        let snapshot = graph.snapshot();
        assert_eq!(snapshot.len(), 2);
        let ids: HashSet<EntryId> = snapshot.iter().map(|e| e.id).collect();
        assert!(ids.contains(&e1));
        assert!(ids.contains(&e2));
    }

    #[test]
    fn serde_roundtrip() {
        let key = SigningKey::generate();
        let mut graph = Graph::new(key.verifying_key());
        let e1 = signed_append(&mut graph, &key, b"1", vec![]).unwrap();
        signed_append(&mut graph, &key, b"2", vec![e1]).unwrap();

        let encoded = bincode::serialize(&graph).unwrap();
        let parsed: Graph = bincode::deserialize(&encoded).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.address(), graph.address());
    }
}
