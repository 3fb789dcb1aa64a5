//! Graph entry types and canonical entry-id derivation.

use serde::{Deserialize, Serialize};
use tessera_crypto::{AddressDeriver, Signature};
use tessera_types::{Address, EntryId};

/// A single signed entry in an append-only graph.
///
/// Entries are immutable once accepted. The id is derived from the graph
/// address, the (sorted) parent ids, and the data, so an entry cannot be
/// altered without changing its id and every descendant's id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEntry {
    /// Content-derived identifier of this entry.
    pub id: EntryId,
    /// Opaque payload bytes.
    pub data: Vec<u8>,
    /// Parent entry ids, sorted. Empty for root entries.
    pub parents: Vec<EntryId>,
    /// Owner signature over the canonical bytes.
    pub signature: Signature,
}

impl GraphEntry {
    /// Returns `true` if this entry has no parents (i.e., it is a root).
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Canonical bytes of an entry: graph address, sorted parent ids, data.
    ///
    /// These bytes are both the signing payload and the preimage of the
    /// entry id, so signature and id bind the same content. The parent list
    /// and the data are length-prefixed, making the encoding prefix-free:
    /// no `(parents, data)` pair shares canonical bytes with any other, so
    /// a signature cannot be replayed against a re-framed reading of the
    /// same bytes. `parents` must already be sorted (callers normalize with
    /// [`GraphEntry::sort_parents`]).
    pub fn canonical_bytes(graph: &Address, parents: &[EntryId], data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 8 + parents.len() * 32 + 8 + data.len());
        bytes.extend_from_slice(graph.as_bytes());
        bytes.extend_from_slice(&(parents.len() as u64).to_le_bytes());
        for parent in parents {
            bytes.extend_from_slice(parent.as_bytes());
        }
        bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
        bytes.extend_from_slice(data);
        bytes
    }

    /// Normalize a parent list: sort and drop duplicates.
    pub fn sort_parents(mut parents: Vec<EntryId>) -> Vec<EntryId> {
        parents.sort();
        parents.dedup();
        parents
    }

    /// Derive the entry id for the given canonical inputs.
    pub fn derive_id(graph: &Address, parents: &[EntryId], data: &[u8]) -> EntryId {
        AddressDeriver::ENTRY.derive_entry(&Self::canonical_bytes(graph, parents, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::SigningKey;

    fn graph_addr() -> Address {
        Address::from_content(b"graph")
    }

    #[test]
    fn id_is_deterministic() {
        let id1 = GraphEntry::derive_id(&graph_addr(), &[], b"data");
        let id2 = GraphEntry::derive_id(&graph_addr(), &[], b"data");
        assert_eq!(id1, id2);
    }

    #[test]
    fn id_depends_on_data() {
        let id1 = GraphEntry::derive_id(&graph_addr(), &[], b"data1");
        let id2 = GraphEntry::derive_id(&graph_addr(), &[], b"data2");
        assert_ne!(id1, id2);
    }

    #[test]
    fn id_depends_on_parents() {
        let parent = EntryId::from_hash([1; 32]);
        let id1 = GraphEntry::derive_id(&graph_addr(), &[], b"data");
        let id2 = GraphEntry::derive_id(&graph_addr(), &[parent], b"data");
        assert_ne!(id1, id2);
    }

    #[test]
    fn id_depends_on_graph_address() {
        let other = Address::from_content(b"other graph");
        let id1 = GraphEntry::derive_id(&graph_addr(), &[], b"data");
        let id2 = GraphEntry::derive_id(&other, &[], b"data");
        assert_ne!(id1, id2);
    }

    #[test]
    fn id_distinguishes_parent_edge_from_inlined_parent_bytes() {
        // A parentless entry whose data starts with a parent id's bytes
        // must not collide with the entry that actually has that parent.
        let parent = EntryId::from_hash([5; 32]);
        let mut inlined = parent.as_bytes().to_vec();
        inlined.extend_from_slice(b"x");

        assert_ne!(
            GraphEntry::canonical_bytes(&graph_addr(), &[parent], b"x"),
            GraphEntry::canonical_bytes(&graph_addr(), &[], &inlined)
        );
        assert_ne!(
            GraphEntry::derive_id(&graph_addr(), &[parent], b"x"),
            GraphEntry::derive_id(&graph_addr(), &[], &inlined)
        );
    }

    #[test]
    fn sort_parents_sorts_and_dedups() {
        let a = EntryId::from_hash([1; 32]);
        let b = EntryId::from_hash([2; 32]);
        let sorted = GraphEntry::sort_parents(vec![b, a, b]);
        assert_eq!(sorted, vec![a, b]);
    }

    #[test]
    fn serde_roundtrip() {
        let key = SigningKey::generate();
        let parents = vec![EntryId::from_hash([3; 32])];
        let bytes = GraphEntry::canonical_bytes(&graph_addr(), &parents, b"payload");
        let entry = GraphEntry {
            id: GraphEntry::derive_id(&graph_addr(), &parents, b"payload"),
            data: b"payload".to_vec(),
            parents,
            signature: key.sign(&bytes),
        };
        let encoded = bincode::serialize(&entry).unwrap();
        let decoded: GraphEntry = bincode::deserialize(&encoded).unwrap();
        assert_eq!(entry, decoded);
    }
}
