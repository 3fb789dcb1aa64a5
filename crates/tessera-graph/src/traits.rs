//! The [`GraphStore`] trait defining the graph storage interface.

use tessera_crypto::{Signature, VerifyingKey};
use tessera_types::{Address, EntryId};

use crate::dag::History;
use crate::entry::GraphEntry;
use crate::error::GraphResult;

/// Storage backend for append-only entry graphs.
///
/// Implementations must be thread-safe (`Send + Sync`) and must apply each
/// append atomically per graph: the validate-then-insert sequence is
/// linearizable with respect to other appends to the same graph, and a
/// rejected append leaves the graph untouched. Appends never remove or
/// reorder already-accepted entries.
pub trait GraphStore: Send + Sync {
    /// Create an empty graph at the owner-derived address.
    ///
    /// Fails with `AlreadyExists` if the owner already has a graph.
    fn create(&self, owner: &VerifyingKey) -> GraphResult<Address>;

    /// Append a signed entry to a graph.
    ///
    /// Fails with `UnknownParent` if any parent id is not already present,
    /// `Unauthorized` on bad signature, `NotFound` for a missing graph.
    /// Re-appending an identical entry returns the existing id.
    fn append(
        &self,
        graph: &Address,
        data: &[u8],
        parents: &[EntryId],
        signature: &Signature,
    ) -> GraphResult<EntryId>;

    /// Unordered snapshot of all entries in a graph.
    fn read(&self, graph: &Address) -> GraphResult<Vec<GraphEntry>>;

    /// Retrieve a single entry.
    fn get_entry(&self, graph: &Address, id: &EntryId) -> GraphResult<GraphEntry>;

    /// Deterministic topological history of `from` and its ancestors
    /// (parents before children, ties by entry id). Restartable: each call
    /// yields a fresh traversal.
    fn history(&self, graph: &Address, from: &EntryId) -> GraphResult<History>;

    /// Ids of all root entries of a graph, sorted.
    fn roots(&self, graph: &Address) -> GraphResult<Vec<EntryId>>;

    /// Returns `true` if the entry is present in the graph.
    fn contains_entry(&self, graph: &Address, id: &EntryId) -> GraphResult<bool>;
}
