//! Append-only causal graph storage for the Tessera data network.
//!
//! A graph is an owner-addressed DAG of signed, content-derived entries.
//! Entry ids are hashes of the entry's own data plus its parents' ids, so
//! accepted entries are immutable and history cannot be rewritten without
//! changing every downstream id. Appends are monotonic: nothing is ever
//! removed or reordered.
//!
//! Because entry ids are content-derived, concurrent appends from writers
//! that read different tips merge automatically into a single branching
//! DAG without coordination — at the cost that readers must handle
//! branching history explicitly (there is no single guaranteed "latest"
//! entry).
//!
//! # Modules
//!
//! - [`entry`] — [`GraphEntry`] and canonical entry-id derivation
//! - [`dag`] — The per-graph arena structure and traversal algorithms
//! - [`error`] — Error types for graph operations
//! - [`traits`] — The [`GraphStore`] trait defining the storage interface
//! - [`memory`] — In-memory [`InMemoryGraphStore`] for tests and embedding

pub mod dag;
pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;

pub use dag::{Graph, History};
pub use entry::GraphEntry;
pub use error::{GraphError, GraphResult};
pub use memory::InMemoryGraphStore;
pub use traits::GraphStore;
