//! Pointer registry for the Tessera data network.
//!
//! A pointer is a mutable single-target reference owned by one signing key.
//! Its address derives from the owner's public key and stays stable for the
//! object's lifetime while the target changes underneath it.
//!
//! # Consistency model
//!
//! Pointers use optimistic concurrency, not locking. Every update carries
//! the version the caller last read (`expected_version`) and a signature
//! from the owning key over the new state. An update is accepted only when
//! the expected version matches the current one; acceptance bumps the
//! version by exactly 1 and swaps the target atomically. A stale expected
//! version is a [`PointerError::VersionConflict`] — the caller re-reads and
//! retries. This converts "lost update" races into explicit, retryable
//! conflicts rather than silent overwrites.
//!
//! # Modules
//!
//! - [`error`] — Error types for pointer operations
//! - [`types`] — [`Pointer`] and [`PointerMetadata`]
//! - [`traits`] — The [`PointerRegistry`] trait defining the storage interface
//! - [`memory`] — In-memory [`InMemoryPointerRegistry`] for tests and embedding

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{PointerError, PointerResult};
pub use memory::InMemoryPointerRegistry;
pub use traits::PointerRegistry;
pub use types::{Pointer, PointerMetadata};
