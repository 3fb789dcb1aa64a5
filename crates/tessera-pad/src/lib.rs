//! Scratchpad storage for the Tessera data network.
//!
//! A scratchpad is a mutable unstructured data slot owned by one signing
//! key: frequently updated, low-durability data where availability and
//! conflict-free merge matter more than strict serializability. It is a
//! minimal last-writer-wins register: an update is accepted when its
//! counter is strictly greater than the stored one; equal counters are
//! resolved deterministically by byte-wise signature comparison (smaller
//! wins). The losing write of a race is surfaced as a conflict result
//! carrying the winning version — never silently dropped.
//!
//! # Modules
//!
//! - [`pad`] — [`ScratchPad`] and [`UpdateOutcome`]
//! - [`error`] — Error types for scratchpad operations
//! - [`traits`] — The [`PadStore`] trait defining the storage interface
//! - [`memory`] — In-memory [`InMemoryPadStore`] for tests and embedding

pub mod error;
pub mod memory;
pub mod pad;
pub mod traits;

pub use error::{PadError, PadResult};
pub use memory::InMemoryPadStore;
pub use pad::{ScratchPad, UpdateOutcome};
pub use traits::PadStore;
