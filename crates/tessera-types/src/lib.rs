//! Foundation types for the Tessera data network.
//!
//! This crate provides the core identifier types used throughout Tessera.
//! Every other Tessera crate depends on `tessera-types`.
//!
//! # Key Types
//!
//! - [`Address`] — Fixed-size network address (BLAKE3 hash), naming every
//!   stored object: content-derived for immutable chunks, owner-key-derived
//!   for mutable objects (pointers, graphs, scratchpads)
//! - [`EntryId`] — Content-addressed identifier of a single graph entry

pub mod address;
pub mod error;

pub use address::{Address, EntryId};
pub use error::TypeError;
