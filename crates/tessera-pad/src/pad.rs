//! Core scratchpad types.

use serde::{Deserialize, Serialize};
use tessera_crypto::Signature;
use tessera_types::Address;

/// A mutable unstructured data slot resolved by update counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScratchPad {
    /// Owner-derived address of this pad (stable for its lifetime).
    pub address: Address,
    /// Caller-chosen tag describing how `data` is encoded. Fixed at
    /// creation; the store never interprets it.
    pub content_type: u64,
    /// The opaque payload bytes.
    pub data: Vec<u8>,
    /// Strictly increasing update counter, 0 on creation.
    pub update_counter: u64,
    /// Signature over the current (counter, data) state.
    ///
    /// `None` only for the creation state at counter 0: creation
    /// establishes ownership by claiming the owner-derived address.
    pub signature: Option<Signature>,
}

impl ScratchPad {
    /// Canonical bytes signed by a scratchpad update.
    ///
    /// Covers the pad address, the claimed counter, and the new data so a
    /// signature cannot be replayed against another pad or counter.
    pub fn signing_bytes(address: &Address, counter: u64, data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 8 + data.len());
        bytes.extend_from_slice(address.as_bytes());
        bytes.extend_from_slice(&counter.to_le_bytes());
        bytes.extend_from_slice(data);
        bytes
    }
}

/// Result of a scratchpad update.
///
/// A rejected update is not an error: the race loser receives the winning
/// (stored) version in `conflict` and can re-read, merge, and retry with a
/// higher counter. An accepted tie-break win also carries the superseded
/// version in `conflict`, so no concurrent write is ever dropped silently.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// Whether the submitted write is now the stored version.
    pub accepted: bool,
    /// The counter of the stored version after this operation.
    pub current_counter: u64,
    /// The version that lost the race, if there was one: the previously
    /// stored pad when the write was accepted over a tie, or the winning
    /// stored pad when the write was rejected.
    pub conflict: Option<ScratchPad>,
}
