//! The [`PadStore`] trait defining the scratchpad storage interface.

use tessera_crypto::{Signature, VerifyingKey};
use tessera_types::Address;

use crate::error::PadResult;
use crate::pad::{ScratchPad, UpdateOutcome};

/// Storage backend for scratchpads.
///
/// Implementations must be thread-safe (`Send + Sync`) and must apply each
/// update atomically per address: the compare-then-replace sequence is
/// linearizable with respect to other updates of the same pad, and a
/// rejected update leaves the stored version untouched. The acceptance rule
/// (greater counter wins, equal counters resolved by byte-wise smaller
/// signature) is deterministic, so any arrival order of the same set of
/// writes converges to the same stored state.
pub trait PadStore: Send + Sync {
    /// Create a scratchpad at the owner-derived address with an initial
    /// content type and seed data, at counter 0.
    ///
    /// Fails with `AlreadyExists` if the owner already has a pad.
    fn create(
        &self,
        owner: &VerifyingKey,
        content_type: u64,
        initial_data: &[u8],
    ) -> PadResult<ScratchPad>;

    /// Submit a write with a claimed counter.
    ///
    /// The write is stored if `claimed_counter` is strictly greater than
    /// the current counter, or equal with a byte-wise smaller signature.
    /// Either way the outcome reports the counter now stored and surfaces
    /// the race loser (if any) in `conflict`. Fails with `Unauthorized`
    /// before any counter comparison if the signature does not verify.
    fn update(
        &self,
        address: &Address,
        new_data: &[u8],
        signature: &Signature,
        claimed_counter: u64,
    ) -> PadResult<UpdateOutcome>;

    /// Retrieve the current version of a pad.
    fn get(&self, address: &Address) -> PadResult<ScratchPad>;
}
