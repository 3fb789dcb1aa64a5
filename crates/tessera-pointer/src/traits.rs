//! The [`PointerRegistry`] trait defining the pointer storage interface.

use tessera_crypto::{Signature, VerifyingKey};
use tessera_types::Address;

use crate::error::PointerResult;
use crate::types::{Pointer, PointerMetadata};

/// Storage backend for versioned pointers.
///
/// Implementations must be thread-safe (`Send + Sync`) and must apply each
/// update atomically per address: the validate-then-swap sequence is
/// linearizable with respect to other updates of the same address, and a
/// rejected or abandoned update leaves the stored record untouched. Updates
/// to different addresses are fully independent.
pub trait PointerRegistry: Send + Sync {
    /// Create a pointer at the owner-derived address, targeting
    /// `target`, at version 0.
    ///
    /// Creation is first-write-wins: fails with `AlreadyExists` if the
    /// owner already has a pointer.
    fn create(&self, owner: &VerifyingKey, target: Address) -> PointerResult<Pointer>;

    /// Compare-and-swap update of a pointer's target.
    ///
    /// Accepted iff `signature` verifies against the owning key over
    /// [`Pointer::signing_bytes`] of the new state AND `expected_version`
    /// equals the current version. On success the version becomes
    /// `expected_version + 1` and the target is swapped atomically.
    ///
    /// Fails with `VersionConflict` when `expected_version` is stale (the
    /// caller must re-read and retry) and `Unauthorized` on signature
    /// mismatch.
    fn update(
        &self,
        address: &Address,
        new_target: Address,
        signature: &Signature,
        expected_version: u64,
    ) -> PointerResult<Pointer>;

    /// Resolve a pointer to its current target (cheap read path).
    fn resolve(&self, address: &Address) -> PointerResult<Address>;

    /// Read-only metadata: version, owner, last update time.
    fn get_metadata(&self, address: &Address) -> PointerResult<PointerMetadata>;
}
