//! Core pointer types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tessera_crypto::{Signature, VerifyingKey};
use tessera_types::Address;

/// A versioned mutable reference to a target address.
///
/// The pointer's own address derives from the owner key and never changes;
/// the target and version advance together under owner-signed updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pointer {
    /// Owner-derived address of this pointer (stable for its lifetime).
    pub address: Address,
    /// The key that owns this pointer; only it can authorize updates.
    pub owner: VerifyingKey,
    /// The address this pointer currently resolves to.
    pub target: Address,
    /// Strictly increasing version counter, 0 on creation.
    pub version: u64,
    /// Signature over the current (target, version) state.
    ///
    /// `None` only at version 0: creation establishes ownership by claiming
    /// the owner-derived address, so the initial state carries no signature.
    pub signature: Option<Signature>,
}

impl Pointer {
    /// Canonical bytes signed by a pointer update.
    ///
    /// Covers the pointer address, the new target, and the new version so a
    /// signature cannot be replayed against another pointer, target, or
    /// version.
    pub fn signing_bytes(address: &Address, target: &Address, version: u64) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 + 32 + 8);
        bytes.extend_from_slice(address.as_bytes());
        bytes.extend_from_slice(target.as_bytes());
        bytes.extend_from_slice(&version.to_le_bytes());
        bytes
    }
}

/// Read-only metadata about a pointer (no target resolution).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointerMetadata {
    /// Current version counter.
    pub version: u64,
    /// The owning key.
    pub owner: VerifyingKey,
    /// When the pointer last changed (creation time at version 0).
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_crypto::SigningKey;

    #[test]
    fn signing_bytes_bind_all_fields() {
        let a1 = Address::from_content(b"addr1");
        let a2 = Address::from_content(b"addr2");
        let t = Address::from_content(b"target");

        let base = Pointer::signing_bytes(&a1, &t, 1);
        assert_ne!(base, Pointer::signing_bytes(&a2, &t, 1));
        assert_ne!(base, Pointer::signing_bytes(&a1, &a2, 1));
        assert_ne!(base, Pointer::signing_bytes(&a1, &t, 2));
    }

    #[test]
    fn serde_roundtrip() {
        let sk = SigningKey::generate();
        let address = Address::from_content(b"ptr");
        let target = Address::from_content(b"tgt");
        let pointer = Pointer {
            address,
            owner: sk.verifying_key(),
            target,
            version: 3,
            signature: Some(sk.sign(&Pointer::signing_bytes(&address, &target, 3))),
        };
        let json = serde_json::to_string(&pointer).unwrap();
        let parsed: Pointer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, 3);
        assert_eq!(parsed.target, target);
        assert_eq!(parsed.owner, pointer.owner);
    }
}
