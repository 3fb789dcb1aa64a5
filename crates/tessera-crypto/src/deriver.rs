use tessera_types::{Address, EntryId};

use crate::signer::VerifyingKey;

/// Domain-separated BLAKE3 address deriver.
///
/// Each deriver carries a domain tag (e.g. `"tessera-chunk-v1"`) that is
/// prepended to every hash computation. This prevents cross-type address
/// collisions: a chunk and a scratchpad with identical bytes produce
/// different addresses, and one key can own a pointer, a graph, and a pad
/// without the three mutable addresses colliding.
///
/// Derivation is pure and deterministic; `validate` is the sole integrity
/// gate before any store accepts data.
pub struct AddressDeriver {
    domain: &'static str,
}

impl AddressDeriver {
    /// Deriver for immutable chunks (content-addressed).
    pub const CHUNK: Self = Self {
        domain: "tessera-chunk-v1",
    };
    /// Deriver for pointer addresses (owner-key-addressed).
    pub const POINTER: Self = Self {
        domain: "tessera-pointer-v1",
    };
    /// Deriver for graph addresses (owner-key-addressed).
    pub const GRAPH: Self = Self {
        domain: "tessera-graph-v1",
    };
    /// Deriver for scratchpad addresses (owner-key-addressed).
    pub const PAD: Self = Self {
        domain: "tessera-pad-v1",
    };
    /// Deriver for graph entry ids (content + parents).
    pub const ENTRY: Self = Self {
        domain: "tessera-entry-v1",
    };

    /// Create a deriver with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Derive a content address with domain separation.
    pub fn derive(&self, data: &[u8]) -> Address {
        Address::from_hash(self.hash(data))
    }

    /// Derive the stable address of a mutable object from its owner key.
    ///
    /// The address is a function of the public key and the deriver's domain
    /// only, so it never changes as the object's content changes.
    pub fn derive_owner(&self, owner: &VerifyingKey) -> Address {
        Address::from_hash(self.hash(&owner.as_bytes()))
    }

    /// Derive a graph entry id from the entry's canonical bytes.
    pub fn derive_entry(&self, data: &[u8]) -> EntryId {
        EntryId::from_hash(self.hash(data))
    }

    /// Verify that `data` derives to the expected address.
    pub fn validate(&self, data: &[u8], expected: &Address) -> bool {
        self.derive(data) == *expected
    }

    /// Verify that `owner` derives to the expected mutable address.
    pub fn validate_owner(&self, owner: &VerifyingKey, expected: &Address) -> bool {
        self.derive_owner(owner) == *expected
    }

    /// The domain tag used by this deriver.
    pub fn domain(&self) -> &str {
        self.domain
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }
}
