//! In-memory pointer registry for testing and ephemeral use.
//!
//! [`InMemoryPointerRegistry`] keeps all pointer records in a `HashMap`
//! behind a `RwLock`. The whole validate-then-swap sequence of an update
//! runs under the write lock, which makes each per-address update atomic
//! and linearizable with respect to concurrent updates of the same address.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tessera_crypto::{AddressDeriver, Signature, VerifyingKey};
use tessera_types::Address;
use tracing::debug;

use crate::error::{PointerError, PointerResult};
use crate::traits::PointerRegistry;
use crate::types::{Pointer, PointerMetadata};

#[derive(Clone, Debug)]
struct PointerRecord {
    owner: VerifyingKey,
    target: Address,
    version: u64,
    signature: Option<Signature>,
    last_updated: DateTime<Utc>,
}

impl PointerRecord {
    fn to_pointer(&self, address: Address) -> Pointer {
        Pointer {
            address,
            owner: self.owner.clone(),
            target: self.target,
            version: self.version,
            signature: self.signature.clone(),
        }
    }
}

/// An in-memory implementation of [`PointerRegistry`].
///
/// All data lives in a `HashMap` behind a `RwLock`. Data is lost when the
/// registry is dropped.
pub struct InMemoryPointerRegistry {
    records: RwLock<HashMap<Address, PointerRecord>>,
}

impl InMemoryPointerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of pointers currently registered.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryPointerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerRegistry for InMemoryPointerRegistry {
    fn create(&self, owner: &VerifyingKey, target: Address) -> PointerResult<Pointer> {
        let address = AddressDeriver::POINTER.derive_owner(owner);
        let mut records = self.records.write().expect("lock poisoned");
        if records.contains_key(&address) {
            return Err(PointerError::AlreadyExists(address));
        }
        let record = PointerRecord {
            owner: owner.clone(),
            target,
            version: 0,
            signature: None,
            last_updated: Utc::now(),
        };
        debug!(address = %address.short_hex(), target = %target.short_hex(), "created pointer");
        let pointer = record.to_pointer(address);
        records.insert(address, record);
        Ok(pointer)
    }

    fn update(
        &self,
        address: &Address,
        new_target: Address,
        signature: &Signature,
        expected_version: u64,
    ) -> PointerResult<Pointer> {
        let mut records = self.records.write().expect("lock poisoned");
        let record = records
            .get_mut(address)
            .ok_or(PointerError::NotFound(*address))?;

        // Stale expected version is a conflict, not an overwrite. Checked
        // before the signature so a racing caller gets the retryable error.
        if expected_version != record.version {
            return Err(PointerError::VersionConflict {
                expected: expected_version,
                current: record.version,
            });
        }

        // The signature covers the state being written: new target at the
        // version the update will produce.
        let new_version = expected_version + 1;
        let payload = Pointer::signing_bytes(address, &new_target, new_version);
        if record.owner.verify(&payload, signature).is_err() {
            return Err(PointerError::Unauthorized);
        }

        record.target = new_target;
        record.version = new_version;
        record.signature = Some(signature.clone());
        record.last_updated = Utc::now();
        debug!(
            address = %address.short_hex(),
            version = new_version,
            target = %new_target.short_hex(),
            "updated pointer"
        );
        Ok(record.to_pointer(*address))
    }

    fn resolve(&self, address: &Address) -> PointerResult<Address> {
        let records = self.records.read().expect("lock poisoned");
        records
            .get(address)
            .map(|r| r.target)
            .ok_or(PointerError::NotFound(*address))
    }

    fn get_metadata(&self, address: &Address) -> PointerResult<PointerMetadata> {
        let records = self.records.read().expect("lock poisoned");
        let record = records
            .get(address)
            .ok_or(PointerError::NotFound(*address))?;
        Ok(PointerMetadata {
            version: record.version,
            owner: record.owner.clone(),
            last_updated: record.last_updated,
        })
    }
}

impl std::fmt::Debug for InMemoryPointerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPointerRegistry")
            .field("pointer_count", &self.len())
            .finish()
    }
}
