//! In-memory scratchpad store for testing and ephemeral use.
//!
//! [`InMemoryPadStore`] keeps one record per owner-derived address in a
//! `HashMap` behind a `RwLock`. The verify-compare-replace sequence of an
//! update runs entirely under the write lock, making each per-address
//! update atomic; a rejected update leaves the stored version untouched.

use std::collections::HashMap;
use std::sync::RwLock;

use tessera_crypto::{AddressDeriver, Signature, VerifyingKey};
use tessera_types::Address;
use tracing::debug;

use crate::error::{PadError, PadResult};
use crate::pad::{ScratchPad, UpdateOutcome};
use crate::traits::PadStore;

#[derive(Clone, Debug)]
struct PadRecord {
    owner: VerifyingKey,
    content_type: u64,
    data: Vec<u8>,
    counter: u64,
    signature: Option<Signature>,
}

impl PadRecord {
    fn to_pad(&self, address: Address) -> ScratchPad {
        ScratchPad {
            address,
            content_type: self.content_type,
            data: self.data.clone(),
            update_counter: self.counter,
            signature: self.signature.clone(),
        }
    }
}

/// An in-memory implementation of [`PadStore`].
pub struct InMemoryPadStore {
    pads: RwLock<HashMap<Address, PadRecord>>,
}

impl InMemoryPadStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            pads: RwLock::new(HashMap::new()),
        }
    }

    /// Number of pads currently stored.
    pub fn len(&self) -> usize {
        self.pads.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no pads are stored.
    pub fn is_empty(&self) -> bool {
        self.pads.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryPadStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` if the incoming write beats the stored one at an equal
/// counter: byte-wise smaller signature is authoritative. The unsigned
/// creation state never loses a tie at counter 0, keeping the rule total.
fn wins_tie(incoming: &Signature, stored: Option<&Signature>) -> bool {
    match stored {
        Some(stored) => incoming.to_bytes().as_slice() < stored.to_bytes().as_slice(),
        None => false,
    }
}

impl PadStore for InMemoryPadStore {
    fn create(
        &self,
        owner: &VerifyingKey,
        content_type: u64,
        initial_data: &[u8],
    ) -> PadResult<ScratchPad> {
        let address = AddressDeriver::PAD.derive_owner(owner);
        let mut pads = self.pads.write().expect("lock poisoned");
        if pads.contains_key(&address) {
            return Err(PadError::AlreadyExists(address));
        }
        let record = PadRecord {
            owner: owner.clone(),
            content_type,
            data: initial_data.to_vec(),
            counter: 0,
            signature: None,
        };
        debug!(address = %address.short_hex(), content_type, "created scratchpad");
        let pad = record.to_pad(address);
        pads.insert(address, record);
        Ok(pad)
    }

    fn update(
        &self,
        address: &Address,
        new_data: &[u8],
        signature: &Signature,
        claimed_counter: u64,
    ) -> PadResult<UpdateOutcome> {
        let mut pads = self.pads.write().expect("lock poisoned");
        let record = pads.get_mut(address).ok_or(PadError::NotFound(*address))?;

        let payload = ScratchPad::signing_bytes(address, claimed_counter, new_data);
        if record.owner.verify(&payload, signature).is_err() {
            return Err(PadError::Unauthorized);
        }

        let accepted = claimed_counter > record.counter
            || (claimed_counter == record.counter
                && wins_tie(signature, record.signature.as_ref()));

        if accepted {
            let superseded = if claimed_counter == record.counter {
                // Tie-break win: the previously stored write lost the race
                // and is surfaced, not dropped.
                Some(record.to_pad(*address))
            } else {
                None
            };
            record.data = new_data.to_vec();
            record.counter = claimed_counter;
            record.signature = Some(signature.clone());
            debug!(
                address = %address.short_hex(),
                counter = claimed_counter,
                "accepted scratchpad update"
            );
            Ok(UpdateOutcome {
                accepted: true,
                current_counter: record.counter,
                conflict: superseded,
            })
        } else {
            debug!(
                address = %address.short_hex(),
                claimed = claimed_counter,
                current = record.counter,
                "rejected scratchpad update"
            );
            Ok(UpdateOutcome {
                accepted: false,
                current_counter: record.counter,
                conflict: Some(record.to_pad(*address)),
            })
        }
    }

    fn get(&self, address: &Address) -> PadResult<ScratchPad> {
        let pads = self.pads.read().expect("lock poisoned");
        pads.get(address)
            .map(|r| r.to_pad(*address))
            .ok_or(PadError::NotFound(*address))
    }
}

impl std::fmt::Debug for InMemoryPadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPadStore")
            .field("pad_count", &self.len())
            .finish()
    }
}
