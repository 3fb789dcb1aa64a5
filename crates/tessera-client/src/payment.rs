//! The payment collaborator interface.
//!
//! Writes on the network cost tokens, but the core does not compute costs
//! or hold wallets. It asks a [`PaymentLayer`] for an opaque proof before
//! each write and fails the write with `PaymentRequired` when the layer
//! declines. Reads are free.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque payment proof token attached to write operations.
///
/// The core never inspects the contents; validity is the payment layer's
/// concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof(pub Vec<u8>);

/// Errors from the payment layer.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No valid proof could be supplied for this write.
    #[error("payment declined: {0}")]
    Declined(String),
}

/// Narrow interface to the payment layer.
pub trait PaymentLayer: Send + Sync {
    /// Acquire a proof covering a write of the given size.
    fn acquire_proof(&self, bytes: u64) -> Result<PaymentProof, PaymentError>;
}

/// A payment layer that issues empty proofs for free.
///
/// For local single-process use and tests.
#[derive(Debug, Default)]
pub struct FreePayment;

impl FreePayment {
    /// Create a new free payment layer.
    pub fn new() -> Self {
        Self
    }
}

impl PaymentLayer for FreePayment {
    fn acquire_proof(&self, _bytes: u64) -> Result<PaymentProof, PaymentError> {
        Ok(PaymentProof(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_payment_always_issues() {
        let payment = FreePayment::new();
        assert!(payment.acquire_proof(1_000_000).is_ok());
    }
}
