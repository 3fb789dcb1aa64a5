//! The transport collaborator interface.
//!
//! The core never routes or discovers peers itself; it hands payloads to a
//! [`Transport`] and treats failures as transient. At-least-once delivery
//! is assumed: duplicate accepted writes are idempotent (chunk put, graph
//! append) or rejected by version/counter checks (pointer, scratchpad), so
//! redelivery is always safe.

use tessera_types::Address;
use thiserror::Error;

/// Errors from the transport layer. Always considered transient and
/// eligible for bounded retry at the client boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The network is unreachable or the send timed out.
    #[error("network unavailable: {0}")]
    Unavailable(String),
}

/// Narrow interface to the network layer.
pub trait Transport: Send + Sync {
    /// Send a payload toward the peers responsible for an address and
    /// return their response.
    fn send(&self, address: &Address, payload: &[u8]) -> Result<Vec<u8>, TransportError>;

    /// Announce a payload for an address without awaiting a response.
    fn broadcast(&self, address: &Address, payload: &[u8]) -> Result<(), TransportError>;
}

/// A transport that goes nowhere and always succeeds.
///
/// For single-process use and tests, where the injected stores are the
/// authoritative state and nothing needs announcing.
#[derive(Debug, Default)]
pub struct LoopbackTransport;

impl LoopbackTransport {
    /// Create a new loopback transport.
    pub fn new() -> Self {
        Self
    }
}

impl Transport for LoopbackTransport {
    fn send(&self, _address: &Address, _payload: &[u8]) -> Result<Vec<u8>, TransportError> {
        Ok(Vec::new())
    }

    fn broadcast(&self, _address: &Address, _payload: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}
