//! Cryptographic primitives for the Tessera data network.
//!
//! Provides domain-separated BLAKE3 address derivation (the address space
//! shared by all four data types) and Ed25519 signing/verification.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod deriver;
pub mod signer;

pub use deriver::AddressDeriver;
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
