//! Cardano chain support for the proof verifier.
//!
//! This crate decodes Shelley-era addresses (CIP-19) down to their payment
//! credential and verifies CIP-8 message signatures carried in a COSE_Sign1
//! envelope. Address parsing is implemented here directly against the
//! header-byte layout rather than through a serialization SDK, using
//! `bech32` for the text form and `crypto-utils` for CBOR and Ed25519.

pub mod address;
pub mod cip8;
pub mod cose;
pub mod error;

// Re-export key public types for ergonomic imports.
pub use address::{
    credential_from_address, credential_from_public_key, CardanoAddress, Credential, Pointer,
    KEY_HASH_LENGTH,
};
pub use cip8::{verify_cip8, Cip8Options, Cip8Proof, KeyPolicy};
pub use cose::{sig_structure, CoseKey, Sig1Structure};
pub use error::{AdaError, AddressError};
