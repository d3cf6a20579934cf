//! Solana chain support for the proof verifier.
//!
//! Solana wallets sign arbitrary messages with the account's Ed25519 key
//! directly, and the account address is the Base58-encoded public key, so
//! a proof needs no envelope decoding and no hashing step: check the
//! signature, then check the key is the address.

pub mod address;
pub mod error;
pub mod verify;

// Re-export key public types for ergonomic imports.
pub use address::{keypair_to_address, pubkey_matches_address};
pub use error::SolError;
pub use verify::{verify_sol_message, SolProof};
