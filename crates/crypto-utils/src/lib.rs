//! # crypto-utils
//!
//! Shared primitives for offline proof verification: text decoders
//! (hex, Base58), a small CBOR value tree, BLAKE2b-224 hashing and the
//! Ed25519 signature check every scheme verifier bottoms out in.

pub mod cbor;
pub mod ed25519;
pub mod encoding;
pub mod error;
pub mod hash;

pub use cbor::TaggedValue;
pub use encoding::{base58_decode, hex_decode};
pub use error::CodecError;
pub use hash::blake2b_224;
