//! Solana address handling.
//!
//! Solana addresses are simply Base58-encoded 32-byte Ed25519 public keys.
//! There is no hashing step (unlike Cardano), so binding a key to an address
//! is a comparison of the two Base58 strings.

/// Convert a 32-byte Ed25519 public key to a Solana address string.
pub fn keypair_to_address(ed25519_pubkey: &[u8; 32]) -> String {
    bs58::encode(ed25519_pubkey).into_string()
}

/// Whether a Base58 public key names the given address.
///
/// The comparison is textual: Base58 has one canonical encoding per byte
/// string, so two spellings of the same key cannot both decode.
pub fn pubkey_matches_address(pubkey_base58: &str, address_base58: &str) -> bool {
    pubkey_base58 == address_base58
}
