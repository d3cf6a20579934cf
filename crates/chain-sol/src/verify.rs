//! Solana signed-message verification.
//!
//! The signed message is exactly the UTF-8 bytes of the payload. No
//! off-chain message header or other wrapper is reconstructed, so a wallet
//! that prefixes the message before signing will not verify here.

use crypto_utils::{base58_decode, ed25519};

use crate::address::pubkey_matches_address;
use crate::error::SolError;

/// The textual fields of a Solana proof bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolProof<'a> {
    pub address: &'a str,
    pub payload_utf8: &'a str,
    pub signature_base58: &'a str,
    pub pubkey_base58: &'a str,
}

/// Verify a Solana message signature and its key/address binding.
pub fn verify_sol_message(proof: &SolProof<'_>) -> Result<(), SolError> {
    let message = proof.payload_utf8.as_bytes();
    let signature = base58_decode(proof.signature_base58)?;
    // A key of the wrong length fails the signature check below.
    let pubkey = base58_decode(proof.pubkey_base58)?;

    if !ed25519::verify(message, &signature, &pubkey) {
        return Err(SolError::InvalidSignature);
    }

    if !pubkey_matches_address(proof.pubkey_base58, proof.address) {
        return Err(SolError::PubkeyAddressMismatch);
    }

    tracing::debug!(address = proof.address, "solana proof verified");
    Ok(())
}
