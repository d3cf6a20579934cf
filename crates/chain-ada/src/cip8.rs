//! CIP-8 signed-message verification.
//!
//! A proof binds a payload to an address when all of these hold:
//!
//! 1. the COSE_Sign1 decodes and its signature verifies over the
//!    reconstructed `Sig_structure` under the COSE_Key's public key,
//! 2. BLAKE2b-224 of that public key equals the address's payment key hash,
//! 3. the payload inside the envelope equals the declared payload.
//!
//! With [`Cip8Options::bind_signed_address`] set, the `address` entry of the
//! protected header, when present, must also equal the declared address.
//! That pins the network id and stake part, which the key hash alone does
//! not cover.

use serde::{Deserialize, Serialize};

use crypto_utils::{ed25519, hex_decode};

use crate::address::{credential_from_public_key, CardanoAddress};
use crate::cose::{CoseKey, Sig1Structure};
use crate::error::AdaError;

/// How strictly the COSE_Key header parameters are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Only the public key (label `-2`) is read.
    #[default]
    Lenient,
    /// Key type, curve and (if present) algorithm must name Ed25519.
    Strict,
}

/// Settings for [`verify_cip8`]. The default checks exactly the payment key
/// binding, signature and payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cip8Options {
    pub key_policy: KeyPolicy,
    /// Require the protected header's `address`, if any, to be the declared
    /// address byte for byte.
    pub bind_signed_address: bool,
}

/// The textual fields of a Cardano proof bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cip8Proof<'a> {
    /// Bech32 (`addr...`) or hex address.
    pub address: &'a str,
    pub payload_hex: &'a str,
    /// Hex-encoded COSE_Sign1.
    pub signature_hex: &'a str,
    /// Hex-encoded COSE_Key.
    pub key_hex: &'a str,
}

/// Verify a CIP-8 proof. `Ok(())` means the proof is valid.
pub fn verify_cip8(proof: &Cip8Proof<'_>, options: Cip8Options) -> Result<(), AdaError> {
    let sign1 = Sig1Structure::from_hex(proof.signature_hex)?;
    let to_be_signed = sign1.to_be_signed()?;

    let key = CoseKey::from_hex(proof.key_hex)?;
    if options.key_policy == KeyPolicy::Strict {
        key.check_ed25519_params()?;
    }
    let public_key = key.public_key()?;

    if !ed25519::verify(&to_be_signed, &sign1.signature, &public_key) {
        return Err(AdaError::InvalidSignature);
    }

    let (address, address_bytes) = CardanoAddress::parse_raw(proof.address)?;
    if credential_from_public_key(&public_key) != address.payment_key_hash()? {
        return Err(AdaError::KeyHashMismatch);
    }

    if options.bind_signed_address {
        if let Some(signed_address) = sign1.protected_address()? {
            if signed_address != address_bytes {
                return Err(AdaError::SignedAddressMismatch);
            }
        }
    }

    if sign1.payload != hex_decode(proof.payload_hex)? {
        return Err(AdaError::PayloadMismatch);
    }

    tracing::debug!(address = proof.address, "cip-8 proof verified");
    Ok(())
}
