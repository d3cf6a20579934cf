//! COSE_Sign1 and COSE_Key as used by CIP-8 message signing.
//!
//! ```text
//! COSE_Sign1 = [
//!     protected   : bstr,          serialized header map
//!     unprotected : map,           ignored
//!     payload     : bstr,
//!     signature   : bstr,          64-byte Ed25519 signature
//! ]
//!
//! Sig_structure = ["Signature1", protected, external_aad = h'', payload]
//! ```
//!
//! The signer signs the CBOR encoding of `Sig_structure`, not the payload.

use crypto_utils::{cbor, hex_decode, TaggedValue};

use crate::error::AdaError;

/// CBOR tag for a tagged COSE_Sign1 message (RFC 8152).
pub const COSE_SIGN1_TAG: u64 = 18;

const SIGNATURE1_CONTEXT: &str = "Signature1";
const PROTECTED_ADDRESS_LABEL: &str = "address";

// COSE_Key labels and values.
const LABEL_KTY: i128 = 1;
const LABEL_ALG: i128 = 3;
const LABEL_CRV: i128 = -1;
const LABEL_X: i128 = -2;
const KTY_OKP: i128 = 1;
const ALG_EDDSA: i128 = -8;
const CRV_ED25519: i128 = 6;

/// The parts of a COSE_Sign1 message that verification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sig1Structure {
    pub protected: Vec<u8>,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl Sig1Structure {
    /// Decode a hex-encoded COSE_Sign1, tagged or untagged.
    pub fn from_hex(signature_hex: &str) -> Result<Self, AdaError> {
        let value = cbor::decode(&hex_decode(signature_hex)?)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &TaggedValue) -> Result<Self, AdaError> {
        let value = match value {
            TaggedValue::Tag(COSE_SIGN1_TAG, inner) => &**inner,
            other => other,
        };

        let items = match value.as_array() {
            Some(items) if items.len() == 4 => items,
            _ => return Err(AdaError::BadSign1),
        };

        match (items[0].as_bytes(), items[2].as_bytes(), items[3].as_bytes()) {
            (Some(protected), Some(payload), Some(signature)) => Ok(Sig1Structure {
                protected: protected.to_vec(),
                payload: payload.to_vec(),
                signature: signature.to_vec(),
            }),
            _ => Err(AdaError::MalformedSign1),
        }
    }

    /// The `address` entry of the protected header, if the signer put one
    /// there (CIP-30 wallets do).
    pub fn protected_address(&self) -> Result<Option<Vec<u8>>, AdaError> {
        if self.protected.is_empty() {
            return Ok(None);
        }
        let header = cbor::decode(&self.protected).map_err(|_| AdaError::MalformedSign1)?;
        let entries = header.as_map().ok_or(AdaError::MalformedSign1)?;

        match entries
            .iter()
            .find(|(k, _)| k.as_text() == Some(PROTECTED_ADDRESS_LABEL))
        {
            None => Ok(None),
            Some((_, TaggedValue::Bytes(address))) => Ok(Some(address.clone())),
            Some(_) => Err(AdaError::MalformedSign1),
        }
    }

    /// The bytes the signer actually signed.
    pub fn to_be_signed(&self) -> Result<Vec<u8>, AdaError> {
        sig_structure(&self.protected, &self.payload)
    }
}

/// CBOR-encode `["Signature1", protected, h'', payload]`.
pub fn sig_structure(protected: &[u8], payload: &[u8]) -> Result<Vec<u8>, AdaError> {
    let value = TaggedValue::Array(vec![
        TaggedValue::Text(SIGNATURE1_CONTEXT.into()),
        TaggedValue::Bytes(protected.to_vec()),
        TaggedValue::Bytes(Vec::new()),
        TaggedValue::Bytes(payload.to_vec()),
    ]);
    Ok(value.encode()?)
}

/// A decoded COSE_Key map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoseKey {
    map: TaggedValue,
}

impl CoseKey {
    /// Decode a hex-encoded COSE_Key. The value must be a CBOR map.
    pub fn from_hex(key_hex: &str) -> Result<Self, AdaError> {
        let value = cbor::decode(&hex_decode(key_hex)?)?;
        Self::from_value(value)
    }

    pub fn from_value(value: TaggedValue) -> Result<Self, AdaError> {
        if value.as_map().is_none() {
            return Err(AdaError::BadCoseKey);
        }
        Ok(CoseKey { map: value })
    }

    /// The 32-byte Ed25519 public key under label `-2`.
    pub fn public_key(&self) -> Result<[u8; 32], AdaError> {
        self.map
            .map_get_int(LABEL_X)
            .and_then(TaggedValue::as_bytes)
            .and_then(|b| <[u8; 32]>::try_from(b).ok())
            .ok_or(AdaError::MissingPubkey)
    }

    /// Require an OKP / Ed25519 key; `alg`, when present, must be EdDSA.
    pub fn check_ed25519_params(&self) -> Result<(), AdaError> {
        let int_at = |label| self.map.map_get_int(label).and_then(TaggedValue::as_integer);

        if int_at(LABEL_KTY) != Some(KTY_OKP) {
            return Err(AdaError::RejectedCoseKey("key type is not OKP".into()));
        }
        if int_at(LABEL_CRV) != Some(CRV_ED25519) {
            return Err(AdaError::RejectedCoseKey("curve is not Ed25519".into()));
        }
        if let Some(alg) = self.map.map_get_int(LABEL_ALG) {
            if alg.as_integer() != Some(ALG_EDDSA) {
                return Err(AdaError::RejectedCoseKey("algorithm is not EdDSA".into()));
            }
        }
        Ok(())
    }
}
