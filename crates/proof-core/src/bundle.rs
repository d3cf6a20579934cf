//! Typed proof bundles and format detection.
//!
//! Bundles arrive as loose JSON objects. Classification only looks at which
//! signal fields are present, never at their contents, so it cannot fail:
//!
//! ```text
//! Cardano  any of  signatureHex, keyHex, payloadHex
//! Solana   any of  signatureBase58, pubkeyBase58, payloadUtf8
//! ```
//!
//! A bundle carrying both sets is treated as Cardano.

use chain_ada::{AdaError, Cip8Proof};
use chain_sol::{SolError, SolProof};
use serde_json::{Map, Value};

use crate::metadata::MetadataText;

const CARDANO_SIGNALS: [&str; 3] = ["signatureHex", "keyHex", "payloadHex"];
const SOLANA_SIGNALS: [&str; 3] = ["signatureBase58", "pubkeyBase58", "payloadUtf8"];

/// Which verification scheme a bundle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    Cardano,
    Solana,
    Unknown,
}

/// Fields of a CIP-8 bundle. Any of them may be missing; the verifier
/// reports that as a rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardanoBundle {
    pub address: Option<String>,
    pub payload_hex: Option<String>,
    pub signature_hex: Option<String>,
    pub key_hex: Option<String>,
}

impl CardanoBundle {
    fn from_object(obj: &Map<String, Value>) -> Self {
        CardanoBundle {
            address: ["addressHex", "addressBech32", "address"]
                .iter()
                .find_map(|name| text_field(obj, name)),
            payload_hex: text_field(obj, "payloadHex"),
            signature_hex: text_field(obj, "signatureHex"),
            key_hex: text_field(obj, "keyHex"),
        }
    }

    pub fn as_proof(&self) -> Result<Cip8Proof<'_>, AdaError> {
        match (
            &self.address,
            &self.payload_hex,
            &self.signature_hex,
            &self.key_hex,
        ) {
            (Some(address), Some(payload_hex), Some(signature_hex), Some(key_hex)) => {
                Ok(Cip8Proof {
                    address,
                    payload_hex,
                    signature_hex,
                    key_hex,
                })
            }
            _ => Err(AdaError::MissingFields),
        }
    }
}

/// Fields of a Solana bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolanaBundle {
    pub address: Option<String>,
    pub payload_utf8: Option<String>,
    pub signature_base58: Option<String>,
    pub pubkey_base58: Option<String>,
}

impl SolanaBundle {
    fn from_object(obj: &Map<String, Value>) -> Self {
        SolanaBundle {
            address: ["addressBase58", "address"]
                .iter()
                .find_map(|name| text_field(obj, name)),
            payload_utf8: text_field(obj, "payloadUtf8"),
            signature_base58: text_field(obj, "signatureBase58"),
            pubkey_base58: text_field(obj, "pubkeyBase58"),
        }
    }

    pub fn as_proof(&self) -> Result<SolProof<'_>, SolError> {
        match (
            &self.address,
            &self.payload_utf8,
            &self.signature_base58,
            &self.pubkey_base58,
        ) {
            (Some(address), Some(payload_utf8), Some(signature_base58), Some(pubkey_base58)) => {
                Ok(SolProof {
                    address,
                    payload_utf8,
                    signature_base58,
                    pubkey_base58,
                })
            }
            _ => Err(SolError::MissingFields),
        }
    }
}

/// A bundle classified by scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofBundle {
    Cardano(CardanoBundle),
    Solana(SolanaBundle),
    Unknown,
}

impl ProofBundle {
    /// Classify and extract a bundle. Never fails; non-objects are Unknown.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return ProofBundle::Unknown;
        };
        match classify_object(obj) {
            BundleKind::Cardano => ProofBundle::Cardano(CardanoBundle::from_object(obj)),
            BundleKind::Solana => ProofBundle::Solana(SolanaBundle::from_object(obj)),
            BundleKind::Unknown => ProofBundle::Unknown,
        }
    }

    pub fn kind(&self) -> BundleKind {
        match self {
            ProofBundle::Cardano(_) => BundleKind::Cardano,
            ProofBundle::Solana(_) => BundleKind::Solana,
            ProofBundle::Unknown => BundleKind::Unknown,
        }
    }
}

/// Classify a JSON value by the signal fields it carries.
pub fn classify(value: &Value) -> BundleKind {
    value
        .as_object()
        .map_or(BundleKind::Unknown, classify_object)
}

fn classify_object(obj: &Map<String, Value>) -> BundleKind {
    let has_any = |names: &[&str]| names.iter().any(|name| obj.get(*name).is_some_and(is_present));

    if has_any(&CARDANO_SIGNALS) {
        BundleKind::Cardano
    } else if has_any(&SOLANA_SIGNALS) {
        BundleKind::Solana
    } else {
        BundleKind::Unknown
    }
}

/// A field counts as present unless it is null, false, zero or "".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_field(obj: &Map<String, Value>, name: &str) -> Option<String> {
    let text = MetadataText::from_value(obj.get(name)?)?.flatten();
    (!text.is_empty()).then_some(text)
}
