//! Shelley address decoding (CIP-19) and payment-credential derivation.
//!
//! A Shelley address is a header byte followed by credential data:
//!
//! ```text
//! header:  tttt nnnn
//!          |    +-- network id (0 = testnet, 1 = mainnet)
//!          +------- address type
//!
//! type  shape       payment   delegation      body
//! 0     base        key       stake key       28 + 28
//! 1     base        script    stake key       28 + 28
//! 2     base        key       stake script    28 + 28
//! 3     base        script    stake script    28 + 28
//! 4     pointer     key       pointer         28 + 3 var-nats
//! 5     pointer     script    pointer         28 + 3 var-nats
//! 6     enterprise  key       -               28
//! 7     enterprise  script    -               28
//! 8     byron       (CBOR-encoded legacy address)
//! 14    reward      -         stake key       28
//! 15    reward      -         stake script    28
//! ```
//!
//! Only base and enterprise addresses with a key-hash payment credential can
//! be bound to a signing key; every other shape is rejected by name.

use crypto_utils::{blake2b_224, hex_decode};

use crate::error::AddressError;

/// Length of a Cardano key hash / script hash.
pub const KEY_HASH_LENGTH: usize = 28;

const BASE_LENGTH: usize = 1 + 2 * KEY_HASH_LENGTH;
const SINGLE_CREDENTIAL_LENGTH: usize = 1 + KEY_HASH_LENGTH;

const MAINNET_ID: u8 = 1;
const TESTNET_ID: u8 = 0;

/// A payment or stake credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    KeyHash([u8; KEY_HASH_LENGTH]),
    ScriptHash([u8; KEY_HASH_LENGTH]),
}

impl Credential {
    fn from_slice(bytes: &[u8], is_script: bool) -> Self {
        let mut hash = [0u8; KEY_HASH_LENGTH];
        hash.copy_from_slice(bytes);
        if is_script {
            Credential::ScriptHash(hash)
        } else {
            Credential::KeyHash(hash)
        }
    }

    pub fn hash(&self) -> &[u8; KEY_HASH_LENGTH] {
        match self {
            Credential::KeyHash(h) | Credential::ScriptHash(h) => h,
        }
    }
}

/// Location of a stake registration certificate on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub slot: u64,
    pub tx_index: u64,
    pub cert_index: u64,
}

/// Structural form of a decoded Cardano address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardanoAddress {
    Base {
        network_id: u8,
        payment: Credential,
        stake: Credential,
    },
    Pointer {
        network_id: u8,
        payment: Credential,
        pointer: Pointer,
    },
    Enterprise {
        network_id: u8,
        payment: Credential,
    },
    Reward {
        network_id: u8,
        stake: Credential,
    },
    Byron,
}

impl CardanoAddress {
    /// Parse an address given as bech32 text (`addr...`, `stake...`) or as
    /// raw hex bytes.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        Self::parse_raw(address).map(|(parsed, _)| parsed)
    }

    /// Like [`CardanoAddress::parse`], also returning the binary address.
    ///
    /// Text starting with `stake` is read as bech32 as well as `addr`, so a
    /// reward address is reported as such rather than as bad hex.
    pub fn parse_raw(address: &str) -> Result<(Self, Vec<u8>), AddressError> {
        if address.is_empty() {
            return Err(AddressError::Invalid("empty address".into()));
        }
        if address.starts_with("addr") || address.starts_with("stake") {
            decode_bech32(address)
        } else {
            let bytes = hex_decode(address).map_err(|e| AddressError::Invalid(e.to_string()))?;
            Ok((Self::from_bytes(&bytes)?, bytes))
        }
    }

    /// Decode the binary address form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let (&header, body) = bytes
            .split_first()
            .ok_or_else(|| AddressError::Invalid("empty address".into()))?;
        let addr_type = header >> 4;
        let network_id = header & 0x0f;

        let address = match addr_type {
            0..=3 => {
                expect_length(bytes, BASE_LENGTH, "base")?;
                CardanoAddress::Base {
                    network_id,
                    payment: Credential::from_slice(&body[..KEY_HASH_LENGTH], addr_type & 0b01 != 0),
                    stake: Credential::from_slice(&body[KEY_HASH_LENGTH..], addr_type & 0b10 != 0),
                }
            }
            4 | 5 => {
                if bytes.len() < SINGLE_CREDENTIAL_LENGTH + 3 {
                    return Err(AddressError::Invalid(format!(
                        "pointer address too short: {} bytes",
                        bytes.len()
                    )));
                }
                let mut pos = KEY_HASH_LENGTH;
                let pointer = Pointer {
                    slot: read_var_nat(body, &mut pos)?,
                    tx_index: read_var_nat(body, &mut pos)?,
                    cert_index: read_var_nat(body, &mut pos)?,
                };
                if pos != body.len() {
                    return Err(AddressError::Invalid(
                        "trailing bytes after pointer".into(),
                    ));
                }
                CardanoAddress::Pointer {
                    network_id,
                    payment: Credential::from_slice(&body[..KEY_HASH_LENGTH], addr_type & 1 != 0),
                    pointer,
                }
            }
            6 | 7 => {
                expect_length(bytes, SINGLE_CREDENTIAL_LENGTH, "enterprise")?;
                CardanoAddress::Enterprise {
                    network_id,
                    payment: Credential::from_slice(body, addr_type & 1 != 0),
                }
            }
            8 => CardanoAddress::Byron,
            14 | 15 => {
                expect_length(bytes, SINGLE_CREDENTIAL_LENGTH, "reward")?;
                CardanoAddress::Reward {
                    network_id,
                    stake: Credential::from_slice(body, addr_type & 1 != 0),
                }
            }
            _ => return Err(AddressError::Unsupported("reserved address type")),
        };
        tracing::trace!(shape = address.shape(), "decoded cardano address");
        Ok(address)
    }

    /// Network id from the header; Byron addresses carry none.
    pub fn network_id(&self) -> Option<u8> {
        match self {
            CardanoAddress::Base { network_id, .. }
            | CardanoAddress::Pointer { network_id, .. }
            | CardanoAddress::Enterprise { network_id, .. }
            | CardanoAddress::Reward { network_id, .. } => Some(*network_id),
            CardanoAddress::Byron => None,
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            CardanoAddress::Base { .. } => "base address",
            CardanoAddress::Pointer { .. } => "pointer address",
            CardanoAddress::Enterprise { .. } => "enterprise address",
            CardanoAddress::Reward { .. } => "reward address",
            CardanoAddress::Byron => "byron address",
        }
    }

    /// The payment key hash of a base or enterprise address.
    pub fn payment_key_hash(&self) -> Result<[u8; KEY_HASH_LENGTH], AddressError> {
        match self {
            CardanoAddress::Base { payment, .. } | CardanoAddress::Enterprise { payment, .. } => {
                match payment {
                    Credential::KeyHash(hash) => Ok(*hash),
                    Credential::ScriptHash(_) => Err(AddressError::Unsupported(
                        "script payment credential",
                    )),
                }
            }
            other => Err(AddressError::Unsupported(other.shape())),
        }
    }
}

fn decode_bech32(address: &str) -> Result<(CardanoAddress, Vec<u8>), AddressError> {
    let (hrp, bytes) =
        bech32::decode(address).map_err(|e| AddressError::Invalid(format!("bech32: {e}")))?;
    let hrp = hrp.to_lowercase();

    let expected_network = match hrp.as_str() {
        "addr" | "stake" => MAINNET_ID,
        "addr_test" | "stake_test" => TESTNET_ID,
        other => {
            return Err(AddressError::Invalid(format!(
                "unexpected bech32 prefix {other}"
            )))
        }
    };

    let parsed = CardanoAddress::from_bytes(&bytes)?;
    match parsed.network_id() {
        Some(id) if id != expected_network => Err(AddressError::NetworkMismatch {
            hrp,
            network_id: id,
        }),
        _ => Ok((parsed, bytes)),
    }
}

fn expect_length(bytes: &[u8], expected: usize, shape: &str) -> Result<(), AddressError> {
    if bytes.len() != expected {
        return Err(AddressError::Invalid(format!(
            "{shape} address must be {expected} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}

/// Read a variable-length natural: 7-bit big-endian groups, high bit set on
/// every byte except the last.
fn read_var_nat(bytes: &[u8], pos: &mut usize) -> Result<u64, AddressError> {
    let mut value: u64 = 0;
    loop {
        let byte = *bytes
            .get(*pos)
            .ok_or_else(|| AddressError::Invalid("truncated pointer".into()))?;
        *pos += 1;

        if value > u64::MAX >> 7 {
            return Err(AddressError::Invalid("pointer value overflows u64".into()));
        }
        value = (value << 7) | u64::from(byte & 0x7f);

        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
}

/// Payment credential for a raw Ed25519 public key: BLAKE2b-224 of the key.
pub fn credential_from_public_key(public_key: &[u8; 32]) -> [u8; KEY_HASH_LENGTH] {
    blake2b_224(public_key)
}

/// Payment credential embedded in an address string.
pub fn credential_from_address(address: &str) -> Result<[u8; KEY_HASH_LENGTH], AddressError> {
    CardanoAddress::parse(address)?.payment_key_hash()
}

#[cfg(test)]
mod tests {
    use super::*;

    // CIP-19 test vectors. All derive from the payment key
    // addr_vk1w0l2sr2zgfm26ztc6nl9xy8ghsk5sh6ldwemlpmp9xylzy4dtf7st80zhd.
    const PAYMENT_VK_HEX: &str =
        "73fea80d424276ad0978d4fe5310e8bc2d485f5f6bb3bf87612989f112ad5a7d";
    const PAYMENT_KEY_HASH_HEX: &str = "9493315cd92eb5d8c4304e67b7e16ae36d61d34502694657811a2c8e";
    const STAKE_KEY_HASH_HEX: &str = "337b62cfff6403a06a3acbc34f8c46003c69fe79a3628cefa9c47251";
    const SCRIPT_HASH_HEX: &str = "c37b1b5dc0669f1d3c61a6fddb2e8fde96be87b881c60bce8e8d542f";

    const BASE_ADDR: &str = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";
    const SCRIPT_BASE_ADDR: &str = "addr1z8phkx6acpnf78fuvxn0mkew3l0fd058hzquvz7w36x4gten0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs9yc0hh";
    const POINTER_ADDR: &str = "addr1gx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer5pnz75xxcrzqf96k";
    const ENTERPRISE_ADDR: &str = "addr1vx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzers66hrl8";
    const SCRIPT_ENTERPRISE_ADDR: &str = "addr1w8phkx6acpnf78fuvxn0mkew3l0fd058hzquvz7w36x4gtcyjy7wx";
    const TESTNET_ENTERPRISE_ADDR: &str =
        "addr_test1vz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzerspjrlsz";
    const REWARD_ADDR: &str = "stake1uyehkck0lajq8gr28t9uxnuvgcqrc6070x3k9r8048z8y5gh6ffgw";

    fn key_hash(hex_str: &str) -> [u8; 28] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    #[test]
    fn public_key_hashes_to_cip19_payment_credential() {
        let vk: [u8; 32] = hex::decode(PAYMENT_VK_HEX).unwrap().try_into().unwrap();
        assert_eq!(
            credential_from_public_key(&vk),
            key_hash(PAYMENT_KEY_HASH_HEX)
        );
    }

    #[test]
    fn base_address_decodes_both_credentials() {
        let addr = CardanoAddress::parse(BASE_ADDR).unwrap();
        assert_eq!(
            addr,
            CardanoAddress::Base {
                network_id: 1,
                payment: Credential::KeyHash(key_hash(PAYMENT_KEY_HASH_HEX)),
                stake: Credential::KeyHash(key_hash(STAKE_KEY_HASH_HEX)),
            }
        );
        assert_eq!(
            credential_from_address(BASE_ADDR).unwrap(),
            key_hash(PAYMENT_KEY_HASH_HEX)
        );
    }

    #[test]
    fn enterprise_address_exposes_payment_key_hash() {
        let addr = CardanoAddress::parse(ENTERPRISE_ADDR).unwrap();
        assert_eq!(addr.shape(), "enterprise address");
        assert_eq!(addr.network_id(), Some(1));
        assert_eq!(
            addr.payment_key_hash().unwrap(),
            key_hash(PAYMENT_KEY_HASH_HEX)
        );
    }

    #[test]
    fn testnet_enterprise_address() {
        let addr = CardanoAddress::parse(TESTNET_ENTERPRISE_ADDR).unwrap();
        assert_eq!(addr.network_id(), Some(0));
        assert_eq!(
            addr.payment_key_hash().unwrap(),
            key_hash(PAYMENT_KEY_HASH_HEX)
        );
    }

    #[test]
    fn hex_address_matches_bech32_form() {
        let hex_form = format!("61{PAYMENT_KEY_HASH_HEX}");
        assert_eq!(
            CardanoAddress::parse(&hex_form).unwrap(),
            CardanoAddress::parse(ENTERPRISE_ADDR).unwrap()
        );
    }

    #[test]
    fn parse_raw_returns_binary_form() {
        let (_, bytes) = CardanoAddress::parse_raw(ENTERPRISE_ADDR).unwrap();
        assert_eq!(hex::encode(bytes), format!("61{PAYMENT_KEY_HASH_HEX}"));
    }

    #[test]
    fn pointer_address_decodes_pointer() {
        let addr = CardanoAddress::parse(POINTER_ADDR).unwrap();
        assert_eq!(
            addr,
            CardanoAddress::Pointer {
                network_id: 1,
                payment: Credential::KeyHash(key_hash(PAYMENT_KEY_HASH_HEX)),
                pointer: Pointer {
                    slot: 2_498_243,
                    tx_index: 27,
                    cert_index: 3,
                },
            }
        );
    }

    #[test]
    fn pointer_address_is_unsupported_for_binding() {
        let err = credential_from_address(POINTER_ADDR).unwrap_err();
        assert_eq!(err, AddressError::Unsupported("pointer address"));
    }

    #[test]
    fn reward_address_is_unsupported() {
        let addr = CardanoAddress::parse(REWARD_ADDR).unwrap();
        assert_eq!(
            addr,
            CardanoAddress::Reward {
                network_id: 1,
                stake: Credential::KeyHash(key_hash(STAKE_KEY_HASH_HEX)),
            }
        );
        let err = addr.payment_key_hash().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported address: reward address");
    }

    #[test]
    fn script_payment_credentials_are_unsupported() {
        for addr in [SCRIPT_BASE_ADDR, SCRIPT_ENTERPRISE_ADDR] {
            let parsed = CardanoAddress::parse(addr).unwrap();
            match &parsed {
                CardanoAddress::Base { payment, .. } | CardanoAddress::Enterprise { payment, .. } => {
                    assert_eq!(payment, &Credential::ScriptHash(key_hash(SCRIPT_HASH_HEX)));
                }
                other => panic!("unexpected shape {other:?}"),
            }
            assert_eq!(
                parsed.payment_key_hash().unwrap_err(),
                AddressError::Unsupported("script payment credential")
            );
        }
    }

    #[test]
    fn byron_header_is_unsupported() {
        // Byron addresses are CBOR; the leading 0x82 has type nibble 8.
        let err = credential_from_address("82d818582183581c").unwrap_err();
        assert_eq!(err, AddressError::Unsupported("byron address"));
    }

    #[test]
    fn reserved_header_is_unsupported() {
        for header in ["91", "a1", "b0", "c1", "d1"] {
            let hex_form = format!("{header}{PAYMENT_KEY_HASH_HEX}");
            assert_eq!(
                credential_from_address(&hex_form),
                Err(AddressError::Unsupported("reserved address type")),
                "header {header}"
            );
        }
    }

    #[test]
    fn wrong_length_enterprise_rejected() {
        let hex_form = format!("61{PAYMENT_KEY_HASH_HEX}00");
        assert!(matches!(
            CardanoAddress::parse(&hex_form).unwrap_err(),
            AddressError::Invalid(_)
        ));
    }

    #[test]
    fn truncated_base_rejected() {
        let hex_form = format!("01{PAYMENT_KEY_HASH_HEX}");
        assert!(CardanoAddress::parse(&hex_form).is_err());
    }

    #[test]
    fn truncated_pointer_rejected() {
        // continuation bit set on the final byte
        let hex_form = format!("41{PAYMENT_KEY_HASH_HEX}818181");
        assert_eq!(
            CardanoAddress::parse(&hex_form).unwrap_err(),
            AddressError::Invalid("truncated pointer".into())
        );
    }

    #[test]
    fn pointer_overflow_rejected() {
        let hex_form = format!("41{PAYMENT_KEY_HASH_HEX}{}7f0000", "ff".repeat(10));
        assert_eq!(
            CardanoAddress::parse(&hex_form).unwrap_err(),
            AddressError::Invalid("pointer value overflows u64".into())
        );
    }

    #[test]
    fn prefix_network_mismatch_rejected() {
        // mainnet header (0x61) under a testnet prefix
        let bytes = hex::decode(format!("61{PAYMENT_KEY_HASH_HEX}")).unwrap();
        let hrp = bech32::Hrp::parse("addr_test").unwrap();
        let text = bech32::encode::<bech32::Bech32>(hrp, &bytes).unwrap();
        assert_eq!(
            CardanoAddress::parse(&text).unwrap_err(),
            AddressError::NetworkMismatch {
                hrp: "addr_test".into(),
                network_id: 1,
            }
        );
    }

    #[test]
    fn unknown_bech32_prefix_rejected() {
        let err = CardanoAddress::parse(
            "addr_vk1w0l2sr2zgfm26ztc6nl9xy8ghsk5sh6ldwemlpmp9xylzy4dtf7st80zhd",
        )
        .unwrap_err();
        assert_eq!(
            err,
            AddressError::Invalid("unexpected bech32 prefix addr_vk".into())
        );
    }

    #[test]
    fn bad_checksum_rejected() {
        let mut tampered = ENTERPRISE_ADDR.to_string();
        tampered.pop();
        tampered.push('9');
        assert!(matches!(
            CardanoAddress::parse(&tampered).unwrap_err(),
            AddressError::Invalid(_)
        ));
    }

    #[test]
    fn invalid_hex_rejected() {
        assert!(matches!(
            CardanoAddress::parse("xyz").unwrap_err(),
            AddressError::Invalid(_)
        ));
    }

    #[test]
    fn empty_address_rejected() {
        assert_eq!(
            CardanoAddress::parse("").unwrap_err(),
            AddressError::Invalid("empty address".into())
        );
    }
}
