use crypto_utils::CodecError;
use thiserror::Error;

/// Cardano address decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid address: {0}")]
    Invalid(String),

    #[error("Unsupported address: {0}")]
    Unsupported(&'static str),

    #[error("Address prefix {hrp} does not match network id {network_id}")]
    NetworkMismatch { hrp: String, network_id: u8 },
}

/// CIP-8 verification failures.
///
/// The `Display` text of each variant is the verdict reason reported to the
/// caller, so the wording is part of the output format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaError {
    #[error("Missing fields for Cardano bundle")]
    MissingFields,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Bad COSE_Sign1")]
    BadSign1,

    #[error("Malformed COSE_Sign1")]
    MalformedSign1,

    #[error("Bad COSE_Key")]
    BadCoseKey,

    #[error("Bad COSE_Key: {0}")]
    RejectedCoseKey(String),

    #[error("Missing pubkey")]
    MissingPubkey,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Pubkey does not match address payment keyhash")]
    KeyHashMismatch,

    #[error("Signed address does not match address")]
    SignedAddressMismatch,

    #[error("Payload mismatch")]
    PayloadMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unsupported_address() {
        let err = AddressError::Unsupported("reward address");
        assert_eq!(err.to_string(), "Unsupported address: reward address");
    }

    #[test]
    fn display_network_mismatch() {
        let err = AddressError::NetworkMismatch {
            hrp: "addr_test".into(),
            network_id: 1,
        };
        assert_eq!(
            err.to_string(),
            "Address prefix addr_test does not match network id 1"
        );
    }

    #[test]
    fn display_verdict_reasons() {
        assert_eq!(AdaError::BadSign1.to_string(), "Bad COSE_Sign1");
        assert_eq!(AdaError::MalformedSign1.to_string(), "Malformed COSE_Sign1");
        assert_eq!(AdaError::MissingPubkey.to_string(), "Missing pubkey");
        assert_eq!(AdaError::InvalidSignature.to_string(), "Invalid signature");
        assert_eq!(
            AdaError::KeyHashMismatch.to_string(),
            "Pubkey does not match address payment keyhash"
        );
        assert_eq!(
            AdaError::SignedAddressMismatch.to_string(),
            "Signed address does not match address"
        );
        assert_eq!(AdaError::PayloadMismatch.to_string(), "Payload mismatch");
    }

    #[test]
    fn address_error_passes_through() {
        let err: AdaError = AddressError::Unsupported("pointer address").into();
        assert_eq!(err.to_string(), "Unsupported address: pointer address");
    }

    #[test]
    fn codec_error_passes_through() {
        let err: AdaError = CodecError::InvalidHex("Odd number of digits".into()).into();
        assert_eq!(err.to_string(), "invalid hex: Odd number of digits");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(AdaError::BadCoseKey);
        assert_eq!(err.to_string(), "Bad COSE_Key");
    }
}
