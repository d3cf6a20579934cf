use crypto_utils::CodecError;
use thiserror::Error;

/// Solana proof verification errors.
///
/// As with the Cardano verifier, `Display` output doubles as the verdict
/// reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolError {
    #[error("Missing fields for Solana bundle")]
    MissingFields,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Public key does not match address")]
    PubkeyAddressMismatch,
}
