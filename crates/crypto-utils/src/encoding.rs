//! Text-to-bytes decoders used for bundle fields.
//!
//! Both decoders are strict: any malformed input is an error, never a
//! partially decoded buffer.

use crate::error::CodecError;

/// Decode a hex string (either case) into bytes.
///
/// Odd-length input and non-hex characters are rejected.
pub fn hex_decode(input: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(input).map_err(|e| CodecError::InvalidHex(e.to_string()))
}

/// Decode a Base58 string (Bitcoin alphabet, as used by Solana) into bytes.
pub fn base58_decode(input: &str) -> Result<Vec<u8>, CodecError> {
    bs58::decode(input)
        .into_vec()
        .map_err(|e| CodecError::InvalidBase58(e.to_string()))
}
