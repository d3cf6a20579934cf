use thiserror::Error;

/// Decoding errors for the text and binary codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid CBOR: {0}")]
    InvalidCbor(String),

    #[error("unsupported CBOR item: {0}")]
    UnsupportedCbor(String),

    #[error("CBOR nesting exceeds depth {0}")]
    TooDeep(usize),

    #[error("trailing bytes after CBOR item: {0}")]
    TrailingBytes(usize),
}
