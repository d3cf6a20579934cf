//! A minimal CBOR value tree.
//!
//! COSE structures are small, so rather than deriving codecs for each shape
//! we decode into a generic [`TaggedValue`] and let callers match on it.
//! Only the data model COSE_Sign1 and COSE_Key actually use is supported:
//!
//! ```text
//! major 0/1   integers (64-bit argument, stored as i128)
//! major 2     byte strings (definite length)
//! major 3     text strings (definite length)
//! major 4     arrays (definite length)
//! major 5     maps (definite length, insertion order kept)
//! major 6     tags
//! major 7     false / true / null
//! ```
//!
//! Floats, `undefined`, other simple values and indefinite-length items are
//! rejected as unsupported.

use std::convert::Infallible;

use minicbor::data::{Tag, Type};
use minicbor::{Decoder, Encoder};

use crate::error::CodecError;

/// Maximum nesting depth accepted by [`decode`].
pub const MAX_DEPTH: usize = 32;

/// A decoded CBOR item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedValue {
    Integer(i128),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<TaggedValue>),
    /// Label/value pairs in wire order.
    Map(Vec<(TaggedValue, TaggedValue)>),
    Bool(bool),
    Null,
    Tag(u64, Box<TaggedValue>),
}

impl TaggedValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TaggedValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[TaggedValue]> {
        match self {
            TaggedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(TaggedValue, TaggedValue)]> {
        match self {
            TaggedValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            TaggedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TaggedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Look up an integer label in a map. Returns `None` for non-maps.
    ///
    /// If a label appears more than once the first occurrence wins.
    pub fn map_get_int(&self, label: i128) -> Option<&TaggedValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_integer() == Some(label))
            .map(|(_, v)| v)
    }

    /// Encode this value as CBOR.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }
}

/// Decode exactly one CBOR item from `bytes`.
///
/// Fails on truncated input, unsupported items, nesting deeper than
/// [`MAX_DEPTH`], or bytes left over after the item.
pub fn decode(bytes: &[u8]) -> Result<TaggedValue, CodecError> {
    let mut d = Decoder::new(bytes);
    let value = decode_item(&mut d, 0)?;

    let remaining = bytes.len() - d.position();
    if remaining != 0 {
        return Err(CodecError::TrailingBytes(remaining));
    }
    Ok(value)
}

fn decode_item(d: &mut Decoder<'_>, depth: usize) -> Result<TaggedValue, CodecError> {
    if depth > MAX_DEPTH {
        return Err(CodecError::TooDeep(MAX_DEPTH));
    }

    let value = match d.datatype().map_err(invalid)? {
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => {
            TaggedValue::Integer(i128::from(d.u64().map_err(invalid)?))
        }
        Type::I8 | Type::I16 | Type::I32 | Type::I64 => {
            TaggedValue::Integer(i128::from(d.i64().map_err(invalid)?))
        }
        Type::Bytes => TaggedValue::Bytes(d.bytes().map_err(invalid)?.to_vec()),
        Type::String => TaggedValue::Text(d.str().map_err(invalid)?.to_owned()),
        Type::Array => {
            let len = definite(d.array().map_err(invalid)?)?;
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(decode_item(d, depth + 1)?);
            }
            TaggedValue::Array(items)
        }
        Type::Map => {
            let len = definite(d.map().map_err(invalid)?)?;
            let mut entries = Vec::new();
            for _ in 0..len {
                let k = decode_item(d, depth + 1)?;
                let v = decode_item(d, depth + 1)?;
                entries.push((k, v));
            }
            TaggedValue::Map(entries)
        }
        Type::Tag => {
            let tag = d.tag().map_err(invalid)?;
            TaggedValue::Tag(tag.as_u64(), Box::new(decode_item(d, depth + 1)?))
        }
        Type::Bool => TaggedValue::Bool(d.bool().map_err(invalid)?),
        Type::Null => {
            d.null().map_err(invalid)?;
            TaggedValue::Null
        }
        other => return Err(CodecError::UnsupportedCbor(format!("{other:?}"))),
    };
    Ok(value)
}

fn definite(len: Option<u64>) -> Result<u64, CodecError> {
    len.ok_or_else(|| CodecError::UnsupportedCbor("indefinite length".into()))
}

fn invalid(e: minicbor::decode::Error) -> CodecError {
    CodecError::InvalidCbor(e.to_string())
}

/// Encode a value tree as definite-length CBOR with minimal-length heads.
pub fn encode(value: &TaggedValue) -> Result<Vec<u8>, CodecError> {
    let mut e = Encoder::new(Vec::new());
    encode_item(&mut e, value)?;
    Ok(e.into_writer())
}

fn encode_item(e: &mut Encoder<Vec<u8>>, value: &TaggedValue) -> Result<(), CodecError> {
    match value {
        TaggedValue::Integer(n) => {
            if let Ok(u) = u64::try_from(*n) {
                e.u64(u).map_err(infallible)?;
            } else if let Ok(i) = i64::try_from(*n) {
                e.i64(i).map_err(infallible)?;
            } else {
                return Err(CodecError::UnsupportedCbor(format!(
                    "integer {n} outside 64-bit range"
                )));
            }
        }
        TaggedValue::Bytes(b) => {
            e.bytes(b).map_err(infallible)?;
        }
        TaggedValue::Text(s) => {
            e.str(s).map_err(infallible)?;
        }
        TaggedValue::Array(items) => {
            e.array(items.len() as u64).map_err(infallible)?;
            for item in items {
                encode_item(e, item)?;
            }
        }
        TaggedValue::Map(entries) => {
            e.map(entries.len() as u64).map_err(infallible)?;
            for (k, v) in entries {
                encode_item(e, k)?;
                encode_item(e, v)?;
            }
        }
        TaggedValue::Bool(b) => {
            e.bool(*b).map_err(infallible)?;
        }
        TaggedValue::Null => {
            e.null().map_err(infallible)?;
        }
        TaggedValue::Tag(tag, inner) => {
            e.tag(Tag::new(*tag)).map_err(infallible)?;
            encode_item(e, inner)?;
        }
    }
    Ok(())
}

// Writing into a Vec cannot fail.
fn infallible(e: minicbor::encode::Error<Infallible>) -> CodecError {
    CodecError::InvalidCbor(e.to_string())
}
