//! Text fields that may arrive chunked.
//!
//! Cardano transaction metadata caps strings at 64 bytes, so long values
//! (hex signatures, keys) are stored as arrays of string chunks. Bundles
//! lifted from metadata can therefore carry either form for any field.

use serde::Deserialize;
use serde_json::Value;

/// A text field given either whole or as ordered chunks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MetadataText {
    Scalar(String),
    Chunks(Vec<String>),
}

impl MetadataText {
    /// Read a JSON value as text. Anything other than a string or an array
    /// of strings yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        MetadataText::deserialize(value).ok()
    }

    /// Concatenate chunks in order.
    pub fn flatten(&self) -> String {
        match self {
            MetadataText::Scalar(s) => s.clone(),
            MetadataText::Chunks(chunks) => chunks.concat(),
        }
    }
}
