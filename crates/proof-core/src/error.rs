use thiserror::Error;

/// Failures that happen before any verification is attempted.
///
/// These are the only errors that escape the dispatcher; everything that
/// goes wrong while checking a proof becomes a rejecting verdict instead.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Empty input: provide a JSON bundle")]
    Empty,

    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
