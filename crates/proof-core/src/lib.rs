//! # proof-core
//!
//! Offline verification of signed-message proofs for Cardano (CIP-8) and
//! Solana addresses. A bundle goes in, a [`Verdict`] comes out:
//!
//! ```text
//! JSON value -> ProofBundle::{Cardano, Solana, Unknown}
//!            -> chain_ada::verify_cip8 | chain_sol::verify_sol_message
//!            -> Verdict { ok, reason }
//! ```
//!
//! Every failure after the input has parsed as JSON is reported inside the
//! verdict. Only unreadable input produces an [`InputError`].

pub mod bundle;
pub mod config;
pub mod error;
pub mod metadata;
pub mod verdict;

use serde_json::Value;

pub use bundle::{classify, BundleKind, CardanoBundle, ProofBundle, SolanaBundle};
pub use config::VerifyOptions;
pub use error::InputError;
pub use metadata::MetadataText;
pub use verdict::{Verdict, UNKNOWN_FORMAT};

/// Verify a bundle with default options.
pub fn verify_bundle(value: &Value) -> Verdict {
    verify_bundle_with(value, &VerifyOptions::default())
}

/// Classify `value` and run the matching scheme verifier.
pub fn verify_bundle_with(value: &Value, options: &VerifyOptions) -> Verdict {
    verify_parsed(&ProofBundle::from_value(value), options)
}

/// Run the scheme verifier for an already classified bundle.
pub fn verify_parsed(bundle: &ProofBundle, options: &VerifyOptions) -> Verdict {
    let verdict = match bundle {
        ProofBundle::Cardano(cardano) => Verdict::from_result(
            cardano
                .as_proof()
                .and_then(|proof| chain_ada::verify_cip8(&proof, options.cip8())),
        ),
        ProofBundle::Solana(solana) => Verdict::from_result(
            solana
                .as_proof()
                .and_then(|proof| chain_sol::verify_sol_message(&proof)),
        ),
        ProofBundle::Unknown => Verdict::reject(UNKNOWN_FORMAT),
    };

    match verdict.reason() {
        None => tracing::debug!(kind = ?bundle.kind(), "proof accepted"),
        Some(reason) => tracing::debug!(kind = ?bundle.kind(), reason, "proof rejected"),
    }
    verdict
}

/// Parse a JSON document and verify it with default options.
pub fn verify_json(input: &str) -> Result<Verdict, InputError> {
    verify_json_with(input, &VerifyOptions::default())
}

/// Parse a JSON document and verify it.
///
/// Surrounding whitespace is ignored; blank input is an error.
pub fn verify_json_with(input: &str, options: &VerifyOptions) -> Result<Verdict, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::Empty);
    }
    let value: Value = serde_json::from_str(input)?;
    Ok(verify_bundle_with(&value, options))
}
