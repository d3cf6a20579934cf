use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason given when a bundle matches neither scheme.
pub const UNKNOWN_FORMAT: &str = "Unknown bundle format";

/// Outcome of one verification: `{"ok": bool, "reason": string|null}`.
///
/// `reason` is `None` exactly when `ok` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    ok: bool,
    reason: Option<String>,
}

impl Verdict {
    pub fn valid() -> Self {
        Verdict {
            ok: true,
            reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Verdict {
            ok: false,
            reason: Some(reason.into()),
        }
    }

    /// Map a scheme verifier's result to a verdict, using the error's
    /// display text as the reason.
    pub fn from_result<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Verdict::valid(),
            Err(e) => Verdict::reject(e.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ok
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
