use chain_ada::{Cip8Options, KeyPolicy};
use serde::{Deserialize, Serialize};

/// Verification settings shared by every scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyOptions {
    /// How COSE_Key parameters are checked on the Cardano path.
    pub key_policy: KeyPolicy,
    /// Also require a CIP-30 protected-header address to equal the declared
    /// address. Off by default.
    pub bind_signed_address: bool,
}

impl VerifyOptions {
    /// Options that reject COSE keys not labelled as Ed25519.
    pub fn strict() -> Self {
        VerifyOptions {
            key_policy: KeyPolicy::Strict,
            ..Default::default()
        }
    }

    pub(crate) fn cip8(&self) -> Cip8Options {
        Cip8Options {
            key_policy: self.key_policy,
            bind_signed_address: self.bind_signed_address,
        }
    }
}
