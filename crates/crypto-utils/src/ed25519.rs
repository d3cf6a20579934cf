//! Ed25519 signature verification.
//!
//! Both Cardano payment keys and Solana accounts sign with Ed25519, so this
//! is the single place where a proof's unforgeability is actually checked.
//! Everything around it is structural bookkeeping.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Verify `signature` over `message` under `public_key`.
///
/// Returns `false` (never panics) when the signature is not 64 bytes, the
/// key is not 32 bytes, the key does not decode to a curve point, or the
/// signature does not verify.
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(key_bytes) = <[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
        tracing::trace!(len = public_key.len(), "ed25519 public key has wrong length");
        return false;
    };
    let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        tracing::trace!(len = signature.len(), "ed25519 signature has wrong length");
        return false;
    };

    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        tracing::trace!("ed25519 public key is not a valid point");
        return false;
    };
    let sig = Signature::from_bytes(&sig_bytes);

    key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn test_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn valid_signature_verifies() {
        let key = test_key();
        let sig = key.sign(b"hello");
        assert!(verify(
            b"hello",
            &sig.to_bytes(),
            key.verifying_key().as_bytes()
        ));
    }

    #[test]
    fn wrong_message_rejected() {
        let key = test_key();
        let sig = key.sign(b"hello");
        assert!(!verify(
            b"hellp",
            &sig.to_bytes(),
            key.verifying_key().as_bytes()
        ));
    }

    #[test]
    fn flipped_signature_byte_rejected() {
        let key = test_key();
        let mut sig = key.sign(b"hello").to_bytes();
        sig[10] ^= 0x01;
        assert!(!verify(b"hello", &sig, key.verifying_key().as_bytes()));
    }

    #[test]
    fn wrong_key_rejected() {
        let key = test_key();
        let other = SigningKey::from_bytes(&[8u8; 32]);
        let sig = key.sign(b"hello");
        assert!(!verify(
            b"hello",
            &sig.to_bytes(),
            other.verifying_key().as_bytes()
        ));
    }

    #[test]
    fn short_signature_rejected_without_panic() {
        let key = test_key();
        assert!(!verify(b"hello", &[0u8; 63], key.verifying_key().as_bytes()));
    }

    #[test]
    fn long_key_rejected_without_panic() {
        let key = test_key();
        let sig = key.sign(b"hello");
        let mut long_key = key.verifying_key().as_bytes().to_vec();
        long_key.push(0);
        assert!(!verify(b"hello", &sig.to_bytes(), &long_key));
    }

    #[test]
    fn empty_inputs_rejected() {
        assert!(!verify(b"", &[], &[]));
    }

    #[test]
    fn random_keys_roundtrip() {
        let mut rng = rand::rngs::OsRng;
        for _ in 0..8 {
            let key = SigningKey::generate(&mut rng);
            let sig = key.sign(b"proof-of-post");
            assert!(verify(
                b"proof-of-post",
                &sig.to_bytes(),
                key.verifying_key().as_bytes()
            ));
        }
    }
}
