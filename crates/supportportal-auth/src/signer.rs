//! Signature algorithms.
//!
//! [`TokenCodec`](crate::TokenCodec) only sees the [`Signer`] trait, so the
//! algorithm can change without touching any call site.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::TokenError;

type HmacSha512 = Hmac<Sha512>;

/// Produces and checks signatures over the `header.payload` signing input.
pub trait Signer: Send + Sync {
    /// Algorithm name written to the token header.
    fn algorithm(&self) -> &'static str;

    fn sign(&self, message: &[u8]) -> Vec<u8>;

    /// Must compare in constant time.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;
}

/// HMAC with SHA-512 (`HS512`).
#[derive(Clone)]
pub struct HmacSha512Signer {
    mac: HmacSha512,
}

impl HmacSha512Signer {
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidKey`] if `secret` is empty.
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidKey);
        }

        let mac = HmacSha512::new_from_slice(secret).map_err(|_| TokenError::InvalidKey)?;
        Ok(Self { mac })
    }
}

impl Signer for HmacSha512Signer {
    fn algorithm(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(signature).is_ok()
    }
}

impl fmt::Debug for HmacSha512Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSha512Signer")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(HmacSha512Signer::new(b"").unwrap_err(), TokenError::InvalidKey);
    }

    #[test]
    fn test_sign_then_verify() {
        let signer = HmacSha512Signer::new(b"secret").unwrap();
        let signature = signer.sign(b"header.payload");

        assert_eq!(signature.len(), 64);
        assert!(signer.verify(b"header.payload", &signature));
        assert!(!signer.verify(b"header.payloaD", &signature));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let signer = HmacSha512Signer::new(b"secret").unwrap();
        let signature = signer.sign(b"message");

        assert!(!signer.verify(b"message", &signature[..32]));
        assert!(!signer.verify(b"message", &[]));
    }

    #[test]
    fn test_different_keys_disagree() {
        let a = HmacSha512Signer::new(b"key-a").unwrap();
        let b = HmacSha512Signer::new(b"key-b").unwrap();

        assert!(!b.verify(b"message", &a.sign(b"message")));
    }

    #[test]
    fn test_debug_redacts_key() {
        let signer = HmacSha512Signer::new(b"super-secret").unwrap();
        assert!(!format!("{signer:?}").contains("super-secret"));
    }
}
