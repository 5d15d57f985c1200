//! Per-session secrets and the CSRF token codec.
//!
//! A token is `"<signature>.<message>"` where `message` is a random nonce
//! and `signature` is HMAC-SHA256 over the message keyed by the session
//! secret, both base64url-encoded. Anyone can read a token; only the
//! holder of the secret can mint one that verifies.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Secret length in raw bytes.
pub const SECRET_LEN: usize = 32;

/// Opaque per-session secret, held only in the httpOnly cookie.
///
/// Deliberately no Debug/Display: the raw bytes must never end up in logs
/// or error bodies.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret([u8; SECRET_LEN]);

impl Secret {
    /// Generate a fresh cryptographically random secret.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse a cookie value back into a secret.
    ///
    /// Returns None unless the value decodes to exactly SECRET_LEN bytes,
    /// so truncated or tampered cookies count as absent and get rotated.
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        let bytes: [u8; SECRET_LEN] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Encode for storage in the cookie.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Stateless token derivation and verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCodec;

impl TokenCodec {
    /// Derive a fresh token bound to the given secret.
    pub fn issue(&self, secret: &Secret) -> String {
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);
        let message = URL_SAFE_NO_PAD.encode(nonce);
        let signature = URL_SAFE_NO_PAD.encode(sign(secret, &message));
        format!("{signature}.{message}")
    }

    /// Check a presented token against the secret.
    ///
    /// Constant-time on the signature comparison; malformed input of any
    /// shape returns false rather than an error.
    pub fn verify(&self, secret: &Secret, token: &str) -> bool {
        let Some((signature, message)) = token.split_once('.') else {
            return false;
        };
        let Ok(presented) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        let expected = sign(secret, message);
        presented.ct_eq(&expected).into()
    }
}

fn sign(secret: &Secret, message: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
