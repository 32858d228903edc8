//! Feishu webhook signature generation

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Result, WebhookError};

type HmacSha256 = Hmac<Sha256>;

/// A timestamp/signature pair for a signed payload.
///
/// Feishu validates the signature against the timestamp it was computed
/// from, so the two always travel together; a signature cannot be reused
/// with a different timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    timestamp: i64,
    sign: String,
}

impl Signature {
    /// Sign a Unix timestamp with the shared webhook secret.
    ///
    /// The signing key is the UTF-8 bytes of `"{timestamp}\n{secret}"` and
    /// the MAC is computed over an empty message, per the Feishu custom-bot
    /// security contract. The digest is base64-encoded.
    pub fn generate(timestamp: i64, secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(WebhookError::Config(
                "signing requested but the connection has no secret".to_string(),
            ));
        }

        let key = format!("{timestamp}\n{secret}");
        let mut mac =
            HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take any size key");
        mac.update(b"");
        let digest = mac.finalize().into_bytes();

        Ok(Self {
            timestamp,
            sign: STANDARD.encode(digest),
        })
    }

    /// The timestamp this signature was computed from.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The base64-encoded HMAC-SHA256 digest.
    pub fn sign(&self) -> &str {
        &self.sign
    }
}
