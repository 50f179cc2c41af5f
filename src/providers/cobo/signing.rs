// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cobo WaaS 2 API request signing.
//!
//! Each request is authenticated with three headers:
//!
//! - `BIZ-API-KEY`: hex-encoded Ed25519 public key
//! - `BIZ-API-NONCE`: Unix timestamp in milliseconds
//! - `BIZ-API-SIGNATURE`: hex-encoded Ed25519 signature over
//!   `SHA256(SHA256("{METHOD}|{path}|{nonce}|{query}|{body}"))`

use std::fmt;

use ed25519_dalek::{Signer, SigningKey};
use sha2::{Digest, Sha256};

use super::CoboError;

pub const API_KEY_HEADER: &str = "BIZ-API-KEY";
pub const NONCE_HEADER: &str = "BIZ-API-NONCE";
pub const SIGNATURE_HEADER: &str = "BIZ-API-SIGNATURE";

/// Ed25519 signer holding the API private key.
#[derive(Clone)]
pub struct RequestSigner {
    signing_key: SigningKey,
    api_key: String,
}

impl RequestSigner {
    /// Build a signer from a hex-encoded 32-byte private key.
    pub fn from_hex(secret: &str) -> Result<Self, CoboError> {
        let trimmed = secret.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed)
            .map_err(|e| CoboError::InvalidKey(format!("secret is not valid hex: {e}")))?;
        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            CoboError::InvalidKey(format!("secret must be 32 bytes, got {}", bytes.len()))
        })?;

        let signing_key = SigningKey::from_bytes(&seed);
        let api_key = hex::encode(signing_key.verifying_key().as_bytes());

        Ok(Self {
            signing_key,
            api_key,
        })
    }

    /// Hex public key sent as `BIZ-API-KEY`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Produce the hex `BIZ-API-SIGNATURE` value for a request.
    pub fn sign(&self, method: &str, path: &str, nonce: &str, query: &str, body: &str) -> String {
        let digest = signing_digest(method, path, nonce, query, body);
        hex::encode(self.signing_key.sign(&digest).to_bytes())
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

pub fn string_to_sign(method: &str, path: &str, nonce: &str, query: &str, body: &str) -> String {
    format!("{method}|{path}|{nonce}|{query}|{body}")
}

fn signing_digest(method: &str, path: &str, nonce: &str, query: &str, body: &str) -> [u8; 32] {
    let message = string_to_sign(method, path, nonce, query, body);
    let first = Sha256::digest(message.as_bytes());
    Sha256::digest(first).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};

    const SECRET: &str = "1111111111111111111111111111111111111111111111111111111111111111";

    #[test]
    fn string_to_sign_joins_with_pipes() {
        assert_eq!(
            string_to_sign("GET", "/v2/wallets", "1700000000000", "limit=10", ""),
            "GET|/v2/wallets|1700000000000|limit=10|"
        );
    }

    #[test]
    fn api_key_is_hex_public_key() {
        let signer = RequestSigner::from_hex(SECRET).unwrap();
        assert_eq!(signer.api_key().len(), 64);
        assert!(signer.api_key().chars().all(|c| c.is_ascii_hexdigit()));

        let prefixed = RequestSigner::from_hex(&format!("0x{SECRET}")).unwrap();
        assert_eq!(prefixed.api_key(), signer.api_key());
    }

    #[test]
    fn signature_verifies_against_double_sha256_digest() {
        let signer = RequestSigner::from_hex(SECRET).unwrap();
        let signature_hex = signer.sign("POST", "/v2/transactions/transfer", "42", "", r#"{"a":1}"#);

        let signature_bytes: [u8; 64] = hex::decode(&signature_hex).unwrap().try_into().unwrap();
        let signature = Signature::from_bytes(&signature_bytes);
        let digest = signing_digest("POST", "/v2/transactions/transfer", "42", "", r#"{"a":1}"#);

        signer
            .signing_key
            .verifying_key()
            .verify(&digest, &signature)
            .expect("signature should verify");
    }

    #[test]
    fn signatures_are_deterministic_and_input_sensitive() {
        let signer = RequestSigner::from_hex(SECRET).unwrap();
        let a = signer.sign("GET", "/v2/wallets", "1", "limit=10", "");
        let b = signer.sign("GET", "/v2/wallets", "1", "limit=10", "");
        let c = signer.sign("GET", "/v2/wallets", "2", "limit=10", "");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn malformed_secrets_are_rejected() {
        assert!(matches!(
            RequestSigner::from_hex("not-hex"),
            Err(CoboError::InvalidKey(_))
        ));
        assert!(matches!(
            RequestSigner::from_hex("abcd"),
            Err(CoboError::InvalidKey(_))
        ));
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let signer = RequestSigner::from_hex(SECRET).unwrap();
        let rendered = format!("{:?}", signer);
        assert!(rendered.contains(signer.api_key()));
        assert!(!rendered.contains(SECRET));
    }
}
