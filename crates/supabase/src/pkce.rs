//! PKCE (RFC 7636) helpers for the OAuth code flow.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Verifier length; RFC 7636 allows 43..=128 characters.
pub const VERIFIER_LENGTH: usize = 64;

/// Challenge method sent to the authorize endpoint.
pub const CHALLENGE_METHOD: &str = "s256";

/// Generate a random alphanumeric code verifier.
pub fn generate_verifier() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(VERIFIER_LENGTH)
        .map(char::from)
        .collect()
}

/// `BASE64URL(SHA256(verifier))` without padding.
pub fn challenge_s256(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
