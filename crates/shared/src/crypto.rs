//! Cryptographic utilities for server API key generation and comparison.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a remote server API key.
pub const API_KEY_LENGTH: usize = 64;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a new random API key of [`API_KEY_LENGTH`] alphanumeric characters.
pub fn generate_api_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LENGTH)
        .map(char::from)
        .collect()
}

/// Compares two API keys without leaking the mismatch position.
///
/// Both sides are hashed first so the byte-wise comparison runs over
/// fixed-length digests rather than the secrets themselves.
pub fn api_keys_equal(provided: &str, stored: &str) -> bool {
    let a = Sha256::digest(provided.as_bytes());
    let b = Sha256::digest(stored.as_bytes());

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(hash.len(), 64);
        // SHA256 of empty string
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        let hash1 = sha256_hex("same_input");
        let hash2 = sha256_hex("same_input");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_generate_api_key_length() {
        let key = generate_api_key();
        assert_eq!(key.len(), API_KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_api_key_uniqueness() {
        let key1 = generate_api_key();
        let key2 = generate_api_key();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_api_keys_equal_matching() {
        let key = generate_api_key();
        assert!(api_keys_equal(&key, &key));
    }

    #[test]
    fn test_api_keys_equal_mismatch() {
        assert!(!api_keys_equal("abc", "abd"));
        assert!(!api_keys_equal("abc", "abcd"));
        assert!(!api_keys_equal("", "x"));
    }

    #[test]
    fn test_api_keys_equal_empty() {
        assert!(api_keys_equal("", ""));
    }
}
