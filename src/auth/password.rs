//! Salted-SHA-256 password hashing.
//!
//! Stored format is `salt$hash`: `salt` is 8 random bytes rendered as 16 hex
//! characters, `hash` is the lowercase hex SHA-256 digest of
//! `password ++ salt`. The format is fixed by the existing user table, so it
//! cannot be swapped for a slow hash without a migration of stored rows.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 8;

/// Derive a fresh `salt$hash` string for a new password.
pub fn derive_hash(password: &str) -> String {
    let salt = generate_salt();
    let digest = hash_with_salt(password, &salt);
    format!("{salt}${digest}")
}

/// Check a password against a stored `salt$hash` value.
///
/// Fails closed: an empty value, a missing separator, or more than one `$`
/// yields `false` rather than an error. Digest comparison is constant-time.
pub fn verify(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    if salt.is_empty() || expected.is_empty() || expected.contains('$') {
        return false;
    }
    let computed = hash_with_salt(password, salt);
    constant_time_eq(computed.as_bytes(), expected.as_bytes())
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_with_salt(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
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
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let stored = derive_hash(password);
        assert!(verify(password, &stored));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let stored = derive_hash("correct-horse-battery-staple");
        assert!(!verify("wrong-password", &stored));
    }

    #[test]
    fn verify_fails_closed_on_malformed_input() {
        assert!(!verify("anything", ""));
        assert!(!verify("anything", "no-dollar-sign"));
        assert!(!verify("anything", "$"));
        assert!(!verify("anything", "salt$hash$extra"));
    }

    #[test]
    fn stored_format_is_salt_dollar_hash() {
        let stored = derive_hash("Passw0rd!");
        let (salt, hash) = stored.split_once('$').expect("separator present");
        assert_eq!(salt.len(), SALT_BYTES * 2);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let a = derive_hash("SamePass1");
        let b = derive_hash("SamePass1");
        assert_ne!(a, b);
    }

    #[test]
    fn constant_time_eq_works() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
