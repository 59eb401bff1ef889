//! Salted password hashing.
//!
//! # Responsibility
//! - Derive and verify PBKDF2-HMAC-SHA256 password hashes.
//!
//! # Invariants
//! - Every hash uses a fresh random salt; equal passwords never share one.
//! - The encoded form is self-describing
//!   (`pbkdf2-sha256$<iterations>$<salt-hex>$<hash-hex>`), so stored hashes
//!   stay verifiable when `PBKDF2_ITERATIONS` changes.
//! - Verification never errors: malformed stored hashes verify as `false`.

use super::constant_time_eq;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2-sha256";
const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Hashes a plaintext password with a fresh random salt.
///
/// The plaintext is not retained; callers should drop their copy after this
/// returns.
pub fn hash_password(plaintext: &str) -> String {
    let mut rng = rand::thread_rng();
    let salt: Vec<u8> = (0..SALT_LEN).map(|_| rng.gen()).collect();
    let key = derive_key(plaintext, &salt, PBKDF2_ITERATIONS);

    format!(
        "{SCHEME}${PBKDF2_ITERATIONS}${}${}",
        hex::encode(salt),
        hex::encode(key)
    )
}

/// Verifies a plaintext password against an encoded hash.
///
/// Returns `false` for wrong passwords and for hashes this module cannot
/// parse; the caller cannot distinguish the two cases.
pub fn verify_password(plaintext: &str, encoded: &str) -> bool {
    let Some((salt, iterations, expected)) = parse_encoded(encoded) else {
        return false;
    };

    let key = derive_key(plaintext, &salt, iterations);
    constant_time_eq(&key, &expected)
}

fn derive_key(plaintext: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut key = vec![0u8; KEY_LEN];
    pbkdf2::<Hmac<Sha256>>(plaintext.as_bytes(), salt, iterations, &mut key);
    key
}

fn parse_encoded(encoded: &str) -> Option<(Vec<u8>, u32, Vec<u8>)> {
    let mut fields = encoded.split('$');
    if fields.next()? != SCHEME {
        return None;
    }
    let iterations: u32 = fields.next()?.parse().ok()?;
    let salt = hex::decode(fields.next()?).ok()?;
    let expected = hex::decode(fields.next()?).ok()?;
    if fields.next().is_some() || iterations == 0 {
        return None;
    }
    Some((salt, iterations, expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let encoded = hash_password("pw1");
        assert!(encoded.starts_with("pbkdf2-sha256$"));
        assert!(verify_password("pw1", &encoded));
        assert!(!verify_password("pw2", &encoded));
    }

    #[test]
    fn equal_passwords_get_distinct_salts() {
        let first = hash_password("same-password");
        let second = hash_password("same-password");
        assert_ne!(first, second);
        assert!(verify_password("same-password", &first));
        assert!(verify_password("same-password", &second));
    }

    #[test]
    fn malformed_encodings_verify_as_false() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "plaintext"));
        assert!(!verify_password("pw", "bcrypt$10$aa$bb"));
        assert!(!verify_password("pw", "pbkdf2-sha256$0$aa$bb"));
        assert!(!verify_password("pw", "pbkdf2-sha256$1000$not-hex$bb"));
    }

    #[test]
    fn stored_hash_with_different_iteration_count_still_verifies() {
        let salt = vec![7u8; SALT_LEN];
        let key = derive_key("pw", &salt, 1_000);
        let encoded = format!("{SCHEME}$1000${}${}", hex::encode(&salt), hex::encode(key));
        assert!(verify_password("pw", &encoded));
    }
}
