//! Credential primitives: password hashing and signed access tokens.
//!
//! # Responsibility
//! - Keep all key material and algorithm choices inside this module tree.
//! - Expose only hash/verify and sign/verify surfaces to services.

pub mod password;
pub mod token;

/// Compares two byte slices without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
