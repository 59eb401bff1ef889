//! Account domain model.
//!
//! # Responsibility
//! - Define the credential-bearing identity record for task ownership.
//!
//! # Invariants
//! - `id` is stable and never reused for another account.
//! - `username` is unique across all accounts (case-sensitive) and immutable.
//! - `password_hash` is the encoded output of the password hashing scheme;
//!   plaintext passwords never appear on this type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = Uuid;

/// Registered identity that owns tasks.
///
/// Accounts are created once at sign-up and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable global ID referenced by `Task::owner`.
    pub id: AccountId,
    /// Login name, unique case-sensitively.
    pub username: String,
    /// Encoded salted hash, opaque to everything but `auth::password`.
    pub password_hash: String,
}

impl Account {
    /// Creates a new account with a generated stable ID.
    ///
    /// The caller supplies an already-hashed password; this constructor never
    /// sees plaintext.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), username, password_hash)
    }

    /// Creates an account with a caller-provided stable ID.
    ///
    /// Used by persistence paths where identity already exists.
    pub fn with_id(
        id: AccountId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
