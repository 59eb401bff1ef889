//! Account registration and sign-in use-cases.
//!
//! # Responsibility
//! - Own the credential verification path and token issuance.
//!
//! # Invariants
//! - Plaintext passwords are hashed immediately and never stored or logged.
//! - A failed sign-in gives no signal whether the username exists; unknown
//!   user and wrong password are the same error.

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{TokenError, TokenSigner};
use crate::model::account::Account;
use crate::repo::account_repo::AccountRepository;
use crate::repo::RepoError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error surface of [`AuthService`].
#[derive(Debug)]
pub enum AuthError {
    /// Registration-time duplicate. Revealing that a username is taken is
    /// expected sign-up feedback.
    UsernameTaken(String),
    /// Credential mismatch, intentionally indistinguishable between
    /// "unknown user" and "wrong password".
    InvalidCredentials,
    /// Token issuance failed.
    Token(TokenError),
    /// The backing store failed unexpectedly.
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameTaken(username) => write!(f, "username already exists: {username}"),
            Self::InvalidCredentials => write!(f, "please check your login credentials"),
            Self::Token(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Token(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

/// Signed token handed to a successfully authenticated caller.
///
/// Opaque to this service after issuance; the consuming boundary resolves it
/// back to an identity via [`TokenSigner::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
}

/// Use-case service for account registration and authentication.
pub struct AuthService<R: AccountRepository> {
    repo: R,
    signer: TokenSigner,
}

impl<R: AccountRepository> AuthService<R> {
    /// Creates a service using the provided repository and token signer.
    pub fn new(repo: R, signer: TokenSigner) -> Self {
        Self { repo, signer }
    }

    /// Registers a new account.
    ///
    /// The plaintext password is hashed with a fresh salt and dropped; only
    /// the encoded hash is persisted. Fails with
    /// [`AuthError::UsernameTaken`] when the username already exists, and
    /// the existing account stays unchanged.
    pub fn sign_up(&self, username: &str, password: &str) -> Result<(), AuthError> {
        debug!("event=sign_up module=auth status=start username={username}");

        let account = Account::new(username, hash_password(password));
        match self.repo.insert_account(&account) {
            Ok(_) => {
                info!("event=sign_up module=auth status=ok username={username}");
                Ok(())
            }
            Err(RepoError::Conflict { username }) => {
                debug!("event=sign_up module=auth status=conflict username={username}");
                Err(AuthError::UsernameTaken(username))
            }
            Err(err) => Err(AuthError::Repo(err)),
        }
    }

    /// Verifies credentials and issues a signed access token.
    ///
    /// The token's claims carry the username as the stable identity claim.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        debug!("event=sign_in module=auth status=start username={username}");

        let account = self
            .repo
            .find_by_username(username)
            .map_err(AuthError::Repo)?;

        match account {
            Some(account) if verify_password(password, &account.password_hash) => {
                let token = self.signer.sign(&account.username).map_err(AuthError::Token)?;
                info!("event=sign_in module=auth status=ok username={username}");
                Ok(AccessToken { token })
            }
            // Same rejection for unknown usernames and wrong passwords.
            _ => {
                debug!("event=sign_in module=auth status=rejected username={username}");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
