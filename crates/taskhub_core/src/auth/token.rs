//! Signed access tokens.
//!
//! # Responsibility
//! - Issue and verify HMAC-SHA256 signed tokens carrying identity claims.
//!
//! # Invariants
//! - The signing key never leaves this module; callers see opaque strings.
//! - Any byte change to payload or signature fails verification.
//! - Expiry is opt-in constructor configuration; a signer without expiry
//!   issues tokens that stay valid as long as the key does.
//!
//! Token shape: `base64url(claims JSON) "." hex(HMAC-SHA256 over payload)`.

use super::constant_time_eq;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

pub type TokenResult<T> = Result<T, TokenError>;

/// Error for token issuance and verification.
#[derive(Debug)]
pub enum TokenError {
    /// Token text does not have the expected `payload.signature` shape or
    /// its payload cannot be decoded.
    Malformed(String),
    /// Signature does not match the payload under the configured key.
    InvalidSignature,
    /// Claims carry an `exp` that lies in the past beyond skew tolerance.
    Expired { expired_at: u64 },
    /// Claims could not be serialized at issuance.
    Claims(serde_json::Error),
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed token: {message}"),
            Self::InvalidSignature => write!(f, "token signature mismatch"),
            Self::Expired { expired_at } => write!(f, "token expired at {expired_at}"),
            Self::Claims(err) => write!(f, "failed to encode token claims: {err}"),
        }
    }
}

impl Error for TokenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Claims(err) => Some(err),
            _ => None,
        }
    }
}

/// Identity claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Stable identity claim; usernames are immutable.
    pub username: String,
    /// Issued-at, unix seconds.
    pub iat: u64,
    /// Expiry, unix seconds. Absent when the signer has no expiry policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Issues and verifies signed access tokens.
///
/// Signing algorithm and key live here; expiry duration and clock-skew
/// tolerance are explicit configuration rather than assumed defaults.
pub struct TokenSigner {
    key: Vec<u8>,
    expiry: Option<Duration>,
    clock_skew: Duration,
}

impl TokenSigner {
    /// Creates a signer with no expiry policy.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            expiry: None,
            clock_skew: Duration::ZERO,
        }
    }

    /// Configures issued tokens to expire after `expiry`, tolerating
    /// `clock_skew` of drift between issuer and verifier clocks.
    pub fn with_expiry(mut self, expiry: Duration, clock_skew: Duration) -> Self {
        self.expiry = Some(expiry);
        self.clock_skew = clock_skew;
        self
    }

    /// Issues a signed token for `username`.
    pub fn sign(&self, username: &str) -> TokenResult<String> {
        let iat = unix_now();
        let claims = TokenClaims {
            username: username.to_string(),
            iat,
            exp: self.expiry.map(|expiry| iat + expiry.as_secs()),
        };

        let json = serde_json::to_vec(&claims).map_err(TokenError::Claims)?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = hex::encode(self.compute_mac(payload.as_bytes()));
        Ok(format!("{payload}.{signature}"))
    }

    /// Verifies signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> TokenResult<TokenClaims> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| TokenError::Malformed("missing signature separator".to_string()))?;

        let presented = hex::decode(signature)
            .map_err(|_| TokenError::Malformed("signature is not hex".to_string()))?;
        let expected = self.compute_mac(payload.as_bytes());
        if !constant_time_eq(&presented, &expected) {
            return Err(TokenError::InvalidSignature);
        }

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed("payload is not base64url".to_string()))?;
        let claims: TokenClaims = serde_json::from_slice(&json)
            .map_err(|err| TokenError::Malformed(format!("payload is not claims JSON: {err}")))?;

        if let Some(exp) = claims.exp {
            if unix_now() > exp + self.clock_skew.as_secs() {
                return Err(TokenError::Expired { expired_at: exp });
            }
        }

        Ok(claims)
    }

    fn compute_mac(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.key)
            .expect("HMAC accepts keys of any length");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
