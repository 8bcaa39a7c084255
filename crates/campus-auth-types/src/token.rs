//! Signed identity tokens (JWT, HS256).

use std::fmt;
#[cfg(any(feature = "ISSUE_TOKENS", test))]
use std::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode};
#[cfg(any(feature = "ISSUE_TOKENS", test))]
use jsonwebtoken::{Header, encode};
use serde::Deserialize;
#[cfg(any(feature = "ISSUE_TOKENS", test))]
use serde::Serialize;

use campus_domain::id::UserId;
use campus_domain::user::UserRole;

/// The only signature scheme accepted by [`TokenService::verify`].
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub subject_id: UserId,
    /// Role at issue time. A hint only: authorization re-reads the stored role.
    pub role: Option<UserRole>,
    pub email: Option<String>,
    pub exp: u64,
}

/// A freshly signed token and its expiration (seconds since UNIX epoch).
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

/// Errors returned by [`TokenService`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing token")]
    Missing,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("unexpected signing algorithm")]
    InvalidAlgorithm,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id, decimal string |
/// | `role` | custom, optional | `"user"` / `"admin"` |
/// | `email` | custom, optional | email at issue time |
/// | `exp` | `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`ISSUE_TOKENS`** feature; only the issuing
/// service (and test helpers) enable it.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "ISSUE_TOKENS", test), derive(Serialize))]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: u64,
}

/// Issues and verifies identity tokens with a symmetric key shared within the deployment.
///
/// Stateless: validity is a function of the signature, the expiration and the
/// current time only. Cheap to clone; hand one to every component that needs it.
#[derive(Clone)]
pub struct TokenService {
    #[cfg_attr(not(any(feature = "ISSUE_TOKENS", test)), allow(dead_code))]
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token for `subject_id` expiring `ttl` from now.
    #[cfg(any(feature = "ISSUE_TOKENS", test))]
    pub fn issue(
        &self,
        subject_id: UserId,
        role: Option<UserRole>,
        email: Option<&str>,
        ttl: Duration,
    ) -> Result<IssuedToken, AuthError> {
        let exp = now_secs().saturating_add(ttl.as_secs());
        let claims = IdentityClaims {
            sub: subject_id.to_string(),
            role,
            email: email.map(str::to_owned),
            exp,
        };
        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding)
            .map_err(AuthError::Signing)?;
        Ok(IssuedToken { token, exp })
    }

    /// Verify signature, algorithm and expiration, returning the embedded identity.
    ///
    /// No leeway is applied: a token is rejected as soon as `exp` is reached.
    pub fn verify(&self, token: &str) -> Result<TokenInfo, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Missing);
        }

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<IdentityClaims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "identity token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    AuthError::InvalidAlgorithm
                }
                _ => AuthError::Malformed,
            }
        })?;

        // `validate_exp` compares against `exp` with `<`; equality still passes it.
        if data.claims.exp <= now_secs() {
            return Err(AuthError::Expired);
        }

        let subject_id = data
            .claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::Malformed)?;

        Ok(TokenInfo {
            subject_id,
            role: data.claims.role,
            email: data.claims.email,
            exp: data.claims.exp,
        })
    }
}
