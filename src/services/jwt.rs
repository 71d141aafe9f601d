use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject - user_id as string
    pub sub: String,
    /// Email of the subject at issuance, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at time as Unix timestamp
    pub iat: i64,
    /// Expiration time as Unix timestamp
    pub exp: i64,
}

impl AuthClaims {
    /// Parses the subject as a user id.
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| Error::unauthorized("invalid token subject").with_source(e))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AuthClaims,
}

/// Generates an HS256-signed access token
///
/// # Arguments
/// * `secret` - The JWT secret key for signing
/// * `user_id` - The subject's UUID
/// * `email` - Optional email embedded in the claims
/// * `ttl` - Time until the token expires
///
/// # Example
/// ```rust,no_run
/// use userhub::services::jwt::issue_token;
/// use uuid::Uuid;
///
/// let issued = issue_token("my-secret", Uuid::now_v7(), Some("a@x.com"), chrono::Duration::minutes(15))?;
/// assert!(!issued.token.is_empty());
/// # Ok::<(), userhub::error::Error>(())
/// ```
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    email: Option<&str>,
    ttl: Duration,
) -> Result<IssuedToken> {
    let now = Utc::now();
    let expiration = now + ttl;

    let claims = AuthClaims {
        sub: user_id.to_string(),
        email: email.filter(|e| !e.is_empty()).map(str::to_string),
        iat: now.timestamp(),
        exp: expiration.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::internal("failed to sign token").with_source(e))?;

    Ok(IssuedToken { token, claims })
}

/// Verifies a token and returns its claims
///
/// Fails with `unauthorized` when the signature does not match, the token is
/// malformed or it has expired (with jsonwebtoken's default leeway).
pub fn verify_token(token: &str, secret: &str) -> Result<AuthClaims> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        let message = match e.kind() {
            ErrorKind::ExpiredSignature => "token has expired",
            ErrorKind::InvalidSignature => "invalid token signature",
            _ => "invalid token",
        };
        Error::unauthorized(message).with_source(e)
    })?;

    Ok(token_data.claims)
}

/// Extracts the Bearer token from the Authorization header
///
/// # Arguments
/// * `auth_header` - The Authorization header value (optional)
///
/// # Returns
/// The extracted token string
pub fn extract_bearer_token(auth_header: Option<&str>) -> Result<&str> {
    match auth_header {
        Some(header) => match header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(Error::unauthorized("missing bearer token")),
        },
        None => Err(Error::unauthorized("missing bearer token")),
    }
}
