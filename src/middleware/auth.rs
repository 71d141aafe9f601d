//! Bearer-token authentication and the administrator gate.
//!
//! [`AccessPolicy`] holds the rules; the two middleware functions apply them
//! to axum requests and store the caller's identity in request extensions.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{Error, Result},
    services::jwt::{extract_bearer_token, verify_token},
    state::AppState,
};

/// Authenticated caller extracted from a verified token
///
/// Added to request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// Subject of the token
    pub id: Uuid,
    /// Email claim, when the token carried one
    pub email: Option<String>,
}

/// Who may call protected and administrator endpoints.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    jwt_secret: SecretString,
    admin_email: Option<String>,
}

impl AccessPolicy {
    pub fn new(jwt_secret: SecretString, admin_email: Option<String>) -> Self {
        Self {
            jwt_secret,
            admin_email: admin_email.filter(|email| !email.trim().is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt.secret.clone(),
            config.admin.email().map(str::to_string),
        )
    }

    /// Verifies the `Authorization` header value and returns the caller.
    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<AuthenticatedUser> {
        let token = extract_bearer_token(auth_header)?;
        let claims = verify_token(token, self.jwt_secret.expose_secret())?;

        Ok(AuthenticatedUser {
            id: claims.user_id()?,
            email: claims.email.filter(|email| !email.is_empty()),
        })
    }

    /// Administrator check: the caller's email must equal the configured
    /// administrator email exactly.
    ///
    /// With no administrator email configured, every authenticated caller
    /// passes. Deployments that expose admin routes must set one.
    pub fn authorize_admin(&self, user: &AuthenticatedUser) -> Result<()> {
        let Some(admin_email) = self.admin_email.as_deref() else {
            tracing::warn!(
                user_id = %user.id,
                "no administrator email configured; granting admin access"
            );
            return Ok(());
        };

        if user.email.as_deref() == Some(admin_email) {
            Ok(())
        } else {
            Err(Error::forbidden("forbidden"))
        }
    }

    pub fn admin_email(&self) -> Option<&str> {
        self.admin_email.as_deref()
    }
}

/// Bearer-token authentication middleware
///
/// Rejects the request with 401 when the `Authorization: Bearer <token>`
/// header is missing or the token does not verify. On success the
/// [`AuthenticatedUser`] is inserted into request extensions.
///
/// # Usage
/// ```ignore
/// Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let user = state.access.authenticate(auth_header)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Administrator gate. Must run after [`require_auth`].
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;

    state.access.authorize_admin(user)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::jwt::issue_token;
    use chrono::Duration;

    const SECRET: &str = "access-policy-secret";

    fn policy(admin_email: Option<&str>) -> AccessPolicy {
        AccessPolicy::new(SECRET.to_string().into(), admin_email.map(str::to_string))
    }

    fn user(email: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::now_v7(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_authenticate_valid_token() {
        let id = Uuid::now_v7();
        let issued = issue_token(SECRET, id, Some("a@x.com"), Duration::minutes(5)).unwrap();
        let header = format!("Bearer {}", issued.token);

        let user = policy(None).authenticate(Some(&header)).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn test_authenticate_missing_header() {
        let error = policy(None).authenticate(None).unwrap_err();
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "missing bearer token");
    }

    #[test]
    fn test_authenticate_token_signed_with_other_secret() {
        let issued = issue_token("other", Uuid::now_v7(), None, Duration::minutes(5)).unwrap();
        let header = format!("Bearer {}", issued.token);

        let error = policy(None).authenticate(Some(&header)).unwrap_err();
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_admin_gate_with_configured_email() {
        let policy = policy(Some("admin@example.com"));

        assert!(policy.authorize_admin(&user(Some("admin@example.com"))).is_ok());

        let error = policy
            .authorize_admin(&user(Some("someone@example.com")))
            .unwrap_err();
        assert_eq!(error.code(), ErrorCode::Forbidden);

        let error = policy.authorize_admin(&user(None)).unwrap_err();
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn test_admin_gate_comparison_is_exact() {
        let policy = policy(Some("admin@example.com"));
        assert!(policy.authorize_admin(&user(Some("Admin@example.com"))).is_err());
    }

    #[test]
    fn test_admin_gate_without_configured_email_allows_everyone() {
        for policy in [policy(None), policy(Some("   "))] {
            assert!(policy.admin_email().is_none());
            assert!(policy.authorize_admin(&user(Some("anyone@example.com"))).is_ok());
            assert!(policy.authorize_admin(&user(None)).is_ok());
        }
    }
}
