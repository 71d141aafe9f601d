//! Registration, login and administrator password resets.

use std::sync::Arc;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::users::{AuthSession, NewUser, User};
use crate::repository::UserRepository;
use crate::services::jwt::{IssuedToken, issue_token};
use crate::services::passwords::PasswordHashing;
use crate::validation::{normalize_email, validate_email, validate_name, validate_password};

/// Returned for both unknown accounts and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "invalid email or password";
/// Returned when the account exists but was never given a password.
pub const PASSWORD_NOT_SET: &str = "account has no password set; ask an administrator to set one";

pub const TOKEN_TYPE: &str = "Bearer";

/// Token settings handed to [`AuthService`] at construction.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub access_token_ttl: Duration,
}

impl AuthSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt.secret.clone(),
            access_token_ttl: config.jwt.access_token_ttl(),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    passwords: PasswordHashing,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        passwords: PasswordHashing,
        settings: AuthSettings,
    ) -> Self {
        Self {
            repository,
            passwords,
            settings,
        }
    }

    /// Registers a new user with a password and returns it with a fresh token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthSession> {
        let name = name.trim();
        let email = normalize_email(email);
        let password = password.trim();

        validate_name(name)?;
        validate_email(&email)?;
        validate_password(password)?;

        // Fast path only; the unique index still decides under races
        match self.repository.find_by_email(&email).await {
            Ok(_) => return Err(Error::duplicate("email is already registered")),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into_app_error("user not found", "failed to look up email")),
        }

        let password_hash = self.passwords.hash(password)?;

        let user = self
            .repository
            .create(NewUser {
                id: None,
                name: name.to_string(),
                email,
                password_hash: Some(password_hash),
            })
            .await
            .map_err(|e| e.into_app_error("user not found", "failed to save user"))?;

        tracing::info!(user_id = %user.id, "user registered");

        self.session_for(user)
    }

    /// Authenticates with email and password.
    ///
    /// Unknown accounts and wrong passwords fail with the same message.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = normalize_email(email);
        let password = password.trim();

        validate_email(&email)?;
        if password.is_empty() {
            return Err(Error::validation("password is required"));
        }

        let user = match self.repository.find_by_email(&email).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                tracing::debug!("login attempt for unknown email");
                return Err(Error::unauthorized(INVALID_CREDENTIALS));
            }
            Err(e) => return Err(e.into_app_error(INVALID_CREDENTIALS, "failed to look up user")),
        };

        if !user.has_password() {
            return Err(Error::unauthorized(PASSWORD_NOT_SET));
        }
        let password_hash = user.password_hash.as_deref().unwrap_or_default();

        if !self.passwords.verify(password, password_hash)? {
            tracing::debug!(user_id = %user.id, "login attempt with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.session_for(user)
    }

    /// Sets a new password for any user. Issues no token.
    pub async fn admin_set_password(&self, user_id: Uuid, new_password: &str) -> Result<()> {
        let new_password = new_password.trim();
        validate_password(new_password)?;

        self.repository
            .find_by_id(user_id)
            .await
            .map_err(|e| e.into_app_error("user not found", "failed to load user"))?;

        let password_hash = self.passwords.hash(new_password)?;

        self.repository
            .update_password_hash(user_id, &password_hash)
            .await
            .map_err(|e| e.into_app_error("user not found", "failed to save password"))?;

        tracing::info!(user_id = %user_id, "password set by administrator");
        Ok(())
    }

    fn session_for(&self, user: User) -> Result<AuthSession> {
        let IssuedToken { token, claims } = issue_token(
            self.settings.jwt_secret.expose_secret(),
            user.id,
            Some(user.email.as_str()),
            self.settings.access_token_ttl,
        )?;

        let expires_at = claims
            .expires_at()
            .ok_or_else(|| Error::internal("token expiry out of range"))?;

        Ok(AuthSession {
            user,
            token,
            token_type: TOKEN_TYPE,
            expires_at,
        })
    }
}
