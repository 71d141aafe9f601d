//! Request payloads accepted by the HTTP handlers.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Administrator password reset for another account.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPasswordRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub password: String,
}
