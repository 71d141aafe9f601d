use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    error::Result,
    handlers::json_payload,
    models::{
        requests::{LoginRequest, RegisterRequest, SetPasswordRequest},
        users::AuthSession,
    },
    state::AppState,
    validation::parse_user_id,
};

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// POST /auth/register
///
/// Creates an account with a password and returns it with an access token.
///
/// # HTTP Status Codes
/// - `201 CREATED`: Account created
/// - `400 BAD_REQUEST`: Malformed body, or invalid name, email or password
/// - `409 CONFLICT`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthSession>)> {
    let request = json_payload(payload)?;

    let session = state
        .auth
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /auth/login
///
/// Wrong passwords and unknown emails both answer 401 with the same message.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthSession>> {
    let request = json_payload(payload)?;

    let session = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(session))
}

/// POST /api/v1/admin/users/set-password
pub async fn admin_set_password(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetPasswordRequest>, JsonRejection>,
) -> Result<Json<OkResponse>> {
    let request = json_payload(payload)?;
    let user_id = parse_user_id(&request.user_id)?;

    state
        .auth
        .admin_set_password(user_id, &request.password)
        .await?;

    Ok(Json(OkResponse { ok: true }))
}
