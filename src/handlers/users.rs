//! User management handlers under `/api/v1/users`.
//!
//! All routes here sit behind `require_auth`.

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    error::Result,
    handlers::{DataResponse, json_payload, query_params},
    middleware::auth::AuthenticatedUser,
    models::{
        pagination::{ListQuery, PageResult},
        requests::CreateUserRequest,
        users::{User, UserChanges},
    },
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

/// POST /api/v1/users
///
/// Creates a user without a password. An administrator can set one later.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<User>>)> {
    let request = json_payload(payload)?;
    let user = state.users.create(&request.name, &request.email).await?;

    Ok((StatusCode::CREATED, DataResponse::json(user)))
}

/// GET /api/v1/users
///
/// # Query Parameters
/// - `q`: case-insensitive substring of name or email
/// - `page`, `page_size`: 1-based page, size capped at 100
/// - `sort_by`: `name`, `email` or `created_at` (default)
/// - `sort_dir`: `asc` or `desc` (default)
pub async fn list_users(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<DataResponse<PageResult<User>>>> {
    let query = query_params(query)?;
    let page = state.users.list(&query).await?;

    Ok(DataResponse::json(page))
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<DataResponse<User>>> {
    let user = state.users.me(caller.id).await?;
    Ok(DataResponse::json(user))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<User>>> {
    let user = state.users.get(&id).await?;
    Ok(DataResponse::json(user))
}

/// PUT /api/v1/users/{id}
///
/// Partial update: omitted fields keep their current value.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserChanges>, JsonRejection>,
) -> Result<Json<DataResponse<User>>> {
    let changes = json_payload(payload)?;
    let user = state.users.update(&id, changes).await?;

    Ok(DataResponse::json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<DeletedResponse>>> {
    state.users.delete(&id).await?;
    Ok(DataResponse::json(DeletedResponse { deleted: true }))
}
