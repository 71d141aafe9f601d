pub mod auth;
pub mod health;
pub mod users;

use axum::{
    Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Serialize;

use crate::error::{Error, Result};

/// Success envelope for resource endpoints: `{ "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

/// Unwraps a JSON body, turning any rejection into a 400 `bad_request`.
pub(crate) fn json_payload<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        Error::bad_request("invalid payload")
    })
}

pub(crate) fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query.map(|Query(params)| params).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected query string");
        Error::bad_request("invalid query parameters")
    })
}
