use strum_macros::{AsRefStr, Display};
use thiserror::Error;

// Import Axum types for HTTP response conversion
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Boxed diagnostic cause attached to an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Machine-readable error category. The string form is what clients see in
/// the `code` field of the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed or out-of-range input.
    Validation,
    /// Malformed identifiers or unmapped storage constraint violations.
    BadRequest,
    /// Unique-constraint conflict.
    Duplicate,
    /// The addressed resource does not exist.
    NotFound,
    /// Bad credentials, missing password or an invalid/expired token.
    Unauthorized,
    /// Authenticated but not allowed.
    Forbidden,
    /// Anything the caller cannot fix.
    Internal,
}

impl ErrorCode {
    /// Transport status bound to this category.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::Validation => StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Duplicate => StatusCode::CONFLICT,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The application error type.
///
/// Carries a [`ErrorCode`], a human message and an optional wrapped cause.
/// Once built it is only read: layers above the one that created it look at
/// `code`, `message` and `status`; the cause is for logs.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[source]
    source: Option<BoxError>,
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Duplicate, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Attaches the underlying cause for diagnostics.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }

    /// Maps a storage-engine error code to the matching category.
    ///
    /// Codes without a dedicated mapping become `bad_request` carrying the
    /// engine's raw message.
    pub fn from_storage(kind: &StorageErrorKind, raw_message: &str) -> Self {
        match kind {
            StorageErrorKind::UniqueViolation => Error::duplicate("record already exists"),
            StorageErrorKind::ForeignKeyViolation => {
                Error::bad_request("record is still referenced by other data")
            }
            StorageErrorKind::NotNullViolation => Error::bad_request("a required field is missing"),
            StorageErrorKind::InvalidTextRepresentation => {
                Error::bad_request("input has an invalid format")
            }
            StorageErrorKind::StringDataRightTruncation => {
                Error::bad_request("value exceeds the maximum length")
            }
            StorageErrorKind::CheckViolation => Error::bad_request("value violates a check constraint"),
            StorageErrorKind::Other(_) => Error::bad_request(raw_message),
        }
    }
}

/// Storage-engine error codes the taxonomy knows how to translate.
///
/// Parsed from the PostgreSQL SQLSTATE carried by a database error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// 23505
    UniqueViolation,
    /// 23503
    ForeignKeyViolation,
    /// 23502
    NotNullViolation,
    /// 22P02, e.g. a malformed UUID literal.
    InvalidTextRepresentation,
    /// 22001
    StringDataRightTruncation,
    /// 23514
    CheckViolation,
    /// Any other SQLSTATE.
    Other(String),
}

impl StorageErrorKind {
    pub fn from_sqlstate(code: &str) -> Self {
        match code {
            "23505" => StorageErrorKind::UniqueViolation,
            "23503" => StorageErrorKind::ForeignKeyViolation,
            "23502" => StorageErrorKind::NotNullViolation,
            "22P02" => StorageErrorKind::InvalidTextRepresentation,
            "22001" => StorageErrorKind::StringDataRightTruncation,
            "23514" => StorageErrorKind::CheckViolation,
            other => StorageErrorKind::Other(other.to_string()),
        }
    }
}

/// Convert custom Error to HTTP response
///
/// Renders `{ "error": { "code": ..., "message": ... } }` with the status
/// bound to the error's category. Server-side failures are logged here
/// together with their cause; client errors are not.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    code = %self.code,
                    error = %source,
                    "{}",
                    self.message
                ),
                None => tracing::error!(code = %self.code, "{}", self.message),
            }
        }

        let body = serde_json::json!({
            "error": {
                "code": self.code.as_ref(),
                "message": self.message,
            }
        });

        (status, Json(body)).into_response()
    }
}
