//! Credential store abstraction.
//!
//! Services talk to user storage only through [`UserRepository`]. The
//! Postgres implementation backs the server; the in-memory one backs tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{BoxError, Error, StorageErrorKind};
use crate::models::pagination::PageRequest;
use crate::models::users::{NewUser, User};

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

/// A database error that carried a SQLSTATE.
#[derive(Debug, Error)]
#[error("database error ({kind:?}): {message}")]
pub struct DatabaseFailure {
    pub kind: StorageErrorKind,
    pub message: String,
}

/// Failures reported by a [`UserRepository`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// The database rejected the statement with an error code.
    #[error(transparent)]
    Database(DatabaseFailure),

    /// Anything else: pool exhaustion, I/O, decoding.
    #[error("storage backend failure: {0}")]
    Backend(#[source] BoxError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn database(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        StoreError::Database(DatabaseFailure {
            kind,
            message: message.into(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    /// Converts a store failure into an application error.
    ///
    /// `NotFound` becomes `not_found` with the given message, coded database
    /// errors go through [`Error::from_storage`], and everything else is
    /// `internal` with `failure_message`.
    pub fn into_app_error(self, not_found_message: &str, failure_message: &str) -> Error {
        match self {
            StoreError::NotFound => Error::not_found(not_found_message),
            StoreError::Database(failure) => {
                Error::from_storage(&failure.kind, &failure.message).with_source(failure)
            }
            StoreError::Backend(source) => Error::internal(failure_message).with_source(source),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_error) => {
                let code = db_error.code().map(|code| code.into_owned());
                match code {
                    Some(code) => StoreError::database(
                        StorageErrorKind::from_sqlstate(&code),
                        db_error.message(),
                    ),
                    None => StoreError::Backend(Box::new(sqlx::Error::Database(db_error))),
                }
            }
            other => StoreError::Backend(Box::new(other)),
        }
    }
}

/// Repository trait for user persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, assigning an id when the caller did not supply one.
    async fn create(&self, new_user: NewUser) -> StoreResult<User>;

    /// Every user, newest first.
    async fn find_all(&self) -> StoreResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<User>;

    /// Exact match on the stored (lowercased) email.
    async fn find_by_email(&self, email: &str) -> StoreResult<User>;

    /// Writes name and email back and refreshes `updated_at`.
    async fn update(&self, user: &User) -> StoreResult<User>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// One page of users matching the request's search term, plus the total
    /// number of matches ignoring pagination.
    async fn find_paged(&self, request: &PageRequest) -> StoreResult<(Vec<User>, i64)>;

    /// Sets only `password_hash` and `updated_at`.
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> StoreResult<()>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> StoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_not_found_maps_to_not_found() {
        let error = StoreError::NotFound.into_app_error("user not found", "failed to load user");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "user not found");
    }

    #[test]
    fn test_unique_violation_maps_to_duplicate() {
        let error = StoreError::database(StorageErrorKind::UniqueViolation, "duplicate key")
            .into_app_error("user not found", "failed to save user");
        assert_eq!(error.code(), ErrorCode::Duplicate);
    }

    #[test]
    fn test_backend_failure_maps_to_internal() {
        let error = StoreError::Backend(Box::new(std::io::Error::other("connection reset")))
            .into_app_error("user not found", "failed to save user");
        assert_eq!(error.code(), ErrorCode::Internal);
        assert_eq!(error.message(), "failed to save user");
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        assert!(StoreError::from(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_from_sqlx_pool_timeout_is_backend() {
        let error = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StoreError::Backend(_)));
    }
}
