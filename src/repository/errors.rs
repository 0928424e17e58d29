use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result type returned by all repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,
    /// A uniqueness or check constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// The connection pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(DieselError),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::CheckViolation,
                info,
            ) => RepositoryError::ConstraintViolation(info.message().to_string()),
            other => RepositoryError::Database(other),
        }
    }
}
