use thiserror::Error;

use crate::domain::Owned;
use crate::domain::auth::AuthenticatedUser;
use crate::repository::RepositoryError;

pub mod cart;
pub mod products;

/// Result type returned by all service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer, mapped to HTTP statuses at the
/// boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed resource does not exist.
    #[error("resource not found")]
    NotFound,
    /// The caller does not own the addressed resource.
    #[error("caller does not own the resource")]
    Forbidden,
    /// The request payload failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// Unexpected failure; details are logged, not exposed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Validation(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// The ownership guard: a pure predicate comparing the caller identity to
/// the resource owner.
///
/// Must be called before any mutating effect on an owned resource; it
/// short-circuits the operation so no partial state change can happen. A
/// resource that exposes no owner is never mutable.
pub fn ensure_ownership<T>(user: &AuthenticatedUser, resource: &T) -> ServiceResult<()>
where
    T: Owned + ?Sized,
{
    match resource.owner() {
        Some(owner) if owner == user.sub => Ok(()),
        _ => Err(ServiceError::Forbidden),
    }
}
