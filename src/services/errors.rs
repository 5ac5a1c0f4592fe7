use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Failures reported by service functions to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// User input was rejected; the message is shown to the user.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
