//! Error conversion glue between layers.
//!
//! Domain value objects know nothing about repositories or services; the
//! conversions live here so each layer can use `?` on constructor failures.

use crate::domain::types::TypeConstraintError;
#[cfg(feature = "server")]
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
#[cfg(feature = "server")]
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.user_message().to_string())
    }
}

/// Role checks from `pushkind-common` report its own service error type.
#[cfg(feature = "server")]
impl From<pushkind_common::services::errors::ServiceError> for ServiceError {
    fn from(val: pushkind_common::services::errors::ServiceError) -> Self {
        use pushkind_common::services::errors::ServiceError as CommonServiceError;

        match val {
            CommonServiceError::Unauthorized => ServiceError::Unauthorized,
            CommonServiceError::NotFound => ServiceError::NotFound,
            CommonServiceError::Form(message) => ServiceError::Form(message),
            CommonServiceError::TypeConstraint(message) => ServiceError::TypeConstraint(message),
            other => ServiceError::Repository(RepositoryError::Unexpected(other.to_string())),
        }
    }
}
