//! Error types for product service operations.

use thiserror::Error;

use crate::model::InvalidField;
use crate::store::StoreError;

/// Error type for product service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed create/update payload or query parameters.
    #[error("{0}")]
    Validation(String),
    /// No record for the requested id.
    #[error("{0}")]
    NotFound(String),
    /// The request is well-formed but a business rule forbids it.
    #[error("{0}")]
    BusinessRule(String),
    /// Missing caller identity on a private route.
    #[error("{0}")]
    Unauthorized(String),
    /// Caller lacks the role a route requires.
    #[error("{0}")]
    Forbidden(String),
    /// The store failed.
    #[error("store error: {0}")]
    Upstream(#[from] StoreError),
}

impl From<InvalidField> for ServiceError {
    fn from(err: InvalidField) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl ServiceError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::BusinessRule(_) => 400,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::Forbidden(_) => 403,
            ServiceError::Upstream(_) => 500,
        }
    }
}
