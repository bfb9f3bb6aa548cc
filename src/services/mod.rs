use thiserror::Error;

use crate::imaging::ImageProcessingError;
use crate::repository::errors::RepositoryError;
use crate::storage::StorageError;

pub mod products;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error taxonomy mapped to HTTP statuses in the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or invalid required field (client error).
    #[error("{0}")]
    Validation(String),
    /// The addressed product does not exist.
    #[error("product not found")]
    NotFound,
    /// The uploaded image could not be decoded or re-encoded.
    #[error(transparent)]
    Image(#[from] ImageProcessingError),
    /// The artifact could not be written or uploaded.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Any other persistence failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}
