//! Store error boundary.

use agrovault_core::ServiceError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure modes of a document store backing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key (or a unique field value) is already present.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// No document under the requested key.
    #[error("document not found")]
    NotFound,

    /// The backing itself failed (connection, lock, SQL).
    #[error("store backend error: {0}")]
    Backend(String),

    /// A document could not be (de)serialized.
    #[error("store codec error: {0}")]
    Codec(String),
}

/// Default mapping into the service taxonomy. Services that want
/// entity-specific `NotFound` messages remap that variant themselves.
impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(msg) => ServiceError::AlreadyExists(msg),
            StoreError::NotFound => ServiceError::not_found("not found"),
            StoreError::Backend(msg) => ServiceError::Internal(msg),
            StoreError::Codec(msg) => ServiceError::Internal(msg),
        }
    }
}
