//! Service error model.

use thiserror::Error;

/// Result type used across the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error.
///
/// Every variant maps to exactly one HTTP status at the API boundary:
/// `Validation` and `AlreadyExists` to 400, `NotFound` to 404, and the
/// rest to 500. Messages are caller-facing and returned verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Required input was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// A unique key (e.g. user email) is already taken.
    #[error("{0}")]
    AlreadyExists(String),

    /// A requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A dependency is not set up (missing credentials, no client).
    #[error("{0}")]
    Unconfigured(String),

    /// A dependent service call failed; carries the provider's detail.
    #[error("{0}")]
    Upstream(String),

    /// A dependent service answered but returned no usable content.
    #[error("{0}")]
    EmptyReply(String),

    /// Unexpected internal failure (storage backend, codec).
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unconfigured(msg: impl Into<String>) -> Self {
        Self::Unconfigured(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn empty_reply(msg: impl Into<String>) -> Self {
        Self::EmptyReply(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
