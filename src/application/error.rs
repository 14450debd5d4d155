//! Application-level errors (wraps domain and client errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::ApiError;

/// Application errors wrap domain and client errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("failed to release {failed} of {total} floating IPs")]
    PartialRelease { failed: usize, total: usize },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
