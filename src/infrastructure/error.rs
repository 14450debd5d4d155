//! Infrastructure-level errors raised by the remote API client

use thiserror::Error;

/// Errors from talking to the floating IP service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Service answered with a non-success status.
    #[error("Error response from daemon: {message}")]
    Status { status: u16, message: String },

    /// Service could not be reached at all.
    #[error("cannot connect to {endpoint}: {message}. Is the daemon running?")]
    Connect { endpoint: String, message: String },

    /// Service answered 2xx with a body we cannot read.
    #[error("cannot decode {context} response: {message}")]
    Decode { context: String, message: String },

    /// Request could not be built (bad endpoint, bad parameters).
    #[error("invalid request: {message}")]
    Request { message: String },
}

impl ApiError {
    pub fn decode(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for remote client operations.
pub type ApiResult<T> = Result<T, ApiError>;
