//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::ApiError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Failure of a floating IP subcommand; always exits 1.
    #[error("{0}")]
    Command(ApplicationError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Application(e.into())
    }
}

impl CliError {
    /// Mark an error as coming from a floating IP subcommand.
    pub fn into_command(self) -> Self {
        match self {
            CliError::Application(e) => CliError::Command(e),
            other => other,
        }
    }

    /// Whether the failure was already printed item by item.
    pub fn already_reported(&self) -> bool {
        matches!(
            self,
            CliError::Command(ApplicationError::PartialRelease { .. })
                | CliError::Application(ApplicationError::PartialRelease { .. })
        )
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Command(_) => crate::exitcode::FAILURE,
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) => crate::exitcode::USAGE,
                ApplicationError::Api(api) => match api {
                    ApiError::Status { .. } => crate::exitcode::FAILURE,
                    ApiError::Connect { .. } => crate::exitcode::UNAVAILABLE,
                    ApiError::Decode { .. } => crate::exitcode::DATAERR,
                    ApiError::Request { .. } => crate::exitcode::CONFIG,
                },
                ApplicationError::PartialRelease { .. } => crate::exitcode::FAILURE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}
