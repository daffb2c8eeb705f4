//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Input was processed but some of it was rejected; details already printed.
    #[error("{0}")]
    Rejected(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Rejected(_) => crate::exitcode::DATAERR,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::InvalidRecord { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}
