//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, ParseError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid record at {path}:{line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ParseError> for ApplicationError {
    fn from(e: ParseError) -> Self {
        ApplicationError::Domain(DomainError::Parse(e))
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
