//! Application-level errors (wraps domain errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot emit command: {source}")]
    Emit {
        #[source]
        source: std::io::Error,
    },

    #[error("description not found: {0}")]
    DescriptionNotFound(PathBuf),

    #[error("invalid description: {message}")]
    Description { message: String },

    #[error("cannot create output {}: {source}", path.display())]
    OutputNotCreated {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
