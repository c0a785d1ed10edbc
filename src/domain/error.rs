//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent misuse of the settings language itself.
/// None of them are recoverable: evaluation stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown matcher '{symbol}': only {valid} are supported")]
    UnknownMatcher { symbol: String, valid: String },

    #[error("'{feature}' is not supported yet")]
    NotSupported { feature: String },

    #[error("'{operation}' is not allowed {context}")]
    ContextMisuse { operation: String, context: String },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
