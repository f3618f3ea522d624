//! Domain errors for the diary rollover bot.

use thiserror::Error;

/// Domain-level errors raised while syncing diary issues.
///
/// Configuration problems are a separate, fatal tier — see
/// [`ConfigError`](crate::domain::models::config::ConfigError).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
