//! Error types for the academy backend.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Amount must be a finite number")]
    NonFiniteAmount,

    #[error("Amount cannot be finer than one paise")]
    FractionalMinorUnits,

    #[error("Amount is too large")]
    AmountOutOfRange,

    #[error("Receipt must be between 1 and 40 characters")]
    InvalidReceipt,

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Mentor {0} cannot be empty")]
    MissingMentorField(&'static str),
}

/// Payload validation errors, produced before any business logic runs.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} cannot be empty")]
    EmptyField(&'static str),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt row: {0}")]
    Decode(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. `Upstream` and `Internal` carry the
/// message shown to the client; details stay in the logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
