//! Domain-level error type shared across parkwatch crates.

/// Errors produced by domain validation and state checks.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A value failed validation (bad range, malformed field, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation needed state that the session does not hold yet.
    #[error("Missing state: {0}")]
    MissingState(String),

    /// An unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
