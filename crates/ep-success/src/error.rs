//! Error types for the success-test engine.
//!
//! Engine operations are total. These errors only surface when turning
//! untyped input (strings, raw integers) into engine types.

/// Errors that can occur when parsing or constructing engine values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuccessError {
    /// A die face outside 0-9.
    #[error("digit out of range: {0}")]
    InvalidDigit(u32),

    /// A percentile roll outside 0-99.
    #[error("percentile roll out of range: {0}")]
    InvalidRoll(u32),

    /// A result tier name that does not exist.
    #[error("unknown result tier: {0}")]
    UnknownTier(String),

    /// A pool type name that does not exist.
    #[error("unknown pool type: {0}")]
    UnknownPoolType(String),

    /// A pool action name that does not exist.
    #[error("unknown pool action: {0}")]
    UnknownPoolAction(String),

    /// A psi push name that does not exist.
    #[error("unknown psi push: {0}")]
    UnknownPush(String),
}

/// Convenience result type for engine parsing operations.
pub type SuccessResult<T> = Result<T, SuccessError>;
