//! Error types for the oracle.

use thiserror::Error;

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur when consulting an oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The odds string names none of the known profiles.
    #[error("unknown odds: {0} (try 50/50, likely, very unlikely, ...)")]
    UnknownOdds(String),
}
