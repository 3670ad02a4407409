//! Core error types used across the system

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::temporal::TemporalError;

/// Classification of every failure surfaced by the domain crates
///
/// - `Validation`: malformed or policy-violating input (empty identifiers,
///   non-positive amounts, below-threshold premiums, duplicates)
/// - `DomainState`: the target's state forbids the operation (inactive
///   contract, mismatched policy holders, foreign contracts)
///
/// Both kinds are raised before any mutation takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    DomainState,
}

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn invalid_contract(message: impl Into<String>) -> Self {
        CoreError::InvalidContract(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidContract(_) => ErrorKind::DomainState,
            CoreError::Temporal(_) | CoreError::Validation(_) | CoreError::Configuration(_) => {
                ErrorKind::Validation
            }
        }
    }
}
