//! Billing domain errors

use core_kernel::{ErrorKind, TemporalError};
use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Premium is not strictly positive
    #[error("Invalid premium: {0}")]
    InvalidPremium(i64),

    /// Amount is not acceptable for the operation
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Integer overflow while accumulating balances
    #[error("Calculation overflow: {0}")]
    Overflow(String),

    /// Due date could not be advanced
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}

impl BillingError {
    /// Creates an InvalidAmount error with a message
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        BillingError::InvalidAmount(message.into())
    }

    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
