//! Contract domain errors

use core_kernel::ErrorKind;
use domain_billing::BillingError;
use thiserror::Error;

/// Errors that can occur in the contract domain
#[derive(Debug, Error)]
pub enum ContractError {
    /// Malformed or policy-violating input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The contract's state forbids the operation
    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    /// Contract number is already in use
    #[error("Duplicate contract number: {0}")]
    DuplicateContract(String),

    /// Contract number is not held by this insurer
    #[error("Contract not found: {0}")]
    ContractNotFound(String),

    /// Billing failure
    #[error(transparent)]
    Billing(#[from] BillingError),
}

impl ContractError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ContractError::Validation(message.into())
    }

    /// Creates a domain-state error
    pub fn invalid_contract(message: impl Into<String>) -> Self {
        ContractError::InvalidContract(message.into())
    }

    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Validation(_) | ContractError::DuplicateContract(_) => ErrorKind::Validation,
            ContractError::InvalidContract(_) | ContractError::ContractNotFound(_) => ErrorKind::DomainState,
            ContractError::Billing(e) => e.kind(),
        }
    }
}
