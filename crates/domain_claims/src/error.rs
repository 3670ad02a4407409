//! Claims domain errors

use core_kernel::ErrorKind;
use domain_contract::ContractError;
use domain_party::PartyError;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Malformed claim input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The contract cannot be claimed against
    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Party(#[from] PartyError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    pub fn invalid_contract(message: impl Into<String>) -> Self {
        ClaimError::InvalidContract(message.into())
    }

    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::Validation(_) => ErrorKind::Validation,
            ClaimError::InvalidContract(_) => ErrorKind::DomainState,
            ClaimError::Contract(e) => e.kind(),
            ClaimError::Party(e) => e.kind(),
        }
    }
}
