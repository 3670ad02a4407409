//! Company errors

use core_kernel::{CoreError, ErrorKind};
use domain_billing::BillingError;
use domain_claims::ClaimError;
use domain_contract::ContractError;
use domain_party::PartyError;
use thiserror::Error;

/// Errors surfaced by the insurance company
#[derive(Debug, Error)]
pub enum CompanyError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid contract: {0}")]
    InvalidContract(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

impl CompanyError {
    pub fn validation(message: impl Into<String>) -> Self {
        CompanyError::Validation(message.into())
    }

    pub fn invalid_contract(message: impl Into<String>) -> Self {
        CompanyError::InvalidContract(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CompanyError::Configuration(message.into())
    }

    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompanyError::Validation(_) | CompanyError::Configuration(_) => ErrorKind::Validation,
            CompanyError::InvalidContract(_) => ErrorKind::DomainState,
            CompanyError::Core(e) => e.kind(),
            CompanyError::Party(e) => e.kind(),
            CompanyError::Billing(e) => e.kind(),
            CompanyError::Contract(e) => e.kind(),
            CompanyError::Claim(e) => e.kind(),
        }
    }

    /// Returns true for malformed or policy-violating input
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Returns true when the target's state forbids the operation
    pub fn is_domain_state(&self) -> bool {
        self.kind() == ErrorKind::DomainState
    }
}

impl From<config::ConfigError> for CompanyError {
    fn from(err: config::ConfigError) -> Self {
        CompanyError::Configuration(err.to_string())
    }
}
