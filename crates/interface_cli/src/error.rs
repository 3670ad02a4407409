//! Simulator errors

use core_kernel::CoreError;
use domain_company::CompanyError;
use domain_party::PartyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid start time '{0}', expected YYYY-MM-DDTHH:MM:SS")]
    InvalidStart(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Party(#[from] PartyError),

    #[error(transparent)]
    Company(#[from] CompanyError),
}
