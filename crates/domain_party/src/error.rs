//! Party domain errors

use core_kernel::ErrorKind;
use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Person with the given ID is not registered
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// A person with the same identity number is already registered
    #[error("Duplicate person: {0}")]
    DuplicatePerson(String),

    /// Identity number is malformed
    #[error("Invalid identity number: {0}")]
    InvalidIdNumber(String),

    /// Invalid party data provided
    #[error("Invalid party data: {0}")]
    InvalidData(String),

    /// Field-level validation failed
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl PartyError {
    /// Creates a PersonNotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PartyError::PersonNotFound(id.to_string())
    }

    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }

    /// Returns the error classification
    ///
    /// An unknown person is a reference to something this insurer does not
    /// hold, which is a domain-state failure; everything else is bad input.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartyError::PersonNotFound(_) => ErrorKind::DomainState,
            _ => ErrorKind::Validation,
        }
    }
}
