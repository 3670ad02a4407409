//! Party Domain
//!
//! This crate holds the collaborators that insurance contracts refer to:
//!
//! - **Person**: a natural or legal person identified by a national identity
//!   number. Persons receive claim payouts and keep the list of contracts
//!   they hold as policy holder.
//! - **Vehicle**: an insured vehicle with a licence plate and the original
//!   value that drives pricing and total-loss decisions.
//! - **PartyDirectory**: the in-process store of persons owned by an insurer.
//!
//! Contracts never own persons. They refer to them by [`core_kernel::PersonId`]
//! and the directory resolves the id whenever a payout or a contract link
//! has to be applied.

pub mod person;
pub mod vehicle;
pub mod directory;
pub mod error;

pub use person::{Person, LegalForm};
pub use vehicle::Vehicle;
pub use directory::PartyDirectory;
pub use error::PartyError;
