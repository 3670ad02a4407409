//! Claims Domain
//!
//! Claims are settled in two steps. The [`ClaimProcessor`] first assesses a
//! claim against a contract without touching anything, producing a
//! [`ClaimSettlement`]. Applying the settlement then pays every payee and,
//! when the claim calls for it, deactivates the contract.
//!
//! - **Travel claims** split the coverage evenly between the affected
//!   insured persons and always end the contract
//! - **Vehicle claims** pay the full coverage to the beneficiary (or the
//!   policy holder) and end the contract only on a total loss

pub mod processor;
pub mod settlement;
pub mod error;

pub use processor::ClaimProcessor;
pub use settlement::{ClaimSettlement, ClaimType, Payout};
pub use error::ClaimError;
