//! Core Kernel - Foundational types and utilities for the insurance company
//!
//! This crate provides the building blocks shared by all domain crates:
//! - Strongly-typed identifiers and contract numbers
//! - Logical time (a caller-controlled clock with month arithmetic)
//! - The two-kind error classification used at every API boundary

pub mod temporal;
pub mod identifiers;
pub mod error;

pub use temporal::{LogicalClock, TemporalError, add_months};
pub use identifiers::{
    ContractNumber, PersonId, InsurerId, PaymentId, SettlementId,
};
pub use error::{CoreError, ErrorKind};
