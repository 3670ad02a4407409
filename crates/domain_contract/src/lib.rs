//! Contract Domain
//!
//! This crate models the insurance agreements an insurer issues. A single
//! [`Contract`] entity carries the data shared by every agreement, and a
//! [`ContractKind`] carries the variant-specific coverage data:
//!
//! - **SingleVehicle**: one insured vehicle, billed by its own schedule
//! - **Travel**: a set of insured persons, billed by its own schedule
//! - **MasterVehicle**: a bundle of single-vehicle contracts; it has no
//!   schedule and is billed through its children
//!
//! Callers dispatch on capabilities (`schedule()`, `children()`) rather than
//! on the concrete kind.
//!
//! # Hierarchy
//!
//! [`ContractHierarchy`] stores every contract an insurer has ever held,
//! keeps the top-level set in creation order, and records which contracts
//! were attached under a master:
//!
//! ```text
//! top level:  [V-1] [T-1] [M-1]
//!                           |
//!                         [V-2] [V-3]   (attached, no longer top level)
//! ```

pub mod contract;
pub mod hierarchy;
pub mod error;

pub use contract::{Contract, ContractKind, ContractType};
pub use hierarchy::ContractHierarchy;
pub use error::ContractError;
