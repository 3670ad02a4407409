//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! insurance company test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built persons, vehicles, and timestamps
//! - `builders`: `TestCompanyBuilder` for companies with registered persons
//! - `assertions`: Assertion helpers for errors, balances, and hierarchy
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
