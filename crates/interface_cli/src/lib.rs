//! Insurance Company Simulator
//!
//! Drives an [`domain_company::InsuranceCompany`] through a scripted
//! timeline: persons are registered, contracts issued and bundled, and the
//! logical clock advanced month by month with a billing run, premium
//! payments, and the occasional claim along the way. The outcome is a
//! serializable [`SimulationReport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{config::SimulatorConfig, run_simulation};
//!
//! let report = run_simulation(&SimulatorConfig::default())?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod scenario;

pub use error::SimulatorError;
pub use report::SimulationReport;
pub use scenario::run_simulation;
