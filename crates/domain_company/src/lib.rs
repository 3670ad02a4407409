//! Insurance Company
//!
//! [`InsuranceCompany`] is the registry of every contract an insurer issues.
//! It owns the persons it deals with, the contract hierarchy, the payment
//! history, and the settled claims, and it reads "now" from a logical clock
//! the caller moves explicitly.
//!
//! # Operations
//!
//! - **Underwriting**: `insure_vehicle`, `insure_persons`,
//!   `create_master_vehicle_contract`
//! - **Hierarchy**: `move_contract_under_master`
//! - **Billing**: `charge_premiums_on_contracts`, `charge_premium_on_contract`,
//!   `pay_premium`
//! - **Claims**: `settle_travel_claim`, `settle_vehicle_claim`
//!
//! Every operation validates all of its input before changing anything, so
//! a failed call leaves the company exactly as it was.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut company = InsuranceCompany::new(start);
//! let holder = company.register_person(Person::new("8001011238")?)?;
//! let number = company.insure_vehicle(
//!     "V-1", None, holder, 200, PremiumPaymentFrequency::Monthly,
//!     Vehicle::new("BA123CD", 10_000)?,
//! )?;
//! company.set_current_time(start + Months::new(3));
//! company.charge_premiums_on_contracts()?;
//! ```

pub mod company;
pub mod billing;
pub mod claims;
pub mod rules;
pub mod error;

pub use company::InsuranceCompany;
pub use billing::PremiumCharge;
pub use rules::UnderwritingRules;
pub use error::CompanyError;
