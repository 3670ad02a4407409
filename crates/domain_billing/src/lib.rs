//! Billing Domain - Premium Schedules and Payments
//!
//! This crate implements per-contract premium billing for the insurance
//! company, driven entirely by the insurer's logical clock.
//!
//! # Catch-up Billing
//!
//! A [`PaymentSchedule`] holds the premium, the payment frequency, the next
//! due time, and the outstanding balance. Whenever the insurer bills a
//! contract, every period whose due time is at or before "now" is charged:
//!
//! ```text
//! while next_payment_time <= now:
//!     outstanding_balance += premium
//!     next_payment_time   += frequency
//! ```
//!
//! The clock may move many periods between billing passes, so charging is a
//! loop rather than a single step.
//!
//! # Payments
//!
//! Payments never reduce the outstanding balance (it only accumulates
//! charges). They are tracked separately as `paid_amount`, and
//! `balance_due = outstanding_balance - paid_amount` may become negative
//! when a contract is prepaid.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{PaymentSchedule, PremiumPaymentFrequency};
//!
//! let mut schedule = PaymentSchedule::new(100, PremiumPaymentFrequency::Monthly, now, 0)?;
//! let summary = schedule.catch_up(now)?;
//! assert_eq!(summary.periods, 1);
//! ```

pub mod frequency;
pub mod schedule;
pub mod payment;
pub mod error;

pub use frequency::PremiumPaymentFrequency;
pub use schedule::{PaymentSchedule, ChargeSummary};
pub use payment::{PaymentInstance, PaymentHistory, PaymentTarget, distribute_payment};
pub use error::BillingError;
