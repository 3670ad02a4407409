//! Per-contract payment schedule
//!
//! # Invariants
//!
//! - `premium` is strictly positive
//! - `outstanding_balance` never decreases
//! - after `catch_up(now)` returns, `next_payment_time > now`

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::trace;

use core_kernel::add_months;
use crate::error::BillingError;
use crate::frequency::PremiumPaymentFrequency;

/// Result of a catch-up billing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSummary {
    /// Number of periods charged
    pub periods: u32,
    /// Total amount added to the outstanding balance
    pub amount: i64,
    /// Due time of the next uncharged period
    pub next_payment_time: NaiveDateTime,
}

impl ChargeSummary {
    /// Returns true if nothing was due
    pub fn is_empty(&self) -> bool {
        self.periods == 0
    }
}

/// Billing state of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    /// Amount charged per period
    premium: i64,
    /// Period length
    frequency: PremiumPaymentFrequency,
    /// Due time of the next charge
    next_payment_time: NaiveDateTime,
    /// Accumulated charged premiums
    outstanding_balance: i64,
    /// Accumulated payments received
    paid_amount: i64,
}

impl PaymentSchedule {
    /// Creates a schedule anchored at `next_payment_time`
    ///
    /// # Errors
    ///
    /// - `InvalidPremium` if `premium <= 0`
    /// - `InvalidAmount` if `outstanding_balance < 0`
    pub fn new(
        premium: i64,
        frequency: PremiumPaymentFrequency,
        next_payment_time: NaiveDateTime,
        outstanding_balance: i64,
    ) -> Result<Self, BillingError> {
        if premium <= 0 {
            return Err(BillingError::InvalidPremium(premium));
        }
        if outstanding_balance < 0 {
            return Err(BillingError::invalid_amount(format!(
                "initial outstanding balance must not be negative, got {}",
                outstanding_balance
            )));
        }

        Ok(Self {
            premium,
            frequency,
            next_payment_time,
            outstanding_balance,
            paid_amount: 0,
        })
    }

    pub fn premium(&self) -> i64 {
        self.premium
    }

    pub fn frequency(&self) -> PremiumPaymentFrequency {
        self.frequency
    }

    pub fn next_payment_time(&self) -> NaiveDateTime {
        self.next_payment_time
    }

    pub fn outstanding_balance(&self) -> i64 {
        self.outstanding_balance
    }

    pub fn paid_amount(&self) -> i64 {
        self.paid_amount
    }

    /// Returns charged minus paid; negative when prepaid
    pub fn balance_due(&self) -> i64 {
        self.outstanding_balance - self.paid_amount
    }

    /// Returns the yearly sum of this schedule's premiums
    pub fn annual_premium(&self) -> Result<i64, BillingError> {
        self.frequency.annualize(self.premium)
    }

    /// Returns true if at least one period is due at `now`
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.next_payment_time <= now
    }

    /// Charges every period due at or before `now`
    ///
    /// The schedule is only updated once every period has been charged
    /// successfully; on error it is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the balance cannot be represented, or a temporal
    /// error if the due time cannot be advanced.
    pub fn catch_up(&mut self, now: NaiveDateTime) -> Result<ChargeSummary, BillingError> {
        let mut next_payment_time = self.next_payment_time;
        let mut outstanding_balance = self.outstanding_balance;
        let mut periods = 0u32;

        while next_payment_time <= now {
            outstanding_balance = outstanding_balance
                .checked_add(self.premium)
                .ok_or_else(|| BillingError::Overflow("outstanding balance".to_string()))?;
            next_payment_time = add_months(next_payment_time, self.frequency.months())?;
            periods += 1;
        }

        let amount = outstanding_balance - self.outstanding_balance;
        if periods > 0 {
            trace!(periods, amount, next = %next_payment_time, "Schedule caught up");
        }
        self.next_payment_time = next_payment_time;
        self.outstanding_balance = outstanding_balance;

        Ok(ChargeSummary {
            periods,
            amount,
            next_payment_time,
        })
    }

    /// Credits a payment
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount <= 0`.
    pub fn record_payment(&mut self, amount: i64) -> Result<(), BillingError> {
        if amount <= 0 {
            return Err(BillingError::invalid_amount(format!(
                "payment must be positive, got {}",
                amount
            )));
        }
        self.paid_amount = self
            .paid_amount
            .checked_add(amount)
            .ok_or_else(|| BillingError::Overflow("paid amount".to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_catch_up_charges_anchor_period() {
        let mut schedule = PaymentSchedule::new(100, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), 0).unwrap();
        let summary = schedule.catch_up(at(2024, 1, 1)).unwrap();

        assert_eq!(summary.periods, 1);
        assert_eq!(schedule.outstanding_balance(), 100);
        assert_eq!(schedule.next_payment_time(), at(2024, 2, 1));
    }

    #[test]
    fn test_catch_up_skipped_cycles() {
        let mut schedule = PaymentSchedule::new(50, PremiumPaymentFrequency::Quarterly, at(2024, 1, 1), 0).unwrap();
        let summary = schedule.catch_up(at(2024, 12, 31)).unwrap();

        assert_eq!(summary.periods, 4);
        assert_eq!(summary.amount, 200);
        assert_eq!(schedule.next_payment_time(), at(2025, 1, 1));
    }

    #[test]
    fn test_catch_up_before_anchor_charges_nothing() {
        let mut schedule = PaymentSchedule::new(50, PremiumPaymentFrequency::Annual, at(2024, 6, 1), 0).unwrap();
        let summary = schedule.catch_up(at(2024, 5, 31)).unwrap();

        assert!(summary.is_empty());
        assert_eq!(schedule.outstanding_balance(), 0);
    }

    #[test]
    fn test_overflow_leaves_schedule_untouched() {
        let mut schedule = PaymentSchedule::new(i64::MAX, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), 0).unwrap();
        assert!(schedule.catch_up(at(2024, 3, 1)).is_err());
        assert_eq!(schedule.outstanding_balance(), 0);
        assert_eq!(schedule.next_payment_time(), at(2024, 1, 1));
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            PaymentSchedule::new(0, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), 0),
            Err(BillingError::InvalidPremium(0))
        );
        assert!(PaymentSchedule::new(10, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), -1).is_err());
    }
}
