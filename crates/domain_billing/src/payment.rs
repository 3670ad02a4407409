//! Premium payment records and distribution
//!
//! This module records premium payments per contract and splits a single
//! payment across several schedules (used for master contracts).

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::{ContractNumber, PaymentId};
use crate::error::BillingError;

/// A single premium payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstance {
    /// Unique identifier
    pub id: PaymentId,
    /// Logical time the payment was received
    pub payment_time: NaiveDateTime,
    /// Amount paid
    pub amount: i64,
}

impl PaymentInstance {
    /// Creates a new payment record
    pub fn new(payment_time: NaiveDateTime, amount: i64) -> Self {
        Self {
            id: PaymentId::new_v7(),
            payment_time,
            amount,
        }
    }
}

/// Payment records grouped by contract, in payment order
#[derive(Debug, Clone, Default)]
pub struct PaymentHistory {
    entries: HashMap<ContractNumber, Vec<PaymentInstance>>,
}

impl PaymentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a payment to a contract's history
    pub fn record(&mut self, number: ContractNumber, payment: PaymentInstance) {
        self.entries.entry(number).or_default().push(payment);
    }

    /// Returns the payments recorded against a contract
    pub fn for_contract(&self, number: &ContractNumber) -> &[PaymentInstance] {
        self.entries.get(number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sums the payments recorded against a contract
    pub fn total_for_contract(&self, number: &ContractNumber) -> i64 {
        self.for_contract(number).iter().map(|p| p.amount).sum()
    }
}

/// A schedule that takes part in a payment distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTarget {
    /// Charged minus paid; only positive values are settled first
    pub balance_due: i64,
    /// Premium per period, the prepayment step
    pub premium: i64,
}

/// Splits a payment across targets, returning one allocation per target
///
/// Two passes over the targets in order:
/// 1. each positive `balance_due` is settled while money remains
/// 2. the rest is handed out round-robin, at most one `premium` per target
///    per round, until nothing remains
///
/// The allocations always sum to `amount`.
///
/// # Errors
///
/// - `InvalidAmount` if `amount <= 0` or there are no targets
/// - `InvalidPremium` if a target has a non-positive premium
pub fn distribute_payment(amount: i64, targets: &[PaymentTarget]) -> Result<Vec<i64>, BillingError> {
    if amount <= 0 {
        return Err(BillingError::invalid_amount(format!("payment must be positive, got {}", amount)));
    }
    if targets.is_empty() {
        return Err(BillingError::invalid_amount("no schedules to distribute the payment to"));
    }
    if let Some(target) = targets.iter().find(|t| t.premium <= 0) {
        return Err(BillingError::InvalidPremium(target.premium));
    }

    let mut allocations = vec![0i64; targets.len()];
    let mut remaining = amount;

    for (allocation, target) in allocations.iter_mut().zip(targets) {
        if remaining == 0 {
            break;
        }
        if target.balance_due > 0 {
            let paid = target.balance_due.min(remaining);
            *allocation += paid;
            remaining -= paid;
        }
    }

    // Whole rounds at once, then a single partial round.
    let round: i64 = targets
        .iter()
        .try_fold(0i64, |acc, t| acc.checked_add(t.premium))
        .ok_or_else(|| BillingError::Overflow("premium round".to_string()))?;
    let full_rounds = remaining / round;
    if full_rounds > 0 {
        for (allocation, target) in allocations.iter_mut().zip(targets) {
            *allocation += full_rounds * target.premium;
        }
        remaining -= full_rounds * round;
    }

    for (allocation, target) in allocations.iter_mut().zip(targets) {
        if remaining == 0 {
            break;
        }
        let paid = target.premium.min(remaining);
        *allocation += paid;
        remaining -= paid;
    }

    Ok(allocations)
}
