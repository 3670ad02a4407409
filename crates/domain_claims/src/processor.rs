//! Claim assessment and settlement

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::{PersonId, SettlementId};
use domain_contract::Contract;
use domain_party::PartyDirectory;

use crate::error::ClaimError;
use crate::settlement::{ClaimSettlement, ClaimType, Payout};

/// Share of a vehicle's original value at which damage counts as a total loss
pub const DEFAULT_TOTAL_LOSS_RATIO: Decimal = dec!(0.7);

/// Settles travel and vehicle claims
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimProcessor {
    total_loss_ratio: Decimal,
}

impl Default for ClaimProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_LOSS_RATIO)
    }
}

impl ClaimProcessor {
    pub fn new(total_loss_ratio: Decimal) -> Self {
        Self { total_loss_ratio }
    }

    pub fn total_loss_ratio(&self) -> Decimal {
        self.total_loss_ratio
    }

    /// Returns true if `expected_damages` reach the total-loss share of
    /// `original_value`
    ///
    /// The comparison is exact: 7000 of 10000 is a total loss at ratio 0.7,
    /// 6999 is not.
    pub fn is_total_loss(&self, expected_damages: i64, original_value: i64) -> bool {
        Decimal::from(expected_damages) >= self.total_loss_ratio * Decimal::from(original_value)
    }

    /// Assesses a travel claim without applying it
    ///
    /// Each affected person receives `coverage / |affected|` (integer
    /// division) and the contract is always deactivated.
    ///
    /// # Errors
    ///
    /// - `Validation` if the contract is not a travel contract, the affected
    ///   set is empty, or it contains a person the contract does not insure
    /// - `InvalidContract` if the contract is inactive
    pub fn assess_travel_claim(
        &self,
        contract: &Contract,
        affected_persons: &BTreeSet<PersonId>,
        now: NaiveDateTime,
    ) -> Result<ClaimSettlement, ClaimError> {
        let insured = contract.insured_persons().ok_or_else(|| {
            ClaimError::validation(format!("contract {} is not a travel contract", contract.number()))
        })?;
        if affected_persons.is_empty() {
            return Err(ClaimError::validation("affected persons must not be empty"));
        }
        if let Some(uninsured) = affected_persons.iter().find(|p| !insured.contains(p)) {
            return Err(ClaimError::validation(format!(
                "person {} is not insured by contract {}",
                uninsured,
                contract.number()
            )));
        }
        self.ensure_active(contract)?;

        // Non-empty set, so the divisor is at least one.
        let share = contract.coverage_amount() / affected_persons.len() as i64;
        let payouts = if share > 0 {
            affected_persons
                .iter()
                .map(|&payee| Payout { payee, amount: share })
                .collect()
        } else {
            Vec::new()
        };

        Ok(ClaimSettlement {
            id: SettlementId::new_v7(),
            contract_number: contract.number().clone(),
            claim_type: ClaimType::Travel,
            expected_damages: None,
            payouts,
            contract_deactivated: true,
            settled_at: now,
        })
    }

    /// Assesses a vehicle claim without applying it
    ///
    /// The full coverage goes to the payee. The contract is deactivated only
    /// on a total loss.
    ///
    /// # Errors
    ///
    /// - `Validation` if the contract is not a single-vehicle contract or
    ///   `expected_damages <= 0`
    /// - `InvalidContract` if the contract is inactive
    pub fn assess_vehicle_claim(
        &self,
        contract: &Contract,
        expected_damages: i64,
        now: NaiveDateTime,
    ) -> Result<ClaimSettlement, ClaimError> {
        let vehicle = contract.vehicle().ok_or_else(|| {
            ClaimError::validation(format!("contract {} is not a single-vehicle contract", contract.number()))
        })?;
        if expected_damages <= 0 {
            return Err(ClaimError::validation(format!(
                "expected damages must be positive, got {}",
                expected_damages
            )));
        }
        self.ensure_active(contract)?;

        let amount = contract.coverage_amount();
        let payouts = if amount > 0 {
            vec![Payout { payee: contract.payee(), amount }]
        } else {
            Vec::new()
        };

        Ok(ClaimSettlement {
            id: SettlementId::new_v7(),
            contract_number: contract.number().clone(),
            claim_type: ClaimType::Vehicle,
            expected_damages: Some(expected_damages),
            payouts,
            contract_deactivated: self.is_total_loss(expected_damages, vehicle.original_value()),
            settled_at: now,
        })
    }

    /// Applies an assessed settlement
    ///
    /// Payouts are all-or-nothing; the contract is deactivated only after
    /// every payee was paid.
    pub fn apply(
        &self,
        settlement: &ClaimSettlement,
        contract: &mut Contract,
        parties: &mut PartyDirectory,
    ) -> Result<(), ClaimError> {
        if contract.number() != &settlement.contract_number {
            return Err(ClaimError::validation(format!(
                "settlement for {} applied to contract {}",
                settlement.contract_number,
                contract.number()
            )));
        }
        self.ensure_active(contract)?;

        parties.payout_all(&settlement.payout_pairs())?;
        if settlement.contract_deactivated {
            contract.deactivate();
        }

        info!(
            contract_number = %settlement.contract_number,
            claim_type = ?settlement.claim_type,
            total_paid = settlement.total_paid(),
            deactivated = settlement.contract_deactivated,
            "Claim settled"
        );
        Ok(())
    }

    /// Assesses and applies a travel claim
    pub fn settle_travel_claim(
        &self,
        contract: &mut Contract,
        parties: &mut PartyDirectory,
        affected_persons: &BTreeSet<PersonId>,
        now: NaiveDateTime,
    ) -> Result<ClaimSettlement, ClaimError> {
        let settlement = self.assess_travel_claim(contract, affected_persons, now)?;
        self.apply(&settlement, contract, parties)?;
        Ok(settlement)
    }

    /// Assesses and applies a vehicle claim
    pub fn settle_vehicle_claim(
        &self,
        contract: &mut Contract,
        parties: &mut PartyDirectory,
        expected_damages: i64,
        now: NaiveDateTime,
    ) -> Result<ClaimSettlement, ClaimError> {
        let settlement = self.assess_vehicle_claim(contract, expected_damages, now)?;
        self.apply(&settlement, contract, parties)?;
        Ok(settlement)
    }

    fn ensure_active(&self, contract: &Contract) -> Result<(), ClaimError> {
        if contract.is_active() {
            Ok(())
        } else {
            Err(ClaimError::invalid_contract(format!(
                "contract {} is not active",
                contract.number()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_loss_boundary_is_exact() {
        let processor = ClaimProcessor::default();
        assert!(processor.is_total_loss(7_000, 10_000));
        assert!(!processor.is_total_loss(6_999, 10_000));
        // 0.7 * 3 = 2.1
        assert!(!processor.is_total_loss(2, 3));
        assert!(processor.is_total_loss(3, 3));
    }

    #[test]
    fn test_custom_ratio() {
        let processor = ClaimProcessor::new(dec!(0.5));
        assert!(processor.is_total_loss(50, 100));
        assert!(!processor.is_total_loss(49, 100));
    }
}
