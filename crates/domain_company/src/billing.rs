//! Billing runs and premium payments

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::ContractNumber;
use domain_billing::{distribute_payment, ChargeSummary, PaymentInstance, PaymentTarget};

use crate::company::{rejected, InsuranceCompany};
use crate::error::CompanyError;

/// Charges applied to one leaf contract during a billing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumCharge {
    pub contract_number: ContractNumber,
    pub summary: ChargeSummary,
}

impl InsuranceCompany {
    /// Bills every active top-level contract up to the current time
    ///
    /// Masters are billed through all of their children. Inactive top-level
    /// contracts are skipped. Returns the charges of every billed leaf in
    /// billing order.
    pub fn charge_premiums_on_contracts(&mut self) -> Result<Vec<PremiumCharge>, CompanyError> {
        let mut leaves = Vec::new();
        for contract in self.contracts.top_level().filter(|c| c.is_active()) {
            leaves.extend(self.contracts.leaves(contract.number())?);
        }
        let charges = self
            .charge_leaves(leaves)
            .inspect_err(|e| rejected("charge_premiums_on_contracts", e))?;

        info!(
            billed = charges.len(),
            amount = charges.iter().map(|c| c.summary.amount).sum::<i64>(),
            "Billing run finished"
        );
        Ok(charges)
    }

    /// Bills one contract up to the current time
    ///
    /// A master is billed through every attached child, whether or not the
    /// child is still active.
    ///
    /// # Errors
    ///
    /// DomainState if the contract is unknown or inactive.
    pub fn charge_premium_on_contract(&mut self, number: &ContractNumber) -> Result<Vec<PremiumCharge>, CompanyError> {
        self.charge_one(number)
            .inspect_err(|e| rejected("charge_premium_on_contract", e))
    }

    fn charge_one(&mut self, number: &ContractNumber) -> Result<Vec<PremiumCharge>, CompanyError> {
        self.owned_contract(number)?.ensure_active()?;
        let leaves = self.contracts.leaves(number)?;
        self.charge_leaves(leaves)
    }

    /// Runs catch-up billing on every listed leaf, all or nothing
    fn charge_leaves(&mut self, leaves: Vec<ContractNumber>) -> Result<Vec<PremiumCharge>, CompanyError> {
        let now = self.current_time();

        // Dry run on copies; nothing is charged unless every leaf can be.
        for number in &leaves {
            if let Some(schedule) = self.contracts.require(number)?.schedule() {
                schedule.clone().catch_up(now)?;
            }
        }

        let mut charges = Vec::with_capacity(leaves.len());
        for number in leaves {
            let contract = self.contracts.require_mut(&number)?;
            if let Some(summary) = contract.charge(now)? {
                debug!(
                    contract_number = %number,
                    periods = summary.periods,
                    amount = summary.amount,
                    next_payment_time = %summary.next_payment_time,
                    "Premium charged"
                );
                charges.push(PremiumCharge { contract_number: number, summary });
            }
        }
        Ok(charges)
    }

    /// Records a premium payment against a contract
    ///
    /// A leaf contract is credited directly. A master distributes the
    /// payment over its active children: outstanding dues first, then one
    /// premium per child in turn as prepayment. Either way a single payment
    /// is recorded against `number`.
    ///
    /// # Errors
    ///
    /// - Validation if `amount <= 0`
    /// - DomainState if the contract is unknown or inactive, or a master has
    ///   no active child
    pub fn pay_premium(&mut self, number: &ContractNumber, amount: i64) -> Result<PaymentInstance, CompanyError> {
        self.receive_payment(number, amount)
            .inspect_err(|e| rejected("pay_premium", e))
    }

    fn receive_payment(&mut self, number: &ContractNumber, amount: i64) -> Result<PaymentInstance, CompanyError> {
        if amount <= 0 {
            return Err(CompanyError::validation(format!("payment must be positive, got {}", amount)));
        }
        let contract = self.owned_contract(number)?;
        contract.ensure_active()?;

        let allocations: Vec<(ContractNumber, i64)> = match contract.children() {
            None => vec![(number.clone(), amount)],
            Some(children) => {
                let mut recipients = Vec::new();
                let mut targets = Vec::new();
                for child in children {
                    let child_contract = self.contracts.require(child)?;
                    if !child_contract.is_active() {
                        continue;
                    }
                    if let Some(schedule) = child_contract.schedule() {
                        recipients.push(child.clone());
                        targets.push(PaymentTarget {
                            balance_due: schedule.balance_due(),
                            premium: schedule.premium(),
                        });
                    }
                }
                if targets.is_empty() {
                    return Err(CompanyError::invalid_contract(format!(
                        "master contract {} has no active child to pay",
                        number
                    )));
                }
                let split = distribute_payment(amount, &targets)?;
                recipients.into_iter().zip(split).filter(|(_, share)| *share > 0).collect()
            }
        };

        for (recipient, share) in &allocations {
            if let Some(schedule) = self.contracts.require(recipient)?.schedule() {
                schedule.clone().record_payment(*share)?;
            }
        }
        for (recipient, share) in &allocations {
            if let Some(schedule) = self.contracts.require_mut(recipient)?.schedule_mut() {
                schedule.record_payment(*share)?;
            }
        }

        let payment = PaymentInstance::new(self.current_time(), amount);
        self.payments.record(number.clone(), payment.clone());

        info!(contract_number = %number, amount, recipients = allocations.len(), "Premium paid");
        Ok(payment)
    }

    /// Payments recorded against a contract, oldest first
    pub fn payment_history(&self, number: &ContractNumber) -> Result<&[PaymentInstance], CompanyError> {
        self.owned_contract(number)?;
        Ok(self.payments.for_contract(number))
    }
}
