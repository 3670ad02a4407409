//! Claim settlement on company contracts

use std::collections::BTreeSet;

use core_kernel::{ContractNumber, PersonId};
use domain_claims::ClaimSettlement;

use crate::company::{rejected, InsuranceCompany};
use crate::error::CompanyError;

impl InsuranceCompany {
    /// Settles a travel claim for some of the insured persons
    ///
    /// The coverage is split evenly between `affected_persons` and the
    /// contract ends.
    pub fn settle_travel_claim(
        &mut self,
        number: &ContractNumber,
        affected_persons: &BTreeSet<PersonId>,
    ) -> Result<ClaimSettlement, CompanyError> {
        self.travel_claim(number, affected_persons)
            .inspect_err(|e| rejected("settle_travel_claim", e))
    }

    fn travel_claim(
        &mut self,
        number: &ContractNumber,
        affected_persons: &BTreeSet<PersonId>,
    ) -> Result<ClaimSettlement, CompanyError> {
        self.owned_contract(number)?;
        let now = self.current_time();
        let contract = self.contracts.require_mut(number)?;
        let settlement = self
            .claims
            .settle_travel_claim(contract, &mut self.parties, affected_persons, now)?;
        self.settlements.push(settlement.clone());
        Ok(settlement)
    }

    /// Settles a vehicle claim
    ///
    /// The full coverage is paid out; the contract ends only on a total loss.
    pub fn settle_vehicle_claim(
        &mut self,
        number: &ContractNumber,
        expected_damages: i64,
    ) -> Result<ClaimSettlement, CompanyError> {
        self.vehicle_claim(number, expected_damages)
            .inspect_err(|e| rejected("settle_vehicle_claim", e))
    }

    fn vehicle_claim(&mut self, number: &ContractNumber, expected_damages: i64) -> Result<ClaimSettlement, CompanyError> {
        self.owned_contract(number)?;
        let now = self.current_time();
        let contract = self.contracts.require_mut(number)?;
        let settlement = self
            .claims
            .settle_vehicle_claim(contract, &mut self.parties, expected_damages, now)?;
        self.settlements.push(settlement.clone());
        Ok(settlement)
    }

    /// Every settled claim, oldest first
    pub fn settlements(&self) -> &[ClaimSettlement] {
        &self.settlements
    }
}
