//! Contract entity
//!
//! # Invariants
//!
//! - `active` starts `true` and, once cleared, never reverts
//! - leaf kinds own exactly one payment schedule, masters own none
//! - a travel contract insures at least one person
//! - a master lists each child at most once

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::{ContractNumber, InsurerId, PersonId};
use domain_billing::{ChargeSummary, PaymentSchedule};
use domain_party::Vehicle;

use crate::error::ContractError;

/// Discriminant of a contract kind, for display and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    SingleVehicle,
    Travel,
    MasterVehicle,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContractType::SingleVehicle => "single-vehicle",
            ContractType::Travel => "travel",
            ContractType::MasterVehicle => "master-vehicle",
        };
        f.write_str(name)
    }
}

/// Variant-specific contract data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContractKind {
    /// Covers one vehicle
    SingleVehicle {
        schedule: PaymentSchedule,
        vehicle: Vehicle,
    },
    /// Covers a set of travelling persons
    Travel {
        schedule: PaymentSchedule,
        insured_persons: BTreeSet<PersonId>,
    },
    /// Bundles single-vehicle contracts of one policy holder
    MasterVehicle {
        children: Vec<ContractNumber>,
    },
}

/// An agreement between an insurer and a policy holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Business key, unique within the insurer
    number: ContractNumber,
    /// Issuing insurer
    insurer: InsurerId,
    /// Payee of claims, if not the policy holder
    beneficiary: Option<PersonId>,
    /// Person holding the contract
    policy_holder: PersonId,
    /// Payout ceiling
    coverage_amount: i64,
    /// Whether the contract can still be billed and claimed
    active: bool,
    /// Variant data
    kind: ContractKind,
}

impl Contract {
    /// Creates a single-vehicle contract
    pub fn single_vehicle(
        number: ContractNumber,
        insurer: InsurerId,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
        schedule: PaymentSchedule,
        coverage_amount: i64,
        vehicle: Vehicle,
    ) -> Result<Self, ContractError> {
        Self::build(
            number,
            insurer,
            beneficiary,
            policy_holder,
            coverage_amount,
            ContractKind::SingleVehicle { schedule, vehicle },
        )
    }

    /// Creates a travel contract
    ///
    /// # Errors
    ///
    /// Returns a validation error if `insured_persons` is empty.
    pub fn travel(
        number: ContractNumber,
        insurer: InsurerId,
        policy_holder: PersonId,
        schedule: PaymentSchedule,
        coverage_amount: i64,
        insured_persons: BTreeSet<PersonId>,
    ) -> Result<Self, ContractError> {
        if insured_persons.is_empty() {
            return Err(ContractError::validation("travel contract must insure at least one person"));
        }
        Self::build(
            number,
            insurer,
            None,
            policy_holder,
            coverage_amount,
            ContractKind::Travel { schedule, insured_persons },
        )
    }

    /// Creates an empty master contract
    pub fn master_vehicle(
        number: ContractNumber,
        insurer: InsurerId,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
    ) -> Self {
        Self {
            number,
            insurer,
            beneficiary,
            policy_holder,
            coverage_amount: 0,
            active: true,
            kind: ContractKind::MasterVehicle { children: Vec::new() },
        }
    }

    fn build(
        number: ContractNumber,
        insurer: InsurerId,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
        coverage_amount: i64,
        kind: ContractKind,
    ) -> Result<Self, ContractError> {
        if coverage_amount < 0 {
            return Err(ContractError::validation(format!(
                "coverage amount must not be negative, got {}",
                coverage_amount
            )));
        }
        Ok(Self {
            number,
            insurer,
            beneficiary,
            policy_holder,
            coverage_amount,
            active: true,
            kind,
        })
    }

    pub fn number(&self) -> &ContractNumber {
        &self.number
    }

    pub fn insurer(&self) -> InsurerId {
        self.insurer
    }

    pub fn beneficiary(&self) -> Option<PersonId> {
        self.beneficiary
    }

    pub fn policy_holder(&self) -> PersonId {
        self.policy_holder
    }

    pub fn coverage_amount(&self) -> i64 {
        self.coverage_amount
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> &ContractKind {
        &self.kind
    }

    pub fn contract_type(&self) -> ContractType {
        match self.kind {
            ContractKind::SingleVehicle { .. } => ContractType::SingleVehicle,
            ContractKind::Travel { .. } => ContractType::Travel,
            ContractKind::MasterVehicle { .. } => ContractType::MasterVehicle,
        }
    }

    /// Returns the person claims are paid to
    pub fn payee(&self) -> PersonId {
        self.beneficiary.unwrap_or(self.policy_holder)
    }

    /// Returns the payment schedule of a leaf contract
    pub fn schedule(&self) -> Option<&PaymentSchedule> {
        match &self.kind {
            ContractKind::SingleVehicle { schedule, .. } | ContractKind::Travel { schedule, .. } => Some(schedule),
            ContractKind::MasterVehicle { .. } => None,
        }
    }

    pub fn schedule_mut(&mut self) -> Option<&mut PaymentSchedule> {
        match &mut self.kind {
            ContractKind::SingleVehicle { schedule, .. } | ContractKind::Travel { schedule, .. } => Some(schedule),
            ContractKind::MasterVehicle { .. } => None,
        }
    }

    /// Returns the attached children of a master contract
    pub fn children(&self) -> Option<&[ContractNumber]> {
        match &self.kind {
            ContractKind::MasterVehicle { children } => Some(children),
            _ => None,
        }
    }

    /// Returns the insured vehicle of a single-vehicle contract
    pub fn vehicle(&self) -> Option<&Vehicle> {
        match &self.kind {
            ContractKind::SingleVehicle { vehicle, .. } => Some(vehicle),
            _ => None,
        }
    }

    /// Returns the insured persons of a travel contract
    pub fn insured_persons(&self) -> Option<&BTreeSet<PersonId>> {
        match &self.kind {
            ContractKind::Travel { insured_persons, .. } => Some(insured_persons),
            _ => None,
        }
    }

    /// Returns true if claims may be paid to a beneficiary
    pub fn accepts_beneficiary(&self) -> bool {
        !matches!(self.kind, ContractKind::Travel { .. })
    }

    /// Fails with a domain-state error unless the contract is active
    pub fn ensure_active(&self) -> Result<(), ContractError> {
        if self.active {
            Ok(())
        } else {
            Err(ContractError::invalid_contract(format!("contract {} is not active", self.number)))
        }
    }

    /// Runs catch-up billing on a leaf contract
    ///
    /// The active flag is not consulted; callers decide whether an inactive
    /// contract may be billed. A master yields `None`.
    pub fn charge(&mut self, now: NaiveDateTime) -> Result<Option<ChargeSummary>, ContractError> {
        match self.schedule_mut() {
            Some(schedule) => Ok(Some(schedule.catch_up(now)?)),
            None => Ok(None),
        }
    }

    /// Replaces the beneficiary
    ///
    /// # Errors
    ///
    /// - `InvalidContract` if the contract is inactive
    /// - `Validation` if the contract kind has no beneficiary
    pub fn set_beneficiary(&mut self, beneficiary: Option<PersonId>) -> Result<(), ContractError> {
        self.ensure_active()?;
        if !self.accepts_beneficiary() {
            return Err(ContractError::validation(format!(
                "{} contract {} has no beneficiary",
                self.contract_type(),
                self.number
            )));
        }
        self.beneficiary = beneficiary;
        Ok(())
    }

    /// Appends a child to a master contract
    pub(crate) fn push_child(&mut self, child: ContractNumber) -> Result<(), ContractError> {
        match &mut self.kind {
            ContractKind::MasterVehicle { children } => {
                if children.contains(&child) {
                    return Err(ContractError::invalid_contract(format!(
                        "contract {} is already attached to {}",
                        child, self.number
                    )));
                }
                children.push(child);
                Ok(())
            }
            _ => Err(ContractError::validation(format!(
                "{} contract {} cannot hold child contracts",
                self.contract_type(),
                self.number
            ))),
        }
    }

    /// Deactivates the contract, returning whether it was active
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
