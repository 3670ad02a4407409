//! Contract registry
//!
//! # Invariants
//!
//! - a contract number is used at most once over the company's lifetime
//! - contracts attached under a master are absent from the top-level list
//!   and from their holder's direct contracts
//! - a failed operation changes nothing

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use core_kernel::{ContractNumber, InsurerId, LogicalClock, PersonId};
use domain_billing::{PaymentHistory, PaymentSchedule, PremiumPaymentFrequency};
use domain_claims::{ClaimProcessor, ClaimSettlement};
use domain_contract::{Contract, ContractHierarchy};
use domain_party::{PartyDirectory, Person, Vehicle};

use crate::error::CompanyError;
use crate::rules::UnderwritingRules;

/// An insurer and every contract it has issued
#[derive(Debug, Clone)]
pub struct InsuranceCompany {
    pub(crate) id: InsurerId,
    pub(crate) clock: LogicalClock,
    pub(crate) rules: UnderwritingRules,
    pub(crate) claims: ClaimProcessor,
    pub(crate) parties: PartyDirectory,
    pub(crate) contracts: ContractHierarchy,
    pub(crate) payments: PaymentHistory,
    pub(crate) settlements: Vec<ClaimSettlement>,
}

impl InsuranceCompany {
    /// Creates a company with the default underwriting rules
    pub fn new(current_time: NaiveDateTime) -> Self {
        let rules = UnderwritingRules::default();
        Self {
            id: InsurerId::new_v7(),
            clock: LogicalClock::new(current_time),
            claims: ClaimProcessor::new(rules.total_loss_ratio),
            rules,
            parties: PartyDirectory::new(),
            contracts: ContractHierarchy::new(),
            payments: PaymentHistory::new(),
            settlements: Vec::new(),
        }
    }

    /// Replaces the underwriting rules
    pub fn with_rules(mut self, rules: UnderwritingRules) -> Result<Self, CompanyError> {
        rules.validate()?;
        self.claims = ClaimProcessor::new(rules.total_loss_ratio);
        self.rules = rules;
        Ok(self)
    }

    pub fn id(&self) -> InsurerId {
        self.id
    }

    pub fn rules(&self) -> &UnderwritingRules {
        &self.rules
    }

    pub fn current_time(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Moves the logical clock; nothing is billed until asked
    pub fn set_current_time(&mut self, current_time: NaiveDateTime) {
        self.clock.set(current_time);
    }

    /// Moves the logical clock forward by whole months
    pub fn advance_months(&mut self, months: u32) -> Result<NaiveDateTime, CompanyError> {
        Ok(self.clock.advance_months(months).map_err(core_kernel::CoreError::from)?)
    }

    // ------------------------------------------------------------------
    // Persons
    // ------------------------------------------------------------------

    /// Registers a person with the company
    pub fn register_person(&mut self, person: Person) -> Result<PersonId, CompanyError> {
        Ok(self.parties.register(person)?)
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.parties.get(id)
    }

    pub fn parties(&self) -> &PartyDirectory {
        &self.parties
    }

    // ------------------------------------------------------------------
    // Contracts
    // ------------------------------------------------------------------

    /// Looks up any contract held by the company, attached or not
    pub fn contract(&self, number: &ContractNumber) -> Option<&Contract> {
        self.contracts.get(number)
    }

    /// Top-level contracts in creation order
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> + '_ {
        self.contracts.top_level()
    }

    pub fn hierarchy(&self) -> &ContractHierarchy {
        &self.contracts
    }

    /// Issues a single-vehicle contract
    ///
    /// The yearly premium must reach the vehicle minimum and the coverage is
    /// a fixed share of the vehicle's value. The new contract is billed
    /// immediately, so its first premium is already outstanding.
    ///
    /// # Errors
    ///
    /// - Validation: empty or reused number, non-positive or too small
    ///   premium
    /// - DomainState: holder or beneficiary not registered
    pub fn insure_vehicle(
        &mut self,
        contract_number: impl Into<String>,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
        proposed_premium: i64,
        frequency: PremiumPaymentFrequency,
        vehicle: Vehicle,
    ) -> Result<ContractNumber, CompanyError> {
        self.issue_vehicle(contract_number.into(), beneficiary, policy_holder, proposed_premium, frequency, vehicle)
            .inspect_err(|e| rejected("insure_vehicle", e))
    }

    fn issue_vehicle(
        &mut self,
        contract_number: String,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
        proposed_premium: i64,
        frequency: PremiumPaymentFrequency,
        vehicle: Vehicle,
    ) -> Result<ContractNumber, CompanyError> {
        let number = self.new_contract_number(contract_number)?;
        ensure_positive_premium(proposed_premium)?;
        self.ensure_registered(&policy_holder)?;
        if let Some(beneficiary) = &beneficiary {
            self.ensure_registered(beneficiary)?;
        }

        let annual_premium = frequency.annualize(proposed_premium)?;
        if !self.rules.meets_vehicle_minimum(annual_premium, vehicle.original_value()) {
            return Err(CompanyError::validation(format!(
                "annual premium {} is below {} of the vehicle value {}",
                annual_premium,
                self.rules.vehicle_min_annual_rate,
                vehicle.original_value()
            )));
        }
        let coverage = self.rules.vehicle_coverage(vehicle.original_value())?;

        let schedule = PaymentSchedule::new(proposed_premium, frequency, self.current_time(), 0)?;
        let contract = Contract::single_vehicle(
            number,
            self.id,
            beneficiary,
            policy_holder,
            schedule,
            coverage,
            vehicle,
        )?;
        self.register_contract(contract)
    }

    /// Issues a travel contract for a set of registered persons
    ///
    /// # Errors
    ///
    /// - Validation: empty or reused number, empty person set,
    ///   non-positive or too small premium
    /// - DomainState: holder or an insured person not registered
    pub fn insure_persons(
        &mut self,
        contract_number: impl Into<String>,
        policy_holder: PersonId,
        proposed_premium: i64,
        frequency: PremiumPaymentFrequency,
        persons_to_insure: &BTreeSet<PersonId>,
    ) -> Result<ContractNumber, CompanyError> {
        self.issue_travel(contract_number.into(), policy_holder, proposed_premium, frequency, persons_to_insure)
            .inspect_err(|e| rejected("insure_persons", e))
    }

    fn issue_travel(
        &mut self,
        contract_number: String,
        policy_holder: PersonId,
        proposed_premium: i64,
        frequency: PremiumPaymentFrequency,
        persons_to_insure: &BTreeSet<PersonId>,
    ) -> Result<ContractNumber, CompanyError> {
        let number = self.new_contract_number(contract_number)?;
        if persons_to_insure.is_empty() {
            return Err(CompanyError::validation("persons to insure must not be empty"));
        }
        ensure_positive_premium(proposed_premium)?;
        self.ensure_registered(&policy_holder)?;
        for person in persons_to_insure {
            self.ensure_registered(person)?;
        }

        let annual_premium = frequency.annualize(proposed_premium)?;
        let minimum = self.rules.travel_minimum(persons_to_insure.len())?;
        if annual_premium < minimum {
            return Err(CompanyError::validation(format!(
                "annual premium {} is below the minimum {} for {} persons",
                annual_premium,
                minimum,
                persons_to_insure.len()
            )));
        }
        let coverage = self.rules.travel_coverage(persons_to_insure.len())?;

        let schedule = PaymentSchedule::new(proposed_premium, frequency, self.current_time(), 0)?;
        let contract = Contract::travel(
            number,
            self.id,
            policy_holder,
            schedule,
            coverage,
            persons_to_insure.clone(),
        )?;
        self.register_contract(contract)
    }

    /// Opens an empty master contract for bundling vehicle contracts
    ///
    /// A master carries no premium; it is billed through its children.
    pub fn create_master_vehicle_contract(
        &mut self,
        contract_number: impl Into<String>,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
    ) -> Result<ContractNumber, CompanyError> {
        self.issue_master(contract_number.into(), beneficiary, policy_holder)
            .inspect_err(|e| rejected("create_master_vehicle_contract", e))
    }

    fn issue_master(
        &mut self,
        contract_number: String,
        beneficiary: Option<PersonId>,
        policy_holder: PersonId,
    ) -> Result<ContractNumber, CompanyError> {
        let number = self.new_contract_number(contract_number)?;
        self.ensure_registered(&policy_holder)?;
        if let Some(beneficiary) = &beneficiary {
            self.ensure_registered(beneficiary)?;
        }

        let contract = Contract::master_vehicle(number, self.id, beneficiary, policy_holder);
        self.register_contract(contract)
    }

    /// Moves a top-level vehicle contract under a master contract
    ///
    /// The child leaves the top-level list and its holder's direct
    /// contracts; from now on it is billed through the master.
    ///
    /// # Errors
    ///
    /// - DomainState: unknown or foreign contract, inactive contract,
    ///   different policy holders, child already attached
    /// - Validation: `master` is not a master contract or `child` is one
    pub fn move_contract_under_master(
        &mut self,
        master: &ContractNumber,
        child: &ContractNumber,
    ) -> Result<(), CompanyError> {
        self.attach(master, child)
            .inspect_err(|e| rejected("move_contract_under_master", e))
    }

    fn attach(&mut self, master: &ContractNumber, child: &ContractNumber) -> Result<(), CompanyError> {
        let master_contract = self.owned_contract(master)?;
        let child_contract = self.owned_contract(child)?;
        master_contract.ensure_active()?;
        child_contract.ensure_active()?;
        if master_contract.policy_holder() != child_contract.policy_holder() {
            return Err(CompanyError::invalid_contract(format!(
                "contracts {} and {} have different policy holders",
                master, child
            )));
        }
        let holder = child_contract.policy_holder();

        self.contracts.attach(master, child)?;
        self.parties.unlink_contract(&holder, child)?;

        info!(master = %master, child = %child, "Contract moved under master");
        Ok(())
    }

    /// Replaces the beneficiary of a vehicle or master contract
    pub fn change_beneficiary(
        &mut self,
        number: &ContractNumber,
        beneficiary: Option<PersonId>,
    ) -> Result<(), CompanyError> {
        if let Some(beneficiary) = &beneficiary {
            self.ensure_registered(beneficiary)?;
        }
        self.owned_contract(number)?;
        self.contracts.require_mut(number)?.set_beneficiary(beneficiary)?;
        info!(contract_number = %number, "Beneficiary changed");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Validates a new contract number
    fn new_contract_number(&self, value: String) -> Result<ContractNumber, CompanyError> {
        let number = ContractNumber::new(value)?;
        self.contracts.ensure_unused(&number)?;
        Ok(number)
    }

    fn ensure_registered(&self, person: &PersonId) -> Result<(), CompanyError> {
        self.parties.require(person)?;
        Ok(())
    }

    /// Looks up a contract issued by this company
    pub(crate) fn owned_contract(&self, number: &ContractNumber) -> Result<&Contract, CompanyError> {
        let contract = self.contracts.get(number).ok_or_else(|| {
            CompanyError::invalid_contract(format!("contract {} does not belong to this insurer", number))
        })?;
        if contract.insurer() != self.id {
            return Err(CompanyError::invalid_contract(format!(
                "contract {} was issued by another insurer",
                number
            )));
        }
        Ok(contract)
    }

    /// Bills a freshly built contract, stores it, and links its holder
    ///
    /// Billing runs on the detached contract, so a failure leaves no trace.
    fn register_contract(&mut self, mut contract: Contract) -> Result<ContractNumber, CompanyError> {
        let now = self.current_time();
        let charged = contract.charge(now)?;
        let number = contract.number().clone();
        let holder = contract.policy_holder();
        let contract_type = contract.contract_type();

        self.contracts.insert(contract)?;
        self.parties.link_contract(&holder, number.clone())?;

        info!(
            contract_number = %number,
            contract_type = %contract_type,
            policy_holder = %holder,
            periods_charged = charged.map_or(0, |summary| summary.periods),
            "Contract issued"
        );
        Ok(number)
    }
}

fn ensure_positive_premium(premium: i64) -> Result<(), CompanyError> {
    if premium <= 0 {
        return Err(CompanyError::validation(format!(
            "proposed premium must be positive, got {}",
            premium
        )));
    }
    Ok(())
}

/// Logs an operation rejected at the company boundary
pub(crate) fn rejected(operation: &'static str, error: &CompanyError) {
    warn!(operation, kind = ?error.kind(), error = %error, "Operation rejected");
}
