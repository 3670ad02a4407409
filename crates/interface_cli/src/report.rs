//! Simulation report

use chrono::NaiveDateTime;
use serde::Serialize;

use core_kernel::ContractNumber;
use domain_claims::ClaimSettlement;
use domain_company::InsuranceCompany;
use domain_contract::{Contract, ContractType};

/// Billing figures of one simulated month
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub time: NaiveDateTime,
    /// Leaf contracts that had at least one period due
    pub contracts_billed: usize,
    pub amount_charged: i64,
    pub amount_paid: i64,
}

/// Final state of one contract
#[derive(Debug, Clone, Serialize)]
pub struct ContractSummary {
    pub number: ContractNumber,
    pub contract_type: ContractType,
    pub active: bool,
    pub coverage_amount: i64,
    pub outstanding_balance: Option<i64>,
    pub paid_amount: Option<i64>,
    pub children: Vec<ContractSummary>,
}

impl ContractSummary {
    fn of(company: &InsuranceCompany, contract: &Contract) -> Self {
        let children = contract
            .children()
            .unwrap_or_default()
            .iter()
            .filter_map(|number| company.contract(number))
            .map(|child| Self::of(company, child))
            .collect();

        Self {
            number: contract.number().clone(),
            contract_type: contract.contract_type(),
            active: contract.is_active(),
            coverage_amount: contract.coverage_amount(),
            outstanding_balance: contract.schedule().map(|s| s.outstanding_balance()),
            paid_amount: contract.schedule().map(|s| s.paid_amount()),
            children,
        }
    }
}

/// Outcome of a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub months: Vec<MonthSummary>,
    /// Top-level contracts in creation order, masters with their children
    pub contracts: Vec<ContractSummary>,
    pub settlements: Vec<ClaimSettlement>,
}

impl SimulationReport {
    /// Captures the final state of a company
    pub fn capture(company: &InsuranceCompany, start: NaiveDateTime, months: Vec<MonthSummary>) -> Self {
        Self {
            start,
            end: company.current_time(),
            months,
            contracts: company
                .contracts()
                .map(|contract| ContractSummary::of(company, contract))
                .collect(),
            settlements: company.settlements().to_vec(),
        }
    }

    /// Total charged over all simulated months
    pub fn total_charged(&self) -> i64 {
        self.months.iter().map(|m| m.amount_charged).sum()
    }
}
