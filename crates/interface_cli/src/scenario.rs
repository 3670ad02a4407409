//! Scripted simulation timeline
//!
//! A leasing company bundles two fleet vehicles under a master contract, a
//! family insures a car and a trip, and every simulated month the company
//! bills all contracts and collects what is due. Claims are filed in months
//! 3 (trip), 6 (car, partial damage) and 9 (fleet vehicle, total loss).

use std::collections::BTreeSet;

use tracing::info;

use core_kernel::{ContractNumber, PersonId};
use domain_billing::PremiumPaymentFrequency;
use domain_company::{InsuranceCompany, UnderwritingRules};
use domain_party::{Person, Vehicle};

use crate::config::SimulatorConfig;
use crate::error::SimulatorError;
use crate::report::{MonthSummary, SimulationReport};

const FLEET: &str = "FLEET";
const FLEET_VEHICLES: [&str; 2] = ["FLEET-1", "FLEET-2"];
const CAR: &str = "CAR-1";
const TRIP: &str = "TRIP-1";

struct Cast {
    leasing: PersonId,
    father: PersonId,
    mother: PersonId,
    child: PersonId,
}

/// Runs the scripted timeline with the default underwriting rules
pub fn run_simulation(config: &SimulatorConfig) -> Result<SimulationReport, SimulatorError> {
    run_simulation_with_rules(config, UnderwritingRules::default())
}

/// Runs the scripted timeline
pub fn run_simulation_with_rules(
    config: &SimulatorConfig,
    rules: UnderwritingRules,
) -> Result<SimulationReport, SimulatorError> {
    let start = config.start_time()?;
    let mut company = InsuranceCompany::new(start).with_rules(rules)?;

    let cast = register_cast(&mut company)?;
    issue_contracts(&mut company, &cast)?;
    info!(start = %start, months = config.months, "Simulation started");

    let mut months = Vec::with_capacity(config.months as usize);
    for month in 1..=config.months {
        let time = company.advance_months(1)?;
        let charges = company.charge_premiums_on_contracts()?;
        let amount_paid = collect_premiums(&mut company)?;
        file_claims(&mut company, &cast, month)?;

        let summary = MonthSummary {
            time,
            contracts_billed: charges.iter().filter(|c| !c.summary.is_empty()).count(),
            amount_charged: charges.iter().map(|c| c.summary.amount).sum(),
            amount_paid,
        };
        info!(
            month,
            billed = summary.contracts_billed,
            charged = summary.amount_charged,
            paid = summary.amount_paid,
            "Month simulated"
        );
        months.push(summary);
    }

    Ok(SimulationReport::capture(&company, start, months))
}

fn register_cast(company: &mut InsuranceCompany) -> Result<Cast, SimulatorError> {
    let person = |id_number: &str, name: &str| Person::new(id_number).and_then(|p| p.with_name(name));

    Ok(Cast {
        leasing: company.register_person(person("12345678", "Fleet Leasing")?)?,
        father: company.register_person(person("8001011238", "Peter Novak")?)?,
        mother: company.register_person(person("8051011232", "Jana Novakova")?)?,
        child: company.register_person(person("0412310008", "Eva Novakova")?)?,
    })
}

fn vehicle(plate: &str, original_value: i64) -> Result<Vehicle, SimulatorError> {
    Ok(Vehicle::new(plate, original_value)?)
}

fn issue_contracts(company: &mut InsuranceCompany, cast: &Cast) -> Result<(), SimulatorError> {
    let master = company.create_master_vehicle_contract(FLEET, None, cast.leasing)?;
    for (index, number) in FLEET_VEHICLES.into_iter().enumerate() {
        let child = company.insure_vehicle(
            number,
            None,
            cast.leasing,
            40,
            PremiumPaymentFrequency::Monthly,
            vehicle(&format!("FL{:05}", index + 1), 20_000)?,
        )?;
        company.move_contract_under_master(&master, &child)?;
    }

    company.insure_vehicle(
        CAR,
        Some(cast.mother),
        cast.father,
        75,
        PremiumPaymentFrequency::Quarterly,
        vehicle("BA123CD", 12_000)?,
    )?;

    let travellers: BTreeSet<PersonId> = [cast.father, cast.mother, cast.child].into_iter().collect();
    company.insure_persons(TRIP, cast.mother, 30, PremiumPaymentFrequency::Annual, &travellers)?;
    Ok(())
}

/// Pays the positive balance of every active top-level contract
fn collect_premiums(company: &mut InsuranceCompany) -> Result<i64, SimulatorError> {
    let dues: Vec<(ContractNumber, i64)> = company
        .contracts()
        .filter(|contract| contract.is_active())
        .map(|contract| (contract.number().clone(), balance_due(company, contract.number())))
        .filter(|(_, due)| *due > 0)
        .collect();

    let mut paid = 0;
    for (number, due) in dues {
        company.pay_premium(&number, due)?;
        paid += due;
    }
    Ok(paid)
}

/// Positive dues of a leaf, or of the active children of a master
fn balance_due(company: &InsuranceCompany, number: &ContractNumber) -> i64 {
    let Some(contract) = company.contract(number) else {
        return 0;
    };
    match (contract.schedule(), contract.children()) {
        (Some(schedule), _) => schedule.balance_due().max(0),
        (None, Some(children)) => children
            .iter()
            .filter_map(|child| company.contract(child))
            .filter(|child| child.is_active())
            .filter_map(|child| child.schedule())
            .map(|schedule| schedule.balance_due().max(0))
            .sum(),
        (None, None) => 0,
    }
}

fn file_claims(company: &mut InsuranceCompany, cast: &Cast, month: u32) -> Result<(), SimulatorError> {
    match month {
        3 => {
            let affected: BTreeSet<PersonId> = [cast.father, cast.child].into_iter().collect();
            company.settle_travel_claim(&number(TRIP)?, &affected)?;
        }
        6 => {
            company.settle_vehicle_claim(&number(CAR)?, 2_500)?;
        }
        9 => {
            company.settle_vehicle_claim(&number(FLEET_VEHICLES[1])?, 15_000)?;
        }
        _ => {}
    }
    Ok(())
}

fn number(value: &str) -> Result<ContractNumber, SimulatorError> {
    Ok(ContractNumber::new(value)?)
}
