//! Custom Test Assertions
//!
//! Provides assertion helpers for domain types that give more meaningful
//! failure messages than standard assertions.

use core_kernel::ErrorKind;
use domain_company::{CompanyError, InsuranceCompany};

use crate::fixtures::contract_number;

/// Asserts that a result failed with a validation error
pub fn assert_validation_error<T: std::fmt::Debug>(result: &Result<T, CompanyError>) {
    assert_error_kind(result, ErrorKind::Validation);
}

/// Asserts that a result failed with a domain-state error
pub fn assert_domain_state_error<T: std::fmt::Debug>(result: &Result<T, CompanyError>) {
    assert_error_kind(result, ErrorKind::DomainState);
}

fn assert_error_kind<T: std::fmt::Debug>(result: &Result<T, CompanyError>, expected: ErrorKind) {
    match result {
        Ok(value) => panic!("Expected {:?} error, got Ok({:?})", expected, value),
        Err(err) => assert_eq!(
            err.kind(),
            expected,
            "Expected {:?} error, got {:?}: {}",
            expected,
            err.kind(),
            err
        ),
    }
}

/// Asserts the outstanding balance of a leaf contract
pub fn assert_outstanding(company: &InsuranceCompany, number: &str, expected: i64) {
    let contract = company
        .contract(&contract_number(number))
        .unwrap_or_else(|| panic!("Contract {} not found", number));
    let schedule = contract
        .schedule()
        .unwrap_or_else(|| panic!("Contract {} has no payment schedule", number));
    assert_eq!(
        schedule.outstanding_balance(),
        expected,
        "Outstanding balance of {}: actual={}, expected={}",
        number,
        schedule.outstanding_balance(),
        expected
    );
}

/// Asserts the top-level contracts and their order
pub fn assert_top_level(company: &InsuranceCompany, expected: &[&str]) {
    let actual: Vec<&str> = company.contracts().map(|c| c.number().as_str()).collect();
    assert_eq!(actual, expected, "Top-level contracts differ");
}

/// Asserts the total paid out to a registered person
pub fn assert_paid_out(company: &InsuranceCompany, person: &core_kernel::PersonId, expected: i64) {
    let actual = company
        .person(person)
        .unwrap_or_else(|| panic!("Person {} not registered", person))
        .paid_out_amount();
    assert_eq!(actual, expected, "Paid out amount of {}: actual={}, expected={}", person, actual, expected);
}
