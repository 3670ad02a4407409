//! Tests for domain_claims

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{ContractNumber, ErrorKind, InsurerId, PersonId};
use domain_billing::{PaymentSchedule, PremiumPaymentFrequency};
use domain_claims::{ClaimError, ClaimProcessor, ClaimType};
use domain_contract::Contract;
use domain_party::{PartyDirectory, Person, Vehicle};

// ============================================================================
// Fixtures
// ============================================================================

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap()
}

fn schedule() -> PaymentSchedule {
    PaymentSchedule::new(100, PremiumPaymentFrequency::Annual, now(), 0).unwrap()
}

/// Registers `count` legal persons with distinct six-digit numbers
fn register_persons(directory: &mut PartyDirectory, count: usize) -> Vec<PersonId> {
    (0..count)
        .map(|i| {
            let person = Person::new(format!("{:06}", 100_000 + i)).unwrap();
            directory.register(person).unwrap()
        })
        .collect()
}

fn travel_contract(holder: PersonId, insured: &[PersonId], coverage: i64) -> Contract {
    Contract::travel(
        ContractNumber::new("T-1").unwrap(),
        InsurerId::new(),
        holder,
        schedule(),
        coverage,
        insured.iter().copied().collect(),
    )
    .unwrap()
}

fn vehicle_contract(holder: PersonId, beneficiary: Option<PersonId>, original_value: i64) -> Contract {
    Contract::single_vehicle(
        ContractNumber::new("V-1").unwrap(),
        InsurerId::new(),
        beneficiary,
        holder,
        schedule(),
        original_value / 2,
        Vehicle::new("BA123CD", original_value).unwrap(),
    )
    .unwrap()
}

// ============================================================================
// Travel Claim Tests
// ============================================================================

mod travel_claim_tests {
    use super::*;

    #[test]
    fn test_coverage_split_between_affected_persons() {
        let mut directory = PartyDirectory::new();
        let persons = register_persons(&mut directory, 6);
        let holder = persons[0];
        let insured = &persons[1..6];
        let mut contract = travel_contract(holder, insured, 100);
        let affected: BTreeSet<PersonId> = insured[..4].iter().copied().collect();

        let settlement = ClaimProcessor::default()
            .settle_travel_claim(&mut contract, &mut directory, &affected, now())
            .unwrap();

        assert_eq!(settlement.claim_type, ClaimType::Travel);
        assert_eq!(settlement.payouts.len(), 4);
        assert_eq!(settlement.total_paid(), 100);
        assert!(settlement.contract_deactivated);
        assert!(!contract.is_active());
        for id in &affected {
            assert_eq!(directory.get(id).unwrap().paid_out_amount(), 25);
        }
        assert_eq!(directory.get(&insured[4]).unwrap().paid_out_amount(), 0);
    }

    #[test]
    fn test_uninsured_person_rejected_without_payout() {
        let mut directory = PartyDirectory::new();
        let persons = register_persons(&mut directory, 7);
        let insured = &persons[1..6];
        let mut contract = travel_contract(persons[0], insured, 100);
        let mut affected: BTreeSet<PersonId> = insured[..4].iter().copied().collect();
        affected.insert(persons[6]);

        let result =
            ClaimProcessor::default().settle_travel_claim(&mut contract, &mut directory, &affected, now());

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(contract.is_active());
        assert!(persons.iter().all(|id| directory.get(id).unwrap().paid_out_amount() == 0));
    }

    #[test]
    fn test_empty_affected_set_rejected() {
        let mut directory = PartyDirectory::new();
        let persons = register_persons(&mut directory, 2);
        let contract = travel_contract(persons[0], &persons[1..], 10);

        let result = ClaimProcessor::default().assess_travel_claim(&contract, &BTreeSet::new(), now());
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }

    #[test]
    fn test_inactive_contract_rejected() {
        let mut directory = PartyDirectory::new();
        let persons = register_persons(&mut directory, 2);
        let mut contract = travel_contract(persons[0], &persons[1..], 10);
        contract.deactivate();
        let affected: BTreeSet<PersonId> = persons[1..].iter().copied().collect();

        let result =
            ClaimProcessor::default().settle_travel_claim(&mut contract, &mut directory, &affected, now());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::DomainState);
        assert_eq!(directory.get(&persons[1]).unwrap().paid_out_amount(), 0);
    }

    #[test]
    fn test_vehicle_contract_is_not_a_travel_contract() {
        let contract = vehicle_contract(PersonId::new(), None, 10_000);
        let affected: BTreeSet<PersonId> = [PersonId::new()].into_iter().collect();

        let result = ClaimProcessor::default().assess_travel_claim(&contract, &affected, now());
        assert!(matches!(result, Err(ClaimError::Validation(_))));
    }
}

// ============================================================================
// Vehicle Claim Tests
// ============================================================================

mod vehicle_claim_tests {
    use super::*;

    #[test]
    fn test_total_loss_at_seventy_percent() {
        let mut directory = PartyDirectory::new();
        let holder = register_persons(&mut directory, 1)[0];
        let mut contract = vehicle_contract(holder, None, 10_000);

        let settlement = ClaimProcessor::default()
            .settle_vehicle_claim(&mut contract, &mut directory, 7_000, now())
            .unwrap();

        assert!(settlement.contract_deactivated);
        assert!(!contract.is_active());
        assert_eq!(directory.get(&holder).unwrap().paid_out_amount(), 5_000);
    }

    #[test]
    fn test_below_total_loss_keeps_contract_active() {
        let mut directory = PartyDirectory::new();
        let holder = register_persons(&mut directory, 1)[0];
        let mut contract = vehicle_contract(holder, None, 10_000);
        let processor = ClaimProcessor::default();

        processor.settle_vehicle_claim(&mut contract, &mut directory, 6_999, now()).unwrap();
        assert!(contract.is_active());

        // Still claimable
        processor.settle_vehicle_claim(&mut contract, &mut directory, 100, now()).unwrap();
        assert_eq!(directory.get(&holder).unwrap().paid_out_amount(), 10_000);
    }

    #[test]
    fn test_payout_goes_to_beneficiary() {
        let mut directory = PartyDirectory::new();
        let persons = register_persons(&mut directory, 2);
        let mut contract = vehicle_contract(persons[0], Some(persons[1]), 10_000);

        let settlement = ClaimProcessor::default()
            .settle_vehicle_claim(&mut contract, &mut directory, 1_000, now())
            .unwrap();

        assert_eq!(settlement.payouts[0].payee, persons[1]);
        assert_eq!(settlement.expected_damages, Some(1_000));
        assert_eq!(directory.get(&persons[0]).unwrap().paid_out_amount(), 0);
        assert_eq!(directory.get(&persons[1]).unwrap().paid_out_amount(), 5_000);
    }

    #[test]
    fn test_non_positive_damages_rejected() {
        let contract = vehicle_contract(PersonId::new(), None, 10_000);
        let processor = ClaimProcessor::default();

        assert!(matches!(
            processor.assess_vehicle_claim(&contract, 0, now()),
            Err(ClaimError::Validation(_))
        ));
        assert!(processor.assess_vehicle_claim(&contract, -5, now()).is_err());
    }

    #[test]
    fn test_unregistered_payee_leaves_contract_untouched() {
        let mut directory = PartyDirectory::new();
        let mut contract = vehicle_contract(PersonId::new(), None, 10_000);

        let result =
            ClaimProcessor::default().settle_vehicle_claim(&mut contract, &mut directory, 9_000, now());

        assert_eq!(result.unwrap_err().kind(), ErrorKind::DomainState);
        assert!(contract.is_active());
    }

    #[test]
    fn test_configured_ratio() {
        let contract = vehicle_contract(PersonId::new(), None, 10_000);
        let processor = ClaimProcessor::new(dec!(0.9));

        let settlement = processor.assess_vehicle_claim(&contract, 8_000, now()).unwrap();
        assert!(!settlement.contract_deactivated);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_travel_shares_never_exceed_coverage(coverage in 0i64..1_000_000, affected in 1usize..20) {
        let mut directory = PartyDirectory::new();
        let persons = register_persons(&mut directory, affected + 1);
        let contract = travel_contract(persons[0], &persons[1..], coverage);
        let set: BTreeSet<PersonId> = persons[1..].iter().copied().collect();

        let settlement = ClaimProcessor::default().assess_travel_claim(&contract, &set, now()).unwrap();

        prop_assert!(settlement.total_paid() <= coverage);
        prop_assert!(coverage - settlement.total_paid() < affected as i64);
        prop_assert!(settlement.payouts.iter().all(|p| p.amount == coverage / affected as i64));
    }

    #[test]
    fn prop_total_loss_matches_integer_rule(damages in 1i64..100_000, value in 1i64..100_000) {
        // damages >= 0.7 * value  <=>  10 * damages >= 7 * value
        let expected = 10 * damages >= 7 * value;
        prop_assert_eq!(ClaimProcessor::default().is_total_loss(damages, value), expected);
    }
}
