//! Comprehensive tests for domain_billing

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use core_kernel::{add_months, ContractNumber};

use domain_billing::error::BillingError;
use domain_billing::frequency::PremiumPaymentFrequency;
use domain_billing::payment::{distribute_payment, PaymentHistory, PaymentInstance, PaymentTarget};
use domain_billing::schedule::PaymentSchedule;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(8, 0, 0).unwrap()
}

fn frequency_strategy() -> impl Strategy<Value = PremiumPaymentFrequency> {
    prop_oneof![
        Just(PremiumPaymentFrequency::Annual),
        Just(PremiumPaymentFrequency::SemiAnnual),
        Just(PremiumPaymentFrequency::Quarterly),
        Just(PremiumPaymentFrequency::Monthly),
    ]
}

// ============================================================================
// Frequency Tests
// ============================================================================

mod frequency_tests {
    use super::*;

    #[test]
    fn test_months() {
        assert_eq!(PremiumPaymentFrequency::Annual.months(), 12);
        assert_eq!(PremiumPaymentFrequency::SemiAnnual.months(), 6);
        assert_eq!(PremiumPaymentFrequency::Quarterly.months(), 3);
        assert_eq!(PremiumPaymentFrequency::Monthly.months(), 1);
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PremiumPaymentFrequency::Annual.periods_per_year(), 1);
        assert_eq!(PremiumPaymentFrequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(PremiumPaymentFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(PremiumPaymentFrequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&PremiumPaymentFrequency::SemiAnnual).unwrap();
        assert_eq!(json, "\"SemiAnnual\"");
    }
}

// ============================================================================
// Schedule Tests
// ============================================================================

mod schedule_tests {
    use super::*;

    #[test]
    fn test_new_schedule() {
        let schedule = PaymentSchedule::new(120, PremiumPaymentFrequency::Annual, at(2024, 1, 1), 0).unwrap();

        assert_eq!(schedule.premium(), 120);
        assert_eq!(schedule.frequency(), PremiumPaymentFrequency::Annual);
        assert_eq!(schedule.next_payment_time(), at(2024, 1, 1));
        assert_eq!(schedule.outstanding_balance(), 0);
        assert_eq!(schedule.paid_amount(), 0);
        assert_eq!(schedule.annual_premium().unwrap(), 120);
    }

    #[test]
    fn test_is_due_at_exact_time() {
        let schedule = PaymentSchedule::new(10, PremiumPaymentFrequency::Monthly, at(2024, 3, 1), 0).unwrap();
        assert!(schedule.is_due(at(2024, 3, 1)));
        assert!(!schedule.is_due(at(2024, 2, 29)));
    }

    #[test]
    fn test_catch_up_is_idempotent_for_fixed_time() {
        let mut schedule = PaymentSchedule::new(10, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), 0).unwrap();
        schedule.catch_up(at(2024, 5, 15)).unwrap();
        let snapshot = schedule.clone();

        let second = schedule.catch_up(at(2024, 5, 15)).unwrap();
        assert!(second.is_empty());
        assert_eq!(schedule, snapshot);
    }

    #[test]
    fn test_month_end_anchor_clamps() {
        let mut schedule = PaymentSchedule::new(10, PremiumPaymentFrequency::Monthly, at(2024, 1, 31), 0).unwrap();
        schedule.catch_up(at(2024, 1, 31)).unwrap();
        assert_eq!(schedule.next_payment_time(), at(2024, 2, 29));
        schedule.catch_up(at(2024, 2, 29)).unwrap();
        assert_eq!(schedule.next_payment_time(), at(2024, 3, 29));
    }

    #[test]
    fn test_record_payment_does_not_reduce_outstanding() {
        let mut schedule = PaymentSchedule::new(100, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), 0).unwrap();
        schedule.catch_up(at(2024, 1, 1)).unwrap();
        schedule.record_payment(150).unwrap();

        assert_eq!(schedule.outstanding_balance(), 100);
        assert_eq!(schedule.paid_amount(), 150);
        assert_eq!(schedule.balance_due(), -50);
    }

    #[test]
    fn test_record_non_positive_payment_fails() {
        let mut schedule = PaymentSchedule::new(100, PremiumPaymentFrequency::Monthly, at(2024, 1, 1), 0).unwrap();
        assert!(matches!(schedule.record_payment(0), Err(BillingError::InvalidAmount(_))));
        assert_eq!(schedule.paid_amount(), 0);
    }

    proptest! {
        #[test]
        fn k_periods_charge_k_premiums(
            premium in 1i64..10_000,
            frequency in frequency_strategy(),
            k in 0u32..40,
        ) {
            let anchor = at(2024, 1, 15);
            let mut schedule = PaymentSchedule::new(premium, frequency, anchor, 0).unwrap();
            schedule.catch_up(anchor).unwrap();
            let balance = schedule.outstanding_balance();
            let next = schedule.next_payment_time();

            let now = add_months(next, frequency.months() * k).unwrap();
            // just before the (k+1)-th due time
            let now = now - chrono::Duration::seconds(1);
            let summary = schedule.catch_up(now).unwrap();

            prop_assert_eq!(summary.periods, k);
            prop_assert_eq!(schedule.outstanding_balance(), balance + i64::from(k) * premium);
            prop_assert_eq!(schedule.next_payment_time(), add_months(next, frequency.months() * k).unwrap());
        }

        #[test]
        fn next_payment_is_after_now_after_catch_up(
            premium in 1i64..1_000,
            frequency in frequency_strategy(),
            days in 0i64..3_000,
        ) {
            let anchor = at(2020, 2, 29);
            let now = anchor + chrono::Duration::days(days);
            let mut schedule = PaymentSchedule::new(premium, frequency, anchor, 0).unwrap();
            schedule.catch_up(now).unwrap();

            prop_assert!(schedule.next_payment_time() > now);
        }
    }
}

// ============================================================================
// Payment Tests
// ============================================================================

mod payment_tests {
    use super::*;

    #[test]
    fn test_history_records_in_order() {
        let mut history = PaymentHistory::new();
        let number = ContractNumber::new("C-1").unwrap();

        history.record(number.clone(), PaymentInstance::new(at(2024, 1, 1), 10));
        history.record(number.clone(), PaymentInstance::new(at(2024, 2, 1), 20));

        let payments = history.for_contract(&number);
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].amount, 10);
        assert_eq!(payments[1].payment_time, at(2024, 2, 1));
        assert_eq!(history.total_for_contract(&number), 30);
    }

    #[test]
    fn test_history_unknown_contract_is_empty() {
        let history = PaymentHistory::new();
        let number = ContractNumber::new("nope").unwrap();
        assert!(history.for_contract(&number).is_empty());
        assert_eq!(history.total_for_contract(&number), 0);
    }

    #[test]
    fn test_distribution_single_target_takes_everything() {
        let allocations = distribute_payment(
            1_234,
            &[PaymentTarget { balance_due: 100, premium: 7 }],
        )
        .unwrap();
        assert_eq!(allocations, vec![1_234]);
    }

    proptest! {
        #[test]
        fn distribution_sums_to_amount(
            amount in 1i64..1_000_000,
            targets in prop::collection::vec((-500i64..500, 1i64..300), 1..6),
        ) {
            let targets: Vec<PaymentTarget> = targets
                .into_iter()
                .map(|(balance_due, premium)| PaymentTarget { balance_due, premium })
                .collect();
            let allocations = distribute_payment(amount, &targets).unwrap();

            prop_assert_eq!(allocations.iter().sum::<i64>(), amount);
            prop_assert!(allocations.iter().all(|a| *a >= 0));
        }
    }
}
