//! Unit tests for the logical clock and month arithmetic

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::temporal::{add_months, LogicalClock, TemporalError};
use proptest::prelude::*;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(9, 30, 0).unwrap()
}

mod month_arithmetic {
    use super::*;

    #[test]
    fn test_add_zero_months_is_identity() {
        assert_eq!(add_months(at(2024, 5, 17), 0).unwrap(), at(2024, 5, 17));
    }

    #[test]
    fn test_add_twelve_months_is_one_year() {
        assert_eq!(add_months(at(2024, 3, 1), 12).unwrap(), at(2025, 3, 1));
    }

    #[test]
    fn test_time_of_day_is_preserved() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap().and_hms_opt(23, 59, 59).unwrap();
        let next = add_months(start, 1).unwrap();
        assert_eq!(next.time(), start.time());
    }

    #[test]
    fn test_leap_day_clamps_in_common_year() {
        assert_eq!(add_months(at(2024, 2, 29), 12).unwrap(), at(2025, 2, 28));
    }
}

mod clock {
    use super::*;

    #[test]
    fn test_new_clock_reports_start() {
        let clock = LogicalClock::new(at(2024, 1, 1));
        assert_eq!(clock.now(), at(2024, 1, 1));
    }

    #[test]
    fn test_advance_months() {
        let mut clock = LogicalClock::new(at(2024, 1, 1));
        assert_eq!(clock.advance_months(6).unwrap(), at(2024, 7, 1));
        assert_eq!(clock.now(), at(2024, 7, 1));
    }

    #[test]
    fn test_set_can_move_backwards() {
        let mut clock = LogicalClock::new(at(2024, 6, 1));
        clock.set(at(2023, 6, 1));
        assert_eq!(clock.now(), at(2023, 6, 1));
    }

    #[test]
    fn test_advance_past_range_fails_without_moving() {
        let mut clock = LogicalClock::new(NaiveDateTime::MAX);
        assert_eq!(clock.advance_months(1), Err(TemporalError::OutOfRange));
        assert_eq!(clock.now(), NaiveDateTime::MAX);
    }
}

proptest! {
    #[test]
    fn add_months_is_monotonic(day in 1u32..=28, month in 1u32..=12, n in 1u32..240) {
        let start = at(2020, month, day);
        let next = add_months(start, n).unwrap();
        prop_assert!(next > start);
    }

    #[test]
    fn add_months_composes_for_safe_days(day in 1u32..=28, a in 0u32..60, b in 0u32..60) {
        let start = at(2021, 4, day);
        let stepwise = add_months(add_months(start, a).unwrap(), b).unwrap();
        prop_assert_eq!(stepwise, add_months(start, a + b).unwrap());
    }
}
