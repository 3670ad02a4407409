//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for persons, vehicles, and logical
//! timestamps. Every value is fixed so tests stay predictable.

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::{add_months, ContractNumber};
use domain_party::{Person, Vehicle};

/// Fixture for logical clock values
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard company start (Jan 1, 2024 00:00)
    pub fn start() -> NaiveDateTime {
        Self::at(2024, 1, 1)
    }

    /// Midnight of the given day
    pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    /// `months` calendar months after the standard start
    pub fn months_after_start(months: u32) -> NaiveDateTime {
        add_months(Self::start(), months).unwrap()
    }

    /// One second before `months` calendar months after the standard start
    pub fn just_before(months: u32) -> NaiveDateTime {
        Self::months_after_start(months) - chrono::Duration::seconds(1)
    }
}

/// Fixture for persons with valid identity numbers
pub struct PersonFixtures;

impl PersonFixtures {
    /// Natural person born 1980-01-01 (male)
    pub fn natural_male() -> Person {
        Person::new("8001011238").unwrap()
    }

    /// Natural person born 1980-01-01 (female, month + 50)
    pub fn natural_female() -> Person {
        Person::new("8051011232").unwrap()
    }

    /// Natural person born 2004-12-31
    pub fn natural_young() -> Person {
        Person::new("0412310008").unwrap()
    }

    /// Natural person with a nine-digit birth number (born 1945)
    pub fn natural_nine_digit() -> Person {
        Person::new("455101123").unwrap()
    }

    /// Legal person with a six-digit registration number
    pub fn company() -> Person {
        Person::new("123456").unwrap()
    }

    /// Legal person with an eight-digit registration number
    pub fn company_long() -> Person {
        Person::new("12345678").unwrap()
    }

    /// The `index`-th of a family of distinct legal persons
    pub fn numbered(index: u32) -> Person {
        Person::new(format!("{:06}", 200_000 + index)).unwrap()
    }
}

/// Fixture for insured vehicles
pub struct VehicleFixtures;

impl VehicleFixtures {
    /// A vehicle worth 10 000
    pub fn standard() -> Vehicle {
        Vehicle::new("BA123CD", 10_000).unwrap()
    }

    /// A vehicle of the given value
    pub fn worth(original_value: i64) -> Vehicle {
        Vehicle::new("KE987AB", original_value).unwrap()
    }

    /// A vehicle with a plate derived from `index`
    pub fn numbered(index: u32, original_value: i64) -> Vehicle {
        Vehicle::new(format!("ZA{:05}", index % 100_000), original_value).unwrap()
    }
}

/// Contract number from a literal
pub fn contract_number(value: &str) -> ContractNumber {
    ContractNumber::new(value).unwrap()
}
