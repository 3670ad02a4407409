//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use domain_billing::PremiumPaymentFrequency;
use domain_party::{Person, Vehicle};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

/// Strategy for generating any payment frequency
pub fn frequency_strategy() -> impl Strategy<Value = PremiumPaymentFrequency> {
    prop_oneof![
        Just(PremiumPaymentFrequency::Annual),
        Just(PremiumPaymentFrequency::SemiAnnual),
        Just(PremiumPaymentFrequency::Quarterly),
        Just(PremiumPaymentFrequency::Monthly),
    ]
}

/// Strategy for generating valid per-period premiums
pub fn premium_strategy() -> impl Strategy<Value = i64> {
    1i64..100_000i64
}

/// Strategy for generating vehicle original values
pub fn vehicle_value_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for generating valid licence plates
pub fn license_plate_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{7}"
}

/// Strategy for generating valid vehicles
pub fn vehicle_strategy() -> impl Strategy<Value = Vehicle> {
    (license_plate_strategy(), vehicle_value_strategy())
        .prop_map(|(plate, value)| Vehicle::new(plate, value).unwrap())
}

/// Strategy for generating legal persons with six-digit numbers
///
/// Numbers starting with `2000` are left to `PersonFixtures::numbered`.
pub fn legal_person_strategy() -> impl Strategy<Value = Person> {
    "[0-9]{6}"
        .prop_filter("reserved for numbered fixtures", |number: &String| !number.starts_with("2000"))
        .prop_map(|number| Person::new(number).unwrap())
}

/// Generates a random full name
pub fn random_name() -> String {
    Name().fake()
}

/// Creates a legal person with a random name
pub fn named_person(id_number: &str) -> Person {
    Person::new(id_number).unwrap().with_name(random_name()).unwrap()
}
