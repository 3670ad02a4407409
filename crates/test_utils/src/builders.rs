//! Test Data Builders
//!
//! Provides builders for insurance companies pre-populated with registered
//! persons, so tests only spell out the contracts they care about.

use chrono::NaiveDateTime;
use core_kernel::PersonId;
use domain_company::{InsuranceCompany, UnderwritingRules};
use domain_party::Person;

use crate::fixtures::{PersonFixtures, TemporalFixtures};
use crate::generators::named_person;

/// A company together with the ids of its registered persons
pub struct TestCompany {
    pub company: InsuranceCompany,
    pub persons: Vec<PersonId>,
}

impl TestCompany {
    /// The first registered person
    pub fn holder(&self) -> PersonId {
        self.persons[0]
    }

    /// The `index`-th registered person
    pub fn person(&self, index: usize) -> PersonId {
        self.persons[index]
    }
}

/// Builder for companies used in tests
pub struct TestCompanyBuilder {
    start: NaiveDateTime,
    rules: UnderwritingRules,
    persons: Vec<Person>,
}

impl Default for TestCompanyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCompanyBuilder {
    /// Creates a builder starting at the standard start time with no persons
    pub fn new() -> Self {
        Self {
            start: TemporalFixtures::start(),
            rules: UnderwritingRules::default(),
            persons: Vec::new(),
        }
    }

    /// Sets the initial logical time
    pub fn starting_at(mut self, start: NaiveDateTime) -> Self {
        self.start = start;
        self
    }

    /// Sets the underwriting rules
    pub fn with_rules(mut self, rules: UnderwritingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Adds a person to register
    pub fn with_person(mut self, person: Person) -> Self {
        self.persons.push(person);
        self
    }

    /// Adds `count` distinct legal persons with random names
    pub fn with_persons(mut self, count: u32) -> Self {
        let offset = self.persons.len() as u32;
        self.persons.extend(
            (0..count).map(|i| named_person(PersonFixtures::numbered(offset + i).id_number())),
        );
        self
    }

    /// Builds the company and registers every person in order
    pub fn build(self) -> TestCompany {
        let mut company = InsuranceCompany::new(self.start)
            .with_rules(self.rules)
            .unwrap();
        let persons = self
            .persons
            .into_iter()
            .map(|person| company.register_person(person).unwrap())
            .collect();
        TestCompany { company, persons }
    }
}
