//! Person entity
//!
//! A person is identified by a national identity number whose length decides
//! the legal form:
//!
//! - 6 or 8 digits: company registration number, a **legal** person
//! - 9 or 10 digits: birth number, a **natural** person
//!
//! Birth numbers encode the date of birth as `YYMMDD` (women have 50 added to
//! the month). Nine-digit numbers were issued before 1954; ten-digit numbers
//! must additionally be divisible by 11.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::{ContractNumber, PersonId};
use crate::error::PartyError;

/// Legal form of a person, derived from the identity number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalForm {
    /// A natural person (birth number)
    Natural,
    /// A legal entity (company registration number)
    Legal,
}

impl LegalForm {
    /// Derives the legal form from an identity number
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdNumber` if the number has an unsupported length or
    /// is not a valid birth number.
    pub fn from_id_number(id_number: &str) -> Result<Self, PartyError> {
        match id_number.len() {
            6 | 8 => Ok(LegalForm::Legal),
            9 | 10 => {
                birth_date(id_number)
                    .map(|_| LegalForm::Natural)
                    .ok_or_else(|| PartyError::InvalidIdNumber(id_number.to_string()))
            }
            _ => Err(PartyError::InvalidIdNumber(id_number.to_string())),
        }
    }
}

/// Decodes the birth date of a 9 or 10 digit birth number
fn birth_date(id_number: &str) -> Option<NaiveDate> {
    if !id_number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let yy: i32 = id_number.get(0..2)?.parse().ok()?;
    let mm: u32 = id_number.get(2..4)?.parse().ok()?;
    let dd: u32 = id_number.get(4..6)?.parse().ok()?;

    let year = match id_number.len() {
        9 if yy < 54 => 1900 + yy,
        9 => return None,
        10 => {
            let number: u64 = id_number.parse().ok()?;
            if number % 11 != 0 {
                return None;
            }
            if yy >= 54 { 1900 + yy } else { 2000 + yy }
        }
        _ => return None,
    };

    let month = if mm > 50 { mm - 50 } else { mm };
    NaiveDate::from_ymd_opt(year, month, dd)
}

fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits_only"))
    }
}

/// A natural or legal person taking part in contracts
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Person {
    /// Unique identifier
    id: PersonId,
    /// National identity number
    #[validate(length(min = 6, max = 10), custom(function = "validate_digits"))]
    id_number: String,
    /// Legal form derived from the identity number
    legal_form: LegalForm,
    /// Display name
    #[validate(length(min = 1, max = 200))]
    name: Option<String>,
    /// Total amount paid out to this person by claims
    paid_out_amount: i64,
    /// Contracts this person holds directly as policy holder
    contracts: Vec<ContractNumber>,
}

impl Person {
    /// Creates a person from an identity number
    ///
    /// # Errors
    ///
    /// Returns a validation error if the number is not made of 6 to 10
    /// digits, or `InvalidIdNumber` if it is not a valid birth number or
    /// company registration number.
    pub fn new(id_number: impl Into<String>) -> Result<Self, PartyError> {
        let id_number = id_number.into();
        let person = Self {
            id: PersonId::new_v7(),
            legal_form: LegalForm::Legal,
            id_number,
            name: None,
            paid_out_amount: 0,
            contracts: Vec::new(),
        };
        person.validate()?;

        let legal_form = LegalForm::from_id_number(&person.id_number)?;
        Ok(Self { legal_form, ..person })
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, PartyError> {
        self.name = Some(name.into());
        self.validate()?;
        Ok(self)
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn id_number(&self) -> &str {
        &self.id_number
    }

    pub fn legal_form(&self) -> LegalForm {
        self.legal_form
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the total amount paid out to this person
    pub fn paid_out_amount(&self) -> i64 {
        self.paid_out_amount
    }

    /// Returns the contracts held directly, in the order they were linked
    pub fn contracts(&self) -> &[ContractNumber] {
        &self.contracts
    }

    /// Returns true if the person directly holds the given contract
    pub fn holds(&self, number: &ContractNumber) -> bool {
        self.contracts.contains(number)
    }

    /// Checks that a payout can be accepted without applying it
    pub fn check_payout(&self, amount: i64) -> Result<i64, PartyError> {
        if amount <= 0 {
            return Err(PartyError::invalid(format!("payout amount must be positive, got {}", amount)));
        }
        self.paid_out_amount
            .checked_add(amount)
            .ok_or_else(|| PartyError::invalid("paid out amount overflow"))
    }

    /// Accepts a claim payout
    pub fn payout(&mut self, amount: i64) -> Result<(), PartyError> {
        self.paid_out_amount = self.check_payout(amount)?;
        Ok(())
    }

    /// Links a contract held by this person
    ///
    /// Linking a contract twice has no effect.
    pub fn add_contract(&mut self, number: ContractNumber) {
        if !self.holds(&number) {
            self.contracts.push(number);
        }
    }

    /// Unlinks a contract, returning whether it was held
    pub fn remove_contract(&mut self, number: &ContractNumber) -> bool {
        let before = self.contracts.len();
        self.contracts.retain(|held| held != number);
        self.contracts.len() != before
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}
