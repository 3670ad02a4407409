//! Person directory
//!
//! The directory owns every person an insurer deals with. Contracts and
//! claims refer to persons by id; payouts and contract links are applied
//! through the directory.

use std::collections::HashMap;

use core_kernel::{ContractNumber, PersonId};
use crate::error::PartyError;
use crate::person::Person;

/// In-process store of persons, keyed by id
#[derive(Debug, Default, Clone)]
pub struct PartyDirectory {
    persons: HashMap<PersonId, Person>,
    by_id_number: HashMap<String, PersonId>,
}

impl PartyDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a person
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePerson` if a person with the same identity number
    /// or the same id is already registered.
    pub fn register(&mut self, person: Person) -> Result<PersonId, PartyError> {
        if self.by_id_number.contains_key(person.id_number()) || self.persons.contains_key(&person.id()) {
            return Err(PartyError::DuplicatePerson(person.id_number().to_string()));
        }

        let id = person.id();
        self.by_id_number.insert(person.id_number().to_string(), id);
        self.persons.insert(id, person);

        tracing::debug!(person_id = %id, "Person registered");
        Ok(id)
    }

    /// Gets a person by id
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Gets a person by id, failing if unknown
    pub fn require(&self, id: &PersonId) -> Result<&Person, PartyError> {
        self.persons.get(id).ok_or_else(|| PartyError::not_found(id))
    }

    /// Looks up a person by identity number
    pub fn find_by_id_number(&self, id_number: &str) -> Option<&Person> {
        self.by_id_number.get(id_number).and_then(|id| self.persons.get(id))
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.persons.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Pays every `(person, amount)` pair, or nobody at all
    ///
    /// All payouts are checked first; the directory is only mutated when
    /// every recipient can accept its amount.
    pub fn payout_all(&mut self, payouts: &[(PersonId, i64)]) -> Result<(), PartyError> {
        let mut totals: HashMap<PersonId, i64> = HashMap::new();
        for (id, amount) in payouts {
            let person = self.require(id)?;
            let base = totals.get(id).copied().unwrap_or_else(|| person.paid_out_amount());
            if *amount <= 0 {
                return Err(PartyError::invalid(format!("payout amount must be positive, got {}", amount)));
            }
            let total = base
                .checked_add(*amount)
                .ok_or_else(|| PartyError::invalid("paid out amount overflow"))?;
            totals.insert(*id, total);
        }

        for (id, amount) in payouts {
            if let Some(person) = self.persons.get_mut(id) {
                person.payout(*amount)?;
            }
        }
        Ok(())
    }

    /// Records that a person holds a contract
    pub fn link_contract(&mut self, id: &PersonId, number: ContractNumber) -> Result<(), PartyError> {
        let person = self.persons.get_mut(id).ok_or_else(|| PartyError::not_found(id))?;
        person.add_contract(number);
        Ok(())
    }

    /// Removes a contract from a person's direct holdings
    pub fn unlink_contract(&mut self, id: &PersonId, number: &ContractNumber) -> Result<bool, PartyError> {
        let person = self.persons.get_mut(id).ok_or_else(|| PartyError::not_found(id))?;
        Ok(person.remove_contract(number))
    }
}
