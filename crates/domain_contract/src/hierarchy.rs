//! Contract storage and master/child hierarchy
//!
//! Every contract an insurer has ever held stays in the store, so contract
//! numbers are never reused. The top-level list keeps creation order and
//! excludes contracts attached under a master.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use core_kernel::ContractNumber;

use crate::contract::Contract;
use crate::error::ContractError;

/// Insertion-ordered contract store with master/child links
#[derive(Debug, Clone, Default)]
pub struct ContractHierarchy {
    contracts: HashMap<ContractNumber, Contract>,
    top_level: Vec<ContractNumber>,
    parents: HashMap<ContractNumber, ContractNumber>,
}

impl ContractHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the number was ever used by a stored contract
    pub fn contains(&self, number: &ContractNumber) -> bool {
        self.contracts.contains_key(number)
    }

    /// Fails if the number was ever used by a stored contract
    pub fn ensure_unused(&self, number: &ContractNumber) -> Result<(), ContractError> {
        if self.contains(number) {
            return Err(ContractError::DuplicateContract(number.to_string()));
        }
        Ok(())
    }

    /// Adds a contract at the end of the top-level list
    pub fn insert(&mut self, contract: Contract) -> Result<(), ContractError> {
        self.ensure_unused(contract.number())?;
        let number = contract.number().clone();
        self.top_level.push(number.clone());
        self.contracts.insert(number, contract);
        Ok(())
    }

    pub fn get(&self, number: &ContractNumber) -> Option<&Contract> {
        self.contracts.get(number)
    }

    pub fn get_mut(&mut self, number: &ContractNumber) -> Option<&mut Contract> {
        self.contracts.get_mut(number)
    }

    /// Looks up a contract, failing with `ContractNotFound`
    pub fn require(&self, number: &ContractNumber) -> Result<&Contract, ContractError> {
        self.get(number)
            .ok_or_else(|| ContractError::ContractNotFound(number.to_string()))
    }

    pub fn require_mut(&mut self, number: &ContractNumber) -> Result<&mut Contract, ContractError> {
        self.contracts
            .get_mut(number)
            .ok_or_else(|| ContractError::ContractNotFound(number.to_string()))
    }

    /// Returns the top-level contract numbers in creation order
    pub fn top_level_numbers(&self) -> &[ContractNumber] {
        &self.top_level
    }

    /// Iterates the top-level contracts in creation order
    pub fn top_level(&self) -> impl Iterator<Item = &Contract> + '_ {
        self.top_level.iter().filter_map(|number| self.contracts.get(number))
    }

    pub fn is_top_level(&self, number: &ContractNumber) -> bool {
        self.contains(number) && !self.parents.contains_key(number)
    }

    /// Returns the master a contract is attached to
    pub fn parent_of(&self, number: &ContractNumber) -> Option<&ContractNumber> {
        self.parents.get(number)
    }

    /// Number of contracts ever stored
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Attaches a top-level single-vehicle contract under a master
    ///
    /// Only single-vehicle contracts can be attached, so the hierarchy stays
    /// a forest of depth one and cannot contain cycles.
    ///
    /// # Errors
    ///
    /// - `ContractNotFound` if either number is unknown
    /// - `Validation` if `master` cannot hold children or `child` is not a
    ///   single-vehicle contract
    /// - `InvalidContract` if `child` is already attached or equals `master`
    pub fn attach(&mut self, master: &ContractNumber, child: &ContractNumber) -> Result<(), ContractError> {
        if master == child {
            return Err(ContractError::invalid_contract(format!(
                "contract {} cannot be attached to itself",
                master
            )));
        }
        let child_contract = self.require(child)?;
        if child_contract.vehicle().is_none() {
            return Err(ContractError::validation(format!(
                "{} contract {} cannot be attached under a master",
                child_contract.contract_type(),
                child
            )));
        }
        if let Some(parent) = self.parents.get(child) {
            return Err(ContractError::invalid_contract(format!(
                "contract {} is already attached to {}",
                child, parent
            )));
        }

        self.require_mut(master)?.push_child(child.clone())?;
        self.top_level.retain(|number| number != child);
        self.parents.insert(child.clone(), master.clone());

        debug!(master = %master, child = %child, "Contract attached under master");
        Ok(())
    }

    /// Returns the leaf contracts reachable from `number`, depth first in
    /// attachment order
    ///
    /// A leaf contract yields itself. The active flag is not consulted.
    pub fn leaves(&self, number: &ContractNumber) -> Result<Vec<ContractNumber>, ContractError> {
        let mut leaves = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![number.clone()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let contract = self.require(&current)?;
            match contract.children() {
                Some(children) => stack.extend(children.iter().rev().cloned()),
                None => leaves.push(current),
            }
        }

        Ok(leaves)
    }
}
