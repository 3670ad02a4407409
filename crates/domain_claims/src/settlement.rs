//! Claim settlement records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::{ContractNumber, PersonId, SettlementId};

/// Kind of claim that was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimType {
    Travel,
    Vehicle,
}

/// Amount paid to one person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub payee: PersonId,
    pub amount: i64,
}

/// Outcome of a settled claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSettlement {
    /// Unique identifier
    pub id: SettlementId,
    /// Contract the claim was made against
    pub contract_number: ContractNumber,
    pub claim_type: ClaimType,
    /// Reported damages, for vehicle claims
    pub expected_damages: Option<i64>,
    /// Payouts in payment order; zero amounts are omitted
    pub payouts: Vec<Payout>,
    /// Whether settling the claim ended the contract
    pub contract_deactivated: bool,
    /// Logical time of settlement
    pub settled_at: NaiveDateTime,
}

impl ClaimSettlement {
    /// Sum of all payouts
    pub fn total_paid(&self) -> i64 {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    /// Returns the payouts as `(payee, amount)` pairs
    pub fn payout_pairs(&self) -> Vec<(PersonId, i64)> {
        self.payouts.iter().map(|p| (p.payee, p.amount)).collect()
    }
}
