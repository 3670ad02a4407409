//! Premium payment frequency

use serde::{Deserialize, Serialize};

use crate::error::BillingError;

/// How often a premium is charged
///
/// Every frequency is a whole number of months dividing a year evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PremiumPaymentFrequency {
    /// Once per year
    Annual,
    /// Twice per year
    SemiAnnual,
    /// Four times per year
    Quarterly,
    /// Twelve times per year
    Monthly,
}

impl PremiumPaymentFrequency {
    /// Returns the length of one billing period in months
    pub fn months(&self) -> u32 {
        match self {
            PremiumPaymentFrequency::Annual => 12,
            PremiumPaymentFrequency::SemiAnnual => 6,
            PremiumPaymentFrequency::Quarterly => 3,
            PremiumPaymentFrequency::Monthly => 1,
        }
    }

    /// Returns the number of billing periods per year
    pub fn periods_per_year(&self) -> u32 {
        12 / self.months()
    }

    /// Calculates the yearly sum charged for a per-period premium
    pub fn annualize(&self, premium: i64) -> Result<i64, BillingError> {
        premium
            .checked_mul(i64::from(self.periods_per_year()))
            .ok_or_else(|| BillingError::Overflow(format!("annualizing premium {}", premium)))
    }

    /// Returns all frequencies, longest period first
    pub fn all() -> [PremiumPaymentFrequency; 4] {
        [
            PremiumPaymentFrequency::Annual,
            PremiumPaymentFrequency::SemiAnnual,
            PremiumPaymentFrequency::Quarterly,
            PremiumPaymentFrequency::Monthly,
        ]
    }
}
