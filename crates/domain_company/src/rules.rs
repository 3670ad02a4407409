//! Underwriting rules
//!
//! The pricing and claim thresholds the company applies. Defaults match the
//! published tariff; every value can be overridden from `INSURANCE_*`
//! environment variables, e.g. `INSURANCE_TOTAL_LOSS_RATIO=0.75`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CompanyError;

/// Thresholds used when issuing contracts and settling claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingRules {
    /// Minimum yearly premium as a share of the vehicle's original value
    pub vehicle_min_annual_rate: Decimal,
    /// Coverage as a share of the vehicle's original value
    pub vehicle_coverage_ratio: Decimal,
    /// Minimum yearly premium per insured traveller
    pub travel_min_annual_premium_per_person: i64,
    /// Coverage per insured traveller
    pub travel_coverage_per_person: i64,
    /// Damage share of the original value that counts as a total loss
    pub total_loss_ratio: Decimal,
}

impl Default for UnderwritingRules {
    fn default() -> Self {
        Self {
            vehicle_min_annual_rate: dec!(0.02),
            vehicle_coverage_ratio: dec!(0.5),
            travel_min_annual_premium_per_person: 5,
            travel_coverage_per_person: 10,
            total_loss_ratio: dec!(0.7),
        }
    }
}

impl UnderwritingRules {
    /// Loads rules from `INSURANCE_*` environment variables
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, CompanyError> {
        let rules: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("INSURANCE"))
            .build()?
            .try_deserialize()?;
        rules.validate()?;
        Ok(rules)
    }

    /// Checks that every ratio lies in `[0, 1]` and amounts are not negative
    pub fn validate(&self) -> Result<(), CompanyError> {
        let ratios = [
            ("vehicle_min_annual_rate", self.vehicle_min_annual_rate),
            ("vehicle_coverage_ratio", self.vehicle_coverage_ratio),
            ("total_loss_ratio", self.total_loss_ratio),
        ];
        for (name, value) in ratios {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(CompanyError::configuration(format!(
                    "{} must lie between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        if self.travel_min_annual_premium_per_person < 0 || self.travel_coverage_per_person < 0 {
            return Err(CompanyError::configuration("travel amounts must not be negative"));
        }
        Ok(())
    }

    /// Returns true if a yearly premium meets the vehicle minimum
    ///
    /// Exact: at rate 0.02 a vehicle worth 10 000 needs at least 200.
    pub fn meets_vehicle_minimum(&self, annual_premium: i64, original_value: i64) -> bool {
        Decimal::from(annual_premium) >= self.vehicle_min_annual_rate * Decimal::from(original_value)
    }

    /// Coverage of a vehicle contract, rounded down to whole units
    pub fn vehicle_coverage(&self, original_value: i64) -> Result<i64, CompanyError> {
        (self.vehicle_coverage_ratio * Decimal::from(original_value))
            .floor()
            .to_i64()
            .ok_or_else(|| CompanyError::validation(format!("coverage for value {} is out of range", original_value)))
    }

    /// Minimum yearly premium of a travel contract
    pub fn travel_minimum(&self, persons: usize) -> Result<i64, CompanyError> {
        Self::per_person(self.travel_min_annual_premium_per_person, persons)
    }

    /// Coverage of a travel contract
    pub fn travel_coverage(&self, persons: usize) -> Result<i64, CompanyError> {
        Self::per_person(self.travel_coverage_per_person, persons)
    }

    fn per_person(amount: i64, persons: usize) -> Result<i64, CompanyError> {
        i64::try_from(persons)
            .ok()
            .and_then(|count| amount.checked_mul(count))
            .ok_or_else(|| CompanyError::validation(format!("too many insured persons: {}", persons)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = UnderwritingRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.vehicle_coverage(10_001).unwrap(), 5_000);
        assert_eq!(rules.travel_minimum(4).unwrap(), 20);
        assert_eq!(rules.travel_coverage(5).unwrap(), 50);
    }

    #[test]
    fn test_vehicle_minimum_boundary() {
        let rules = UnderwritingRules::default();
        assert!(rules.meets_vehicle_minimum(200, 10_000));
        assert!(!rules.meets_vehicle_minimum(199, 10_000));
        // 0.02 * 1234 = 24.68
        assert!(!rules.meets_vehicle_minimum(24, 1_234));
        assert!(rules.meets_vehicle_minimum(25, 1_234));
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let rules = UnderwritingRules {
            total_loss_ratio: dec!(1.5),
            ..UnderwritingRules::default()
        };
        assert!(matches!(rules.validate(), Err(CompanyError::Configuration(_))));
    }
}
