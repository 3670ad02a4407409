//! Insured vehicles

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::PartyError;

fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("plate_characters"))
    }
}

/// A vehicle covered by a vehicle contract
///
/// The licence plate is exactly seven upper-case letters or digits and the
/// original value is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct Vehicle {
    #[validate(length(equal = 7), custom(function = "validate_plate"))]
    license_plate: String,
    #[validate(range(min = 1))]
    original_value: i64,
}

impl Vehicle {
    /// Creates a vehicle
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed plate or a non-positive value.
    pub fn new(license_plate: impl Into<String>, original_value: i64) -> Result<Self, PartyError> {
        let vehicle = Self {
            license_plate: license_plate.into(),
            original_value,
        };
        vehicle.validate()?;
        Ok(vehicle)
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// Returns the value the vehicle had when it was insured
    pub fn original_value(&self) -> i64 {
        self.original_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_vehicle() {
        let vehicle = Vehicle::new("BA123CD", 10_000).unwrap();
        assert_eq!(vehicle.license_plate(), "BA123CD");
        assert_eq!(vehicle.original_value(), 10_000);
    }

    #[test]
    fn test_plate_rules() {
        assert!(Vehicle::new("BA123C", 10_000).is_err());
        assert!(Vehicle::new("BA123CDE", 10_000).is_err());
        assert!(Vehicle::new("ba123cd", 10_000).is_err());
        assert!(Vehicle::new("BA-123C", 10_000).is_err());
    }

    #[test]
    fn test_value_must_be_positive() {
        assert!(Vehicle::new("BA123CD", 0).is_err());
        assert!(Vehicle::new("BA123CD", -5).is_err());
    }
}
