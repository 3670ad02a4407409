//! Logical time handling
//!
//! The insurance company never reads the wall clock. Its notion of "now" is
//! a caller-controlled [`LogicalClock`], and billing periods are measured in
//! calendar months using [`add_months`].

use chrono::{Months, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Timestamp out of the representable range")]
    OutOfRange,
}

/// Adds whole calendar months to a timestamp
///
/// When the target month is shorter than the source day-of-month the result
/// is clamped to the last day of the target month (Jan 31 + 1 month = Feb 28
/// or Feb 29).
pub fn add_months(timestamp: NaiveDateTime, months: u32) -> Result<NaiveDateTime, TemporalError> {
    timestamp
        .checked_add_months(Months::new(months))
        .ok_or(TemporalError::OutOfRange)
}

/// A caller-controlled clock
///
/// Every time-dependent operation reads `now()` from the clock; nothing in the
/// domain advances it implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalClock {
    now: NaiveDateTime,
}

impl LogicalClock {
    /// Creates a clock positioned at the given instant
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Returns the current logical time
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Moves the clock to an arbitrary instant (forwards or backwards)
    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    /// Moves the clock forward by whole calendar months
    pub fn advance_months(&mut self, months: u32) -> Result<NaiveDateTime, TemporalError> {
        self.now = add_months(self.now, months)?;
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(at(2024, 1, 31), 1).unwrap(), at(2024, 2, 29));
        assert_eq!(add_months(at(2023, 1, 31), 1).unwrap(), at(2023, 2, 28));
        assert_eq!(add_months(at(2024, 11, 15), 3).unwrap(), at(2025, 2, 15));
    }

    #[test]
    fn test_add_months_out_of_range() {
        let max = NaiveDateTime::MAX;
        assert_eq!(add_months(max, 1), Err(TemporalError::OutOfRange));
    }
}
