//! Clock implementations.

use chrono::{NaiveDate, Utc};
use lingogh_core::clock::Clock;

/// UTC system clock; the day boundary is UTC, matching the plan keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Fixed date for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_iso_form() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
        assert_eq!(clock.today_iso(), "2026-08-07");
    }
}
