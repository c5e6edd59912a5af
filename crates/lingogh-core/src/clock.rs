//! Calendar clock trait.

use chrono::NaiveDate;

/// Source of the current UTC calendar day.
///
/// Injected so plan keys and date stamps are deterministic under test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Today in ISO 8601 date form (`YYYY-MM-DD`).
    fn today_iso(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }
}
