use chrono::NaiveDate;

use crate::model::ForecastEntry;

/// The 3-hour forecast feed carries eight slots per day.
pub const SLOTS_PER_DAY: usize = 8;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Entries falling on `date` (UTC calendar day), in feed order.
pub fn hourly_for_date(entries: &[ForecastEntry], date: NaiveDate) -> Vec<ForecastEntry> {
    entries
        .iter()
        .filter(|e| e.time.date_naive() == date)
        .cloned()
        .collect()
}

/// One sample per day: every eighth slot starting from the first.
pub fn daily_outlook(entries: &[ForecastEntry]) -> Vec<ForecastEntry> {
    entries.iter().step_by(SLOTS_PER_DAY).cloned().collect()
}
