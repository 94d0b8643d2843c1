use crate::ledger::Ledger;
use crate::models::{HabitChecks, TOTAL_HABITS};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub achievement_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub checked_count: usize,
    pub total_habits: usize,
    pub achievement_pct: u8,
    pub mood: u8,
}

/// Requested date has no ledger entry; callers recover by running
/// `find_or_create` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub date: NaiveDate,
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no ledger entry for {}", self.date)
    }
}

impl std::error::Error for NotFoundError {}

/// Share of the fixed habit set checked, 0-100. Rounding is half-to-even;
/// with 5 habits the raw value is always an exact multiple of 20 so ties
/// cannot occur, but the mode is fixed here for compatibility.
pub fn achievement_pct(checks: &HabitChecks) -> u8 {
    let raw = checks.checked_count() as f64 / TOTAL_HABITS as f64 * 100.0;
    raw.round_ties_even() as u8
}

/// Per-day achievement series in ledger (chronological) order.
pub fn project_series(ledger: &Ledger) -> Vec<SeriesPoint> {
    ledger
        .entries()
        .iter()
        .map(|entry| SeriesPoint {
            date: entry.date,
            achievement_pct: achievement_pct(&entry.checks),
        })
        .collect()
}

pub fn project_today(ledger: &Ledger, today: NaiveDate) -> Result<TodaySummary, NotFoundError> {
    let entry = ledger.get(today).ok_or(NotFoundError { date: today })?;
    Ok(TodaySummary {
        date: entry.date,
        checked_count: entry.checks.checked_count(),
        total_habits: TOTAL_HABITS,
        achievement_pct: achievement_pct(&entry.checks),
        mood: entry.mood,
    })
}
