use crate::models::{HabitChecks, LedgerEntry};
use chrono::{Duration, NaiveDate};

/// Retention window: one calendar week of entries.
pub const WINDOW: usize = 7;

/// Demo fixture for the six days before today: which habits are checked
/// (definition order) and the mood for that day.
const DEMO_PATTERNS: [([bool; 5], u8); 6] = [
    ([true, true, false, false, true], 6),
    ([true, false, true, false, true], 7),
    ([true, true, true, false, false], 5),
    ([false, true, true, true, false], 8),
    ([true, true, true, true, false], 9),
    ([false, false, true, true, true], 7),
];

/// Rolling window of daily habit/mood records, ordered by date ascending.
/// At most one entry per date; after any append only the last `WINDOW`
/// records are kept (positional eviction from the front).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Six fixed demo entries for the days `today-6 ..= today-1`, plus an
    /// all-unchecked mood-6 entry for `today`. Deterministic for a given
    /// `today`; gives the chart a non-empty initial shape.
    pub fn seed_demo_history(today: NaiveDate) -> Self {
        let mut entries = Vec::with_capacity(WINDOW);
        for (offset, (pattern, mood)) in (1..=6).rev().zip(DEMO_PATTERNS) {
            let [wake, water, study, workout, sleep] = pattern;
            entries.push(LedgerEntry {
                date: today - Duration::days(offset),
                mood,
                checks: HabitChecks { wake, water, study, workout, sleep },
            });
        }
        entries.push(LedgerEntry::blank(today));
        Self { entries }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }

    /// Returns the entry for `date`, creating an all-unchecked default-mood
    /// entry when absent. Lookup precedes creation, so calling this twice
    /// with the same date never duplicates.
    pub fn find_or_create(&mut self, date: NaiveDate) -> &LedgerEntry {
        let index = match self.entries.iter().position(|entry| entry.date == date) {
            Some(index) => index,
            None => {
                self.entries.push(LedgerEntry::blank(date));
                self.trim();
                // trim drains from the front only, so the appended entry stays last
                self.entries.len() - 1
            }
        };
        &self.entries[index]
    }

    /// Replace the entry sharing `entry.date` in place, or append when the
    /// date is new; then keep only the last `WINDOW` records. Idempotent.
    pub fn upsert(&mut self, entry: LedgerEntry) {
        match self.entries.iter().position(|existing| existing.date == entry.date) {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
        self.trim();
    }

    fn trim(&mut self) {
        if self.entries.len() > WINDOW {
            let excess = self.entries.len() - WINDOW;
            self.entries.drain(..excess);
        }
    }
}
