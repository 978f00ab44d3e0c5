use chrono::{Datelike, NaiveDate};

use crate::model::entry::ShiftEntry;
use crate::model::rate::HourlyRate;

/// Hours for one calendar month. Derived from stored entries, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyAggregate {
    pub year: i32,
    pub month: u32,
    pub total_hours: u32,
}

impl MonthlyAggregate {
    pub fn empty(anchor: NaiveDate) -> Self {
        Self {
            year: anchor.year(),
            month: anchor.month(),
            total_hours: 0,
        }
    }

    pub fn from_entries<'a>(anchor: NaiveDate, entries: impl IntoIterator<Item = &'a ShiftEntry>) -> Self {
        let mut aggregate = Self::empty(anchor);
        aggregate.total_hours = entries
            .into_iter()
            .filter(|e| e.is_in_month(aggregate.year, aggregate.month))
            .map(|e| e.hours_worked)
            .sum();
        aggregate
    }

    pub fn pay(&self, rate: HourlyRate) -> u64 {
        rate.pay_for(self.total_hours)
    }
}
