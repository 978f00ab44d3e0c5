use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::model::aggregate::MonthlyAggregate;
use crate::model::entry::ShiftEntry;
use crate::repository::{KeyValueStore, ShiftRepository};

/// Recomputes month totals straight from the store on every call.
pub struct MonthlyAggregator<'a, S: KeyValueStore> {
    shifts: &'a ShiftRepository<S>,
}

impl<'a, S: KeyValueStore> MonthlyAggregator<'a, S> {
    pub fn new(shifts: &'a ShiftRepository<S>) -> Self {
        Self { shifts }
    }

    /// Entries sharing `anchor`'s month and year, ordered by date.
    pub fn entries_for_month(&self, anchor: NaiveDate) -> Result<Vec<ShiftEntry>> {
        self.shifts.entries_for_month(anchor.year(), anchor.month())
    }

    pub fn recalculate(&self, anchor: NaiveDate) -> Result<MonthlyAggregate> {
        Ok(self.month(anchor)?.0)
    }

    /// The month's total together with the entries it was summed from.
    pub fn month(&self, anchor: NaiveDate) -> Result<(MonthlyAggregate, Vec<ShiftEntry>)> {
        let entries = self.entries_for_month(anchor)?;
        let aggregate = MonthlyAggregate::from_entries(anchor, &entries);
        tracing::debug!(
            year = aggregate.year,
            month = aggregate.month,
            entries = entries.len(),
            total_hours = aggregate.total_hours,
            "recalculated month"
        );
        Ok((aggregate, entries))
    }
}
