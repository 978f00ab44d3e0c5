//! Month settlement. Clearing a month is only reachable through
//! [`PendingSettlement::confirm`], so every caller has to ask first.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::repository::{KeyValueStore, ShiftRepository};
use crate::time::month_label;

/// A settlement that has been asked for but not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a settlement does nothing until it is confirmed"]
pub struct PendingSettlement {
    anchor: NaiveDate,
}

/// What a confirmed settlement removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub year: i32,
    pub month: u32,
    pub removed: usize,
}

pub fn request_settlement(anchor: NaiveDate) -> PendingSettlement {
    PendingSettlement { anchor }
}

impl PendingSettlement {
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// "January 2025"
    pub fn label(&self) -> String {
        month_label(self.anchor)
    }

    /// Deletes every entry in the anchor's month. Irreversible.
    pub fn confirm<S: KeyValueStore>(self, shifts: &ShiftRepository<S>) -> Result<SettlementReceipt> {
        let (year, month) = (self.anchor.year(), self.anchor.month());
        let removed = shifts.delete_month(year, month)?;
        tracing::info!(year, month, removed, "settled month");
        Ok(SettlementReceipt {
            year,
            month,
            removed,
        })
    }

    pub fn cancel(self) {
        tracing::debug!(anchor = %self.anchor, "settlement cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::ShiftEntry;
    use crate::repository::MemoryStore;
    use crate::service::aggregator::MonthlyAggregator;
    use crate::time::ClockTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> ShiftRepository<MemoryStore> {
        let shifts = ShiftRepository::new(MemoryStore::new());
        for (d, start, end) in [(date(2025, 1, 5), 9, 15), (date(2025, 1, 20), 13, 17), (date(2025, 2, 1), 9, 12)] {
            shifts
                .upsert(&ShiftEntry::new(d, ClockTime::new(start, 0).unwrap(), ClockTime::new(end, 0).unwrap()))
                .unwrap();
        }
        shifts
    }

    #[test]
    fn test_confirm_clears_only_that_month() {
        let shifts = seeded();
        let pending = request_settlement(date(2025, 1, 31));
        assert_eq!(pending.label(), "January 2025");

        let receipt = pending.confirm(&shifts).unwrap();
        assert_eq!(receipt.removed, 2);
        assert_eq!((receipt.year, receipt.month), (2025, 1));

        let aggregator = MonthlyAggregator::new(&shifts);
        assert!(aggregator.entries_for_month(date(2025, 1, 1)).unwrap().is_empty());
        assert_eq!(aggregator.recalculate(date(2025, 1, 1)).unwrap().total_hours, 0);

        let february = shifts.get(date(2025, 2, 1)).unwrap().unwrap();
        assert_eq!(february.hours_worked, 3);
    }

    #[test]
    fn test_cancel_keeps_entries() {
        let shifts = seeded();
        request_settlement(date(2025, 1, 31)).cancel();
        assert_eq!(shifts.entries_for_month(2025, 1).unwrap().len(), 2);
    }
}
