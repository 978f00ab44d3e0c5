use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::repository::StoreKey;
use crate::time::{hours_worked, ClockTime};

/// One day's recorded shift. The date is the unique key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "StoredShiftEntry", into = "StoredShiftEntry")]
pub struct ShiftEntry {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: ClockTime,
    pub hours_worked: u32,
}

impl ShiftEntry {
    pub fn new(date: NaiveDate, start: ClockTime, end: ClockTime) -> Self {
        Self {
            date,
            start,
            end,
            hours_worked: hours_worked(start, end),
        }
    }

    pub fn key(&self) -> StoreKey {
        StoreKey::Entry(self.date)
    }

    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

// On-disk shape. Hours are 24-hour; the AM/PM period is not written, and
// older records that still carry `start_period`/`end_period` decode fine
// because unknown fields are ignored.
#[derive(Serialize, Deserialize)]
struct StoredShiftEntry {
    date: NaiveDate,
    start_hour: u32,
    start_minute: u32,
    end_hour: u32,
    end_minute: u32,
    hours_worked: u32,
}

impl TryFrom<StoredShiftEntry> for ShiftEntry {
    type Error = TimeError;

    fn try_from(raw: StoredShiftEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            date: raw.date,
            start: ClockTime::new(raw.start_hour, raw.start_minute)?,
            end: ClockTime::new(raw.end_hour, raw.end_minute)?,
            hours_worked: raw.hours_worked,
        })
    }
}

impl From<ShiftEntry> for StoredShiftEntry {
    fn from(entry: ShiftEntry) -> Self {
        Self {
            date: entry.date,
            start_hour: entry.start.hour(),
            start_minute: entry.start.minute(),
            end_hour: entry.end.hour(),
            end_minute: entry.end.minute(),
            hours_worked: entry.hours_worked,
        }
    }
}
