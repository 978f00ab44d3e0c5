use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::model::entry::ShiftEntry;
use crate::repository::traits::{KeyValueStore, StoreKey};

/// Typed access to the `entry/` namespace of a store.
#[derive(Clone, Debug)]
pub struct ShiftRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ShiftRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get(&self, date: NaiveDate) -> Result<Option<ShiftEntry>> {
        self.store.get(&StoreKey::Entry(date).to_string())
    }

    /// Writes the entry, replacing whatever was stored for that date.
    pub fn upsert(&self, entry: &ShiftEntry) -> Result<()> {
        self.store.put(&entry.key().to_string(), entry)
    }

    pub fn delete(&self, date: NaiveDate) -> Result<()> {
        self.store.delete(&StoreKey::Entry(date).to_string())
    }

    pub fn exists(&self, date: NaiveDate) -> Result<bool> {
        self.store.exists(&StoreKey::Entry(date).to_string())
    }

    /// Every date that has an entry key, ascending. Keys outside the entry
    /// namespace or with unparsable dates are skipped.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        let dates = self
            .store
            .keys()?
            .iter()
            .filter_map(|key| match StoreKey::parse(key) {
                Some(StoreKey::Entry(date)) => Some(date),
                _ => None,
            })
            .collect();
        Ok(dates)
    }

    pub fn all(&self) -> Result<Vec<ShiftEntry>> {
        self.load(self.dates()?)
    }

    pub fn entries_for_month(&self, year: i32, month: u32) -> Result<Vec<ShiftEntry>> {
        let dates = self
            .dates()?
            .into_iter()
            .filter(|d| d.year() == year && d.month() == month)
            .collect();
        self.load(dates)
    }

    /// Removes every entry in the month and returns how many went away.
    pub fn delete_month(&self, year: i32, month: u32) -> Result<usize> {
        let mut removed = 0;
        for date in self.dates()? {
            if date.year() == year && date.month() == month {
                self.delete(date)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn load(&self, dates: Vec<NaiveDate>) -> Result<Vec<ShiftEntry>> {
        let mut entries = Vec::with_capacity(dates.len());
        for date in dates {
            match self.get(date)? {
                Some(entry) if entry.date == date => entries.push(entry),
                Some(entry) => {
                    tracing::debug!(%date, stored = %entry.date, "skipping entry stored under a different date");
                }
                None => {}
            }
        }
        Ok(entries)
    }
}
