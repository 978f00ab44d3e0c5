use anyhow::Result;

use crate::model::rate::HourlyRate;
use crate::repository::traits::{KeyValueStore, Setting, StoreKey};

/// Typed access to the `setting/` namespace of a store.
#[derive(Clone, Debug)]
pub struct SettingsRepository<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Zero when nothing (or nothing readable) has been stored yet.
    pub fn hourly_rate(&self) -> Result<HourlyRate> {
        let key = StoreKey::Setting(Setting::HourlyRate).to_string();
        let rate: Option<HourlyRate> = self.store.get(&key)?;
        Ok(rate.unwrap_or_default())
    }

    pub fn set_hourly_rate(&self, rate: HourlyRate) -> Result<()> {
        let key = StoreKey::Setting(Setting::HourlyRate).to_string();
        self.store.put(&key, &rate)
    }
}
