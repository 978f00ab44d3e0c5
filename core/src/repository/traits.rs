use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const ENTRY_PREFIX: &str = "entry/";
const SETTING_PREFIX: &str = "setting/";

/// Scalar settings stored alongside entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    HourlyRate,
}

impl Setting {
    fn name(&self) -> &'static str {
        match self {
            Setting::HourlyRate => "hourly_rate",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "hourly_rate" => Some(Setting::HourlyRate),
            _ => None,
        }
    }
}

/// Typed key in the flat store namespace. Entries and settings live under
/// separate prefixes so a scan for one never has to guess at the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Entry(NaiveDate),
    Setting(Setting),
}

impl StoreKey {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(date) = raw.strip_prefix(ENTRY_PREFIX) {
            return NaiveDate::parse_from_str(date, "%Y-%m-%d").ok().map(StoreKey::Entry);
        }
        raw.strip_prefix(SETTING_PREFIX)
            .and_then(Setting::from_name)
            .map(StoreKey::Setting)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Entry(date) => write!(f, "{}{}", ENTRY_PREFIX, date.format("%Y-%m-%d")),
            StoreKey::Setting(setting) => write!(f, "{}{}", SETTING_PREFIX, setting.name()),
        }
    }
}

/// Synchronous string-keyed store holding JSON values.
pub trait KeyValueStore {
    fn put_value(&self, key: &str, value: Value) -> Result<()>;
    fn get_value(&self, key: &str) -> Result<Option<Value>>;
    /// No-op when the key is absent.
    fn delete(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<BTreeSet<String>>;

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get_value(key)?.is_some())
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(key, serde_json::to_value(value)?)
    }

    /// Missing keys and values that do not decode as `T` both come back as
    /// `None`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        let Some(value) = self.get_value(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) => {
                tracing::debug!(key, %err, "skipping undecodable value");
                Ok(None)
            }
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn put_value(&self, key: &str, value: Value) -> Result<()> {
        (**self).put_value(key, value)
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        (**self).get_value(key)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<BTreeSet<String>> {
        (**self).keys()
    }

    fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key)
    }
}
