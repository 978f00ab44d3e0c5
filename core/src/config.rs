use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::time::ClockTime;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const HOME_ENV: &str = "SHIFTLY_HOME";

const DEFAULT_START: ClockTime = ClockTime::at(9, 0);
const DEFAULT_END: ClockTime = ClockTime::at(17, 0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// Picker values shown for a day with no recorded shift.
    pub default_start: ClockTime,
    pub default_end: ClockTime,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            default_start: DEFAULT_START,
            default_end: DEFAULT_END,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads `config.json` from the data directory, falling back to defaults
    /// when the file does not exist.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(data_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }
}

/// `~/.shiftly`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(".shiftly"))
}

/// Explicit override first, then `SHIFTLY_HOME`, then the home directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    match env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}
