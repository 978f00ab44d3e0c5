use serde::{Deserialize, Serialize};

/// Currency units earned per whole hour.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct HourlyRate(pub u32);

impl HourlyRate {
    pub fn pay_for(&self, hours: u32) -> u64 {
        u64::from(self.0) * u64::from(hours)
    }
}
