use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

const MINUTES_PER_DAY: i64 = 24 * 60;
const QUARTER: u32 = 15;

/// AM/PM indicator. Always derived from a 24-hour value, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Am,
    Pm,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => f.write_str("AM"),
            Period::Pm => f.write_str("PM"),
        }
    }
}

/// A time of day in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// For compile-time constants; out-of-range values fail the build.
    pub const fn at(hour: u32, minute: u32) -> Self {
        assert!(hour < 24 && minute < 60);
        Self { hour, minute }
    }

    pub fn from_12_hour(hour12: u32, minute: u32, period: Period) -> Result<Self, TimeError> {
        let (hour, minute) = to_24_hour(hour12, minute, period);
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn period(&self) -> Period {
        period_of(self.hour)
    }

    /// Hour on a 12-hour dial (1..=12).
    pub fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Moves the time by `delta` minutes, wrapping around midnight.
    pub fn add_minutes(self, delta: i64) -> Self {
        let total = (self.hour as i64 * 60 + self.minute as i64 + delta).rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (total / 60) as u32,
            minute: (total % 60) as u32,
        }
    }

    pub fn to_24h_string(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour12(), self.minute, self.period())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    /// Accepts `17:30`, `5:30 PM`, `5:30pm`, `5pm` and `5 PM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let invalid = || TimeError::InvalidTime(s.trim().to_string());

        let (body, period) = match lowered.strip_suffix("am").or_else(|| lowered.strip_suffix('a')) {
            Some(rest) => (rest.trim(), Some(Period::Am)),
            None => match lowered.strip_suffix("pm").or_else(|| lowered.strip_suffix('p')) {
                Some(rest) => (rest.trim(), Some(Period::Pm)),
                None => (lowered.as_str(), None),
            },
        };

        let (hour_str, minute_str) = body.split_once(':').unwrap_or((body, "0"));
        let hour: u32 = hour_str.trim().parse().map_err(|_| invalid())?;
        let minute: u32 = minute_str.trim().parse().map_err(|_| invalid())?;

        match period {
            Some(period) => {
                if !(1..=12).contains(&hour) {
                    return Err(TimeError::HourOutOfRange(hour));
                }
                ClockTime::from_12_hour(hour, minute, period)
            }
            None => ClockTime::new(hour, minute),
        }
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_24h_string()
    }
}

/// Whole hours between two times of day. Only the hour component counts,
/// and an end before the start yields 0.
pub fn hours_worked(start: ClockTime, end: ClockTime) -> u32 {
    end.hour.saturating_sub(start.hour)
}

pub fn to_24_hour(hour12: u32, minute: u32, period: Period) -> (u32, u32) {
    let hour = match period {
        Period::Pm if hour12 < 12 => hour12 + 12,
        Period::Am if hour12 == 12 => 0,
        _ => hour12,
    };
    (hour, minute)
}

pub fn period_of(hour24: u32) -> Period {
    if hour24 < 12 {
        Period::Am
    } else {
        Period::Pm
    }
}

/// Snaps to the nearest quarter hour: a remainder under 8 minutes rounds
/// down, anything else rounds up (carrying into the next hour).
pub fn snap_to_quarter(time: ClockTime) -> ClockTime {
    let remainder = time.minute % QUARTER;
    let up = if remainder < 8 { 0 } else { QUARTER };
    let delta = up as i64 - remainder as i64;
    time.add_minutes(delta)
}

pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate, TimeError> {
    let trimmed = input.trim();
    let invalid = || TimeError::InvalidDate(trimmed.to_string());

    match trimmed.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return today.pred_opt().ok_or_else(invalid),
        "tomorrow" | "tom" => return today.succ_opt().ok_or_else(invalid),
        _ => {}
    }

    // Relative format (+Nd, -Nd, +Nw, -Nw)
    if let Some(sign) = trimmed.chars().next().filter(|c| *c == '+' || *c == '-') {
        let body = &trimmed[1..];
        let (unit_at, unit) = body.char_indices().last().ok_or_else(invalid)?;
        // Unsigned so "+-3d" is rejected and negation cannot overflow.
        let count: u32 = body[..unit_at].parse().map_err(|_| invalid())?;
        let count = if sign == '-' { -i64::from(count) } else { i64::from(count) };

        let delta = match unit.to_ascii_lowercase() {
            'd' => TimeDelta::try_days(count),
            'w' => TimeDelta::try_weeks(count),
            _ => None,
        };
        return delta
            .and_then(|delta| today.checked_add_signed(delta))
            .ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
}

/// "January 2025"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    #[test]
    fn test_hours_worked_truncates_minutes() {
        assert_eq!(hours_worked(t(9, 0), t(17, 45)), 8);
        assert_eq!(hours_worked(t(9, 50), t(10, 10)), 0);
        assert_eq!(hours_worked(t(9, 50), t(11, 10)), 2);
    }

    #[test]
    fn test_hours_worked_never_negative() {
        assert_eq!(hours_worked(t(17, 0), t(9, 0)), 0);
        assert_eq!(hours_worked(t(0, 0), t(0, 0)), 0);
        for start in 0..24 {
            for end in 0..24 {
                let expected = (end as i64 - start as i64).max(0) as u32;
                assert_eq!(hours_worked(t(start, 30), t(end, 15)), expected);
            }
        }
    }

    #[test]
    fn test_to_24_hour() {
        assert_eq!(to_24_hour(12, 0, Period::Am), (0, 0));
        assert_eq!(to_24_hour(12, 15, Period::Pm), (12, 15));
        assert_eq!(to_24_hour(1, 30, Period::Pm), (13, 30));
        assert_eq!(to_24_hour(11, 59, Period::Am), (11, 59));
        // Already 24-hour values pass through.
        assert_eq!(to_24_hour(17, 0, Period::Pm), (17, 0));
    }

    #[test]
    fn test_period_round_trip() {
        for hour in 0..24 {
            let time = t(hour, 45);
            let back = ClockTime::from_12_hour(time.hour12(), time.minute(), time.period()).unwrap();
            assert_eq!(back, time);
        }
    }

    #[test]
    fn test_period_of() {
        assert_eq!(period_of(0), Period::Am);
        assert_eq!(period_of(11), Period::Am);
        assert_eq!(period_of(12), Period::Pm);
        assert_eq!(period_of(23), Period::Pm);
    }

    #[test]
    fn test_snap_to_quarter() {
        assert_eq!(snap_to_quarter(t(9, 7)), t(9, 0));
        assert_eq!(snap_to_quarter(t(9, 8)), t(9, 15));
        assert_eq!(snap_to_quarter(t(9, 22)), t(9, 15));
        assert_eq!(snap_to_quarter(t(9, 23)), t(9, 30));
        assert_eq!(snap_to_quarter(t(9, 53)), t(10, 0));
        assert_eq!(snap_to_quarter(t(23, 58)), t(0, 0));
        assert_eq!(snap_to_quarter(t(14, 45)), t(14, 45));
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!("17:30".parse::<ClockTime>().unwrap(), t(17, 30));
        assert_eq!("5:30 PM".parse::<ClockTime>().unwrap(), t(17, 30));
        assert_eq!("5:30pm".parse::<ClockTime>().unwrap(), t(17, 30));
        assert_eq!("12am".parse::<ClockTime>().unwrap(), t(0, 0));
        assert_eq!("9".parse::<ClockTime>().unwrap(), t(9, 0));

        assert_eq!("24:00".parse::<ClockTime>(), Err(TimeError::HourOutOfRange(24)));
        assert_eq!("13pm".parse::<ClockTime>(), Err(TimeError::HourOutOfRange(13)));
        assert!("noon".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_display_is_twelve_hour() {
        assert_eq!(t(0, 5).to_string(), "12:05 AM");
        assert_eq!(t(13, 0).to_string(), "1:00 PM");
        assert_eq!(t(13, 0).to_24h_string(), "13:00");
    }

    #[test]
    fn test_add_minutes_wraps() {
        assert_eq!(t(23, 45).add_minutes(15), t(0, 0));
        assert_eq!(t(0, 0).add_minutes(-15), t(23, 45));
    }

    #[test]
    fn test_parse_human_date() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_human_date("today", today).unwrap(), today);
        assert_eq!(parse_human_date("yesterday", today).unwrap(), NaiveDate::from_ymd_opt(2025, 1, 30).unwrap());
        assert_eq!(parse_human_date("tom", today).unwrap(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(parse_human_date("+2d", today).unwrap(), NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
        assert_eq!(parse_human_date("-1w", today).unwrap(), NaiveDate::from_ymd_opt(2025, 1, 24).unwrap());
        assert_eq!(parse_human_date("2024-12-25", today).unwrap(), NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        assert!(parse_human_date("+xd", today).is_err());
        assert!(parse_human_date("2025-13-01", today).is_err());
    }

    #[test]
    fn test_parse_human_date_rejects_bad_relative_input() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        for input in ["+1é", "-é", "+", "+d", "+-3d", "+3x", "+99999999999d", "+999999999999999w", "+4000000000w"] {
            assert!(
                matches!(parse_human_date(input, today), Err(TimeError::InvalidDate(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_human_date_at_calendar_edges() {
        assert!(parse_human_date("yesterday", NaiveDate::MIN).is_err());
        assert!(parse_human_date("tomorrow", NaiveDate::MAX).is_err());
        assert!(parse_human_date("+1d", NaiveDate::MAX).is_err());
        assert!(parse_human_date("-1w", NaiveDate::MIN).is_err());
        assert_eq!(parse_human_date("+0d", NaiveDate::MAX).unwrap(), NaiveDate::MAX);
    }

    #[test]
    fn test_month_label() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(month_label(date), "January 2025");
    }
}
