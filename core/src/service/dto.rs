use serde::Serialize;

use crate::model::aggregate::MonthlyAggregate;
use crate::model::entry::ShiftEntry;
use crate::model::rate::HourlyRate;
use crate::time::{month_label, ClockTime, Period};

/// Display form of a stored entry. This is where the AM/PM period gets
/// derived; it never travels back into storage.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntryDto {
    pub date: String,
    pub day_of_week: String,
    pub start: String,
    pub start_period: String,
    pub end: String,
    pub end_period: String,
    pub hours_worked: u32,
}

impl EntryDto {
    pub fn from_entity(entry: &ShiftEntry) -> Self {
        let (start, start_period) = split_display(entry.start);
        let (end, end_period) = split_display(entry.end);
        Self {
            date: entry.date.format("%Y-%m-%d").to_string(),
            day_of_week: entry.date.format("%a").to_string(),
            start,
            start_period: start_period.to_string(),
            end,
            end_period: end_period.to_string(),
            hours_worked: entry.hours_worked,
        }
    }
}

fn split_display(time: ClockTime) -> (String, Period) {
    (format!("{}:{:02}", time.hour12(), time.minute()), time.period())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthSummaryDto {
    pub label: String,
    pub total_hours: u32,
    pub rate: u32,
    pub pay: u64,
    pub pay_display: String,
}

impl MonthSummaryDto {
    pub fn new(aggregate: &MonthlyAggregate, rate: HourlyRate, currency_symbol: &str) -> Self {
        let anchor = chrono::NaiveDate::from_ymd_opt(aggregate.year, aggregate.month, 1);
        let pay = aggregate.pay(rate);
        Self {
            label: anchor.map(month_label).unwrap_or_default(),
            total_hours: aggregate.total_hours,
            rate: rate.0,
            pay,
            pay_display: format_currency(pay, currency_symbol),
        }
    }
}

/// `$1,234.00`
pub fn format_currency(amount: u64, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.00", symbol, grouped)
}
