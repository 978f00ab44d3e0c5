use anyhow::Result;
use chrono::{NaiveDate, TimeDelta};

use crate::config::Config;
use crate::input::parse_rate_input;
use crate::model::aggregate::MonthlyAggregate;
use crate::model::entry::ShiftEntry;
use crate::model::rate::HourlyRate;
use crate::repository::{KeyValueStore, SettingsRepository, ShiftRepository};
use crate::service::aggregator::MonthlyAggregator;
use crate::service::editor::{EntryEditor, SaveOutcome};
use crate::service::settlement::{request_settlement, PendingSettlement};
use crate::time::ClockTime;

/// Discrete user actions fed into a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectDate(NaiveDate),
    /// Move the selected date by a number of days.
    ShiftDate(i64),
    SetStart(ClockTime),
    SetEnd(ClockTime),
    NudgeStart(i64),
    NudgeEnd(i64),
    Save,
    SetHourlyRate(String),
    RequestSettle,
    ConfirmSettle,
    CancelSettle,
}

/// Result of the last event worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved { hours: u32 },
    Rejected,
    RateUpdated(HourlyRate),
    SettleRequested { label: String },
    Settled { label: String, removed: usize },
    SettleCancelled,
}

/// Everything a front-end needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub selected_date: NaiveDate,
    pub aggregate: MonthlyAggregate,
    pub pay: u64,
    pub rate: HourlyRate,
    pub month_entries: Vec<ShiftEntry>,
    pub active_entry: Option<ShiftEntry>,
    pub start: ClockTime,
    pub end: ClockTime,
    pub preview_hours: u32,
    pub settle_pending: bool,
    pub notice: Option<Notice>,
}

/// Pipeline from user events to a fresh view model:
/// event -> store -> recomputed aggregate -> view.
pub struct Session<S: KeyValueStore> {
    shifts: ShiftRepository<S>,
    settings: SettingsRepository<S>,
    default_start: ClockTime,
    default_end: ClockTime,
    selected_date: NaiveDate,
    rate: HourlyRate,
    editor: EntryEditor,
    aggregate: MonthlyAggregate,
    month_entries: Vec<ShiftEntry>,
    active_entry: Option<ShiftEntry>,
    pending: Option<PendingSettlement>,
    notice: Option<Notice>,
}

impl<S: KeyValueStore + Clone> Session<S> {
    /// Reads the rate and loads `today` as the selected date.
    pub fn open(store: S, config: &Config, today: NaiveDate) -> Result<Self> {
        let settings = SettingsRepository::new(store.clone());
        let rate = settings.hourly_rate()?;
        let mut session = Self {
            shifts: ShiftRepository::new(store),
            settings,
            default_start: config.default_start,
            default_end: config.default_end,
            selected_date: today,
            rate,
            editor: EntryEditor::new(config.default_start, config.default_end),
            aggregate: MonthlyAggregate::empty(today),
            month_entries: Vec::new(),
            active_entry: None,
            pending: None,
            notice: None,
        };
        session.select(today)?;
        Ok(session)
    }
}

impl<S: KeyValueStore> Session<S> {
    pub fn shifts(&self) -> &ShiftRepository<S> {
        &self.shifts
    }

    pub fn dispatch(&mut self, event: Event) -> Result<ViewModel> {
        self.notice = None;
        match event {
            Event::SelectDate(date) => self.select(date)?,
            Event::ShiftDate(days) => {
                // Moves past the calendar's ends are dropped.
                let target = TimeDelta::try_days(days).and_then(|delta| self.selected_date.checked_add_signed(delta));
                if let Some(date) = target {
                    self.select(date)?;
                }
            }
            Event::SetStart(time) => self.editor.set_start(time),
            Event::SetEnd(time) => self.editor.set_end(time),
            Event::NudgeStart(minutes) => self.editor.nudge_start(minutes),
            Event::NudgeEnd(minutes) => self.editor.nudge_end(minutes),
            Event::Save => self.save()?,
            Event::SetHourlyRate(text) => {
                let rate = parse_rate_input(&text);
                self.settings.set_hourly_rate(rate)?;
                self.rate = rate;
                self.notice = Some(Notice::RateUpdated(rate));
            }
            Event::RequestSettle => {
                let pending = request_settlement(self.selected_date);
                self.notice = Some(Notice::SettleRequested { label: pending.label() });
                self.pending = Some(pending);
            }
            Event::ConfirmSettle => {
                if let Some(pending) = self.pending.take() {
                    let label = pending.label();
                    let receipt = pending.confirm(&self.shifts)?;
                    self.refresh()?;
                    self.notice = Some(Notice::Settled {
                        label,
                        removed: receipt.removed,
                    });
                }
            }
            Event::CancelSettle => {
                if let Some(pending) = self.pending.take() {
                    pending.cancel();
                    self.notice = Some(Notice::SettleCancelled);
                }
            }
        }
        Ok(self.view())
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            selected_date: self.selected_date,
            aggregate: self.aggregate,
            pay: self.aggregate.pay(self.rate),
            rate: self.rate,
            month_entries: self.month_entries.clone(),
            active_entry: self.active_entry.clone(),
            start: self.editor.start(),
            end: self.editor.end(),
            preview_hours: self.editor.preview_hours(),
            settle_pending: self.pending.is_some(),
            notice: self.notice.clone(),
        }
    }

    fn select(&mut self, date: NaiveDate) -> Result<()> {
        self.selected_date = date;
        // A pending settlement belongs to the month it was asked for.
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.active_entry = self.shifts.get(date)?;
        match &self.active_entry {
            Some(entry) => self.editor.load(entry.start, entry.end),
            None => self.editor.load(self.default_start, self.default_end),
        }
        self.refresh()
    }

    fn save(&mut self) -> Result<()> {
        match self.editor.save(self.selected_date, &self.shifts)? {
            SaveOutcome::Saved(entry) => {
                self.notice = Some(Notice::Saved {
                    hours: entry.hours_worked,
                });
                self.active_entry = Some(entry);
                self.refresh()?;
            }
            SaveOutcome::Rejected => self.notice = Some(Notice::Rejected),
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        let (aggregate, entries) = MonthlyAggregator::new(&self.shifts).month(self.selected_date)?;
        self.aggregate = aggregate;
        self.month_entries = entries;
        Ok(())
    }
}
