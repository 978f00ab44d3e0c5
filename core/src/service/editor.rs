use anyhow::Result;
use chrono::NaiveDate;

use crate::model::entry::ShiftEntry;
use crate::repository::{KeyValueStore, ShiftRepository};
use crate::time::{hours_worked, snap_to_quarter, ClockTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Pickers show the stored entry (or defaults); nothing changed yet.
    Idle,
    /// The user has moved at least one picker since the last load or save.
    Editing,
    /// A save is in progress.
    Validating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(ShiftEntry),
    /// Computed hours were zero; nothing was written.
    Rejected,
}

/// Start/end pickers for the selected day and the save state machine.
#[derive(Debug, Clone)]
pub struct EntryEditor {
    state: EditorState,
    start: ClockTime,
    end: ClockTime,
}

impl EntryEditor {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self {
            state: EditorState::Idle,
            start,
            end,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Hours a save would record right now.
    pub fn preview_hours(&self) -> u32 {
        hours_worked(self.start, self.end)
    }

    /// Resets the pickers after a date change.
    pub fn load(&mut self, start: ClockTime, end: ClockTime) {
        self.start = start;
        self.end = end;
        self.state = EditorState::Idle;
    }

    pub fn set_start(&mut self, start: ClockTime) {
        self.start = start;
        self.state = EditorState::Editing;
    }

    pub fn set_end(&mut self, end: ClockTime) {
        self.end = end;
        self.state = EditorState::Editing;
    }

    /// Steps the start picker by `minutes`, landing on a quarter hour.
    pub fn nudge_start(&mut self, minutes: i64) {
        self.set_start(snap_to_quarter(self.start.add_minutes(minutes)));
    }

    pub fn nudge_end(&mut self, minutes: i64) {
        self.set_end(snap_to_quarter(self.end.add_minutes(minutes)));
    }

    /// Validates and, when the shift is at least one hour long, writes it for
    /// `date`, replacing any earlier entry. The editor is idle afterwards
    /// unless the write itself failed.
    pub fn save<S: KeyValueStore>(&mut self, date: NaiveDate, shifts: &ShiftRepository<S>) -> Result<SaveOutcome> {
        let previous = self.state;
        self.state = EditorState::Validating;

        let hours = self.preview_hours();
        if hours == 0 {
            tracing::info!(%date, start = %self.start, end = %self.end, "rejected shift with no whole hours");
            self.state = EditorState::Idle;
            return Ok(SaveOutcome::Rejected);
        }

        let entry = ShiftEntry::new(date, self.start, self.end);
        if let Err(err) = shifts.upsert(&entry) {
            self.state = previous;
            return Err(err);
        }
        tracing::info!(%date, hours, "saved shift");
        self.state = EditorState::Idle;
        Ok(SaveOutcome::Saved(entry))
    }
}
