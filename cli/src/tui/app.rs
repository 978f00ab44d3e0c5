use ratatui::widgets::TableState;
use shiftly_core::input::is_affirmative;
use shiftly_core::{format_currency, Config, Event, FileStore, Notice, Session, ViewModel};

/// Step used by the start/end nudge keys.
pub const NUDGE_MINUTES: i64 = 15;

pub enum InputMode {
    Normal,
    EditingRate,
    ConfirmingSettle,
}

pub struct App {
    pub session: Session<FileStore>,
    pub view: ViewModel,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub currency_symbol: String,
    pub status: Option<String>,
}

impl App {
    pub fn new(session: Session<FileStore>, config: &Config) -> App {
        let view = session.view();
        let mut app = App {
            session,
            view,
            state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            currency_symbol: config.currency_symbol.clone(),
            status: None,
        };
        app.sync_selection();
        app
    }

    pub fn pay_display(&self) -> String {
        format_currency(self.view.pay, &self.currency_symbol)
    }

    pub fn dispatch(&mut self, event: Event) {
        match self.session.dispatch(event) {
            Ok(view) => {
                self.status = view.notice.as_ref().map(describe_notice);
                self.view = view;
                self.sync_selection();
            }
            Err(err) => {
                tracing::error!(error = %err, "event failed");
                self.status = Some(format!("Error: {}", err));
            }
        }
    }

    // Highlight the selected day in the month table when it has an entry.
    fn sync_selection(&mut self) {
        let index = self
            .view
            .month_entries
            .iter()
            .position(|e| e.date == self.view.selected_date);
        self.state.select(index);
    }

    pub fn next_day(&mut self) {
        self.dispatch(Event::ShiftDate(1));
    }

    pub fn previous_day(&mut self) {
        self.dispatch(Event::ShiftDate(-1));
    }

    pub fn next_week(&mut self) {
        self.dispatch(Event::ShiftDate(7));
    }

    pub fn previous_week(&mut self) {
        self.dispatch(Event::ShiftDate(-7));
    }

    pub fn nudge_start(&mut self, forward: bool) {
        let step = if forward { NUDGE_MINUTES } else { -NUDGE_MINUTES };
        self.dispatch(Event::NudgeStart(step));
    }

    pub fn nudge_end(&mut self, forward: bool) {
        let step = if forward { NUDGE_MINUTES } else { -NUDGE_MINUTES };
        self.dispatch(Event::NudgeEnd(step));
    }

    pub fn save(&mut self) {
        self.dispatch(Event::Save);
    }

    pub fn request_settle(&mut self) {
        self.dispatch(Event::RequestSettle);
        if self.view.settle_pending {
            self.input_mode = InputMode::ConfirmingSettle;
        }
    }

    pub fn answer_settle(&mut self, answer: char) {
        let event = if is_affirmative(&answer.to_string()) {
            Event::ConfirmSettle
        } else {
            Event::CancelSettle
        };
        self.dispatch(event);
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_rate_mode(&mut self) {
        self.input_mode = InputMode::EditingRate;
        self.input = self.view.rate.0.to_string();
        self.cursor_position = self.input.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_rate(&mut self) {
        let text = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.dispatch(Event::SetHourlyRate(text));
        self.exit_input_mode();
    }
}

fn describe_notice(notice: &Notice) -> String {
    match notice {
        Notice::Saved { hours } => format!("Saved {} h", hours),
        Notice::Rejected => "Not saved: shift records no whole hours".to_string(),
        Notice::RateUpdated(rate) => format!("Hourly rate set to {}", rate.0),
        Notice::SettleRequested { label } => format!("Settle {}? (y/n)", label),
        Notice::Settled { label, removed } => format!("Settled {}: removed {} shift(s)", label, removed),
        Notice::SettleCancelled => "Settlement cancelled".to_string(),
    }
}
