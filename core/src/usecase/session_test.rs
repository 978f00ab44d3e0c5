#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::model::rate::HourlyRate;
    use crate::repository::{KeyValueStore, MemoryStore, ShiftRepository};
    use crate::service::editor::EntryEditor;
    use crate::time::ClockTime;
    use crate::usecase::session::{Event, Notice, Session};
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn t(hour: u32, minute: u32) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    fn log(session: &mut Session<MemoryStore>, day: NaiveDate, start: ClockTime, end: ClockTime) -> Option<Notice> {
        session.dispatch(Event::SelectDate(day)).unwrap();
        session.dispatch(Event::SetStart(start)).unwrap();
        session.dispatch(Event::SetEnd(end)).unwrap();
        session.dispatch(Event::Save).unwrap().notice
    }

    fn seeded() -> (MemoryStore, Session<MemoryStore>) {
        let store = MemoryStore::new();
        let mut session = Session::open(store.clone(), &Config::default(), date(2025, 1, 1)).unwrap();
        log(&mut session, date(2025, 1, 5), t(9, 0), t(15, 0));
        log(&mut session, date(2025, 1, 20), t(13, 0), t(17, 30));
        log(&mut session, date(2025, 2, 1), t(9, 0), t(12, 0));
        (store, session)
    }

    #[test]
    fn test_open_reads_rate_and_defaults() {
        let store = MemoryStore::new();
        store.put("setting/hourly_rate", &HourlyRate(20)).unwrap();

        let session = Session::open(store, &Config::default(), date(2025, 1, 10)).unwrap();
        let view = session.view();
        assert_eq!(view.rate, HourlyRate(20));
        assert_eq!(view.start, t(9, 0));
        assert_eq!(view.end, t(17, 0));
        assert_eq!(view.active_entry, None);
        assert_eq!(view.aggregate.total_hours, 0);
    }

    #[test]
    fn test_month_totals_follow_selected_date() {
        let (_, mut session) = seeded();

        let view = session.dispatch(Event::SelectDate(date(2025, 1, 15))).unwrap();
        assert_eq!(view.aggregate.total_hours, 10);
        assert_eq!(view.month_entries.len(), 2);

        let view = session.dispatch(Event::ShiftDate(31)).unwrap();
        assert_eq!(view.selected_date, date(2025, 2, 15));
        assert_eq!(view.aggregate.total_hours, 3);
    }

    #[test]
    fn test_pay_uses_rate() {
        let (_, mut session) = seeded();
        session.dispatch(Event::SelectDate(date(2025, 1, 15))).unwrap();
        let view = session.dispatch(Event::SetHourlyRate("20".to_string())).unwrap();
        assert_eq!(view.notice, Some(Notice::RateUpdated(HourlyRate(20))));
        assert_eq!(view.pay, 200);
    }

    #[test]
    fn test_malformed_rate_is_zero() {
        let (store, mut session) = seeded();
        session.dispatch(Event::SetHourlyRate("20".to_string())).unwrap();
        let view = session.dispatch(Event::SetHourlyRate("abc".to_string())).unwrap();
        assert_eq!(view.rate, HourlyRate(0));
        assert_eq!(view.pay, 0);
        assert_eq!(store.get_value("setting/hourly_rate").unwrap(), Some(json!(0)));
    }

    #[test]
    fn test_selecting_recorded_day_prefills_pickers() {
        let (_, mut session) = seeded();
        let view = session.dispatch(Event::SelectDate(date(2025, 1, 20))).unwrap();
        assert_eq!(view.start, t(13, 0));
        assert_eq!(view.end, t(17, 30));
        assert_eq!(view.active_entry.map(|e| e.hours_worked), Some(4));

        let view = session.dispatch(Event::SelectDate(date(2025, 1, 21))).unwrap();
        assert_eq!(view.start, t(9, 0));
        assert_eq!(view.active_entry, None);
    }

    #[test]
    fn test_rejected_save_changes_nothing() {
        let (store, mut session) = seeded();
        let before = store.keys().unwrap();

        let notice = log(&mut session, date(2025, 1, 22), t(9, 50), t(10, 10));
        assert_eq!(notice, Some(Notice::Rejected));
        assert_eq!(store.keys().unwrap(), before);
        assert_eq!(session.view().aggregate.total_hours, 10);
    }

    #[test]
    fn test_resave_overwrites_and_recomputes() {
        let (_, mut session) = seeded();
        let notice = log(&mut session, date(2025, 1, 5), t(10, 0), t(12, 0));
        assert_eq!(notice, Some(Notice::Saved { hours: 2 }));

        let view = session.view();
        assert_eq!(view.aggregate.total_hours, 6);
        assert_eq!(view.month_entries.len(), 2);
    }

    #[test]
    fn test_settle_requires_confirmation() {
        let (_, mut session) = seeded();
        session.dispatch(Event::SelectDate(date(2025, 1, 15))).unwrap();

        // Confirming with nothing pending does nothing.
        let view = session.dispatch(Event::ConfirmSettle).unwrap();
        assert_eq!(view.aggregate.total_hours, 10);

        let view = session.dispatch(Event::RequestSettle).unwrap();
        assert!(view.settle_pending);
        assert_eq!(view.notice, Some(Notice::SettleRequested { label: "January 2025".to_string() }));

        let view = session.dispatch(Event::CancelSettle).unwrap();
        assert!(!view.settle_pending);
        assert_eq!(view.aggregate.total_hours, 10);
    }

    #[test]
    fn test_settle_clears_month_only() {
        let (store, mut session) = seeded();
        session.dispatch(Event::SelectDate(date(2025, 1, 15))).unwrap();
        session.dispatch(Event::RequestSettle).unwrap();
        let view = session.dispatch(Event::ConfirmSettle).unwrap();

        assert_eq!(
            view.notice,
            Some(Notice::Settled { label: "January 2025".to_string(), removed: 2 })
        );
        assert_eq!(view.aggregate.total_hours, 0);
        assert!(view.month_entries.is_empty());

        let shifts = ShiftRepository::new(store);
        assert!(shifts.entries_for_month(2025, 1).unwrap().is_empty());
        assert_eq!(shifts.get(date(2025, 2, 1)).unwrap().map(|e| e.hours_worked), Some(3));
    }

    #[test]
    fn test_date_change_drops_pending_settlement() {
        let (_, mut session) = seeded();
        session.dispatch(Event::SelectDate(date(2025, 1, 15))).unwrap();
        session.dispatch(Event::RequestSettle).unwrap();
        session.dispatch(Event::SelectDate(date(2025, 2, 1))).unwrap();

        let view = session.dispatch(Event::ConfirmSettle).unwrap();
        assert_eq!(view.notice, None);
        assert_eq!(session.shifts().entries_for_month(2025, 1).unwrap().len(), 2);
    }

    #[test]
    fn test_nudges_snap_and_preview() {
        let store = MemoryStore::new();
        let mut session = Session::open(store, &Config::default(), date(2025, 3, 3)).unwrap();
        session.dispatch(Event::NudgeStart(-15)).unwrap();
        let view = session.dispatch(Event::NudgeEnd(45)).unwrap();
        assert_eq!(view.start, t(8, 45));
        assert_eq!(view.end, t(17, 45));
        assert_eq!(view.preview_hours, EntryEditor::new(t(8, 45), t(17, 45)).preview_hours());
        assert_eq!(view.preview_hours, 9);
    }

    #[test]
    fn test_overnight_save_is_rejected() {
        let (store, mut session) = seeded();
        let before = store.keys().unwrap();

        let notice = log(&mut session, date(2025, 1, 22), t(17, 0), t(9, 0));
        assert_eq!(notice, Some(Notice::Rejected));
        assert_eq!(store.keys().unwrap(), before);
    }

    #[test]
    fn test_shift_date_past_calendar_end_is_ignored() {
        let store = MemoryStore::new();
        let mut session = Session::open(store, &Config::default(), NaiveDate::MAX).unwrap();

        let view = session.dispatch(Event::ShiftDate(1)).unwrap();
        assert_eq!(view.selected_date, NaiveDate::MAX);
        let view = session.dispatch(Event::ShiftDate(i64::MAX)).unwrap();
        assert_eq!(view.selected_date, NaiveDate::MAX);

        let view = session.dispatch(Event::ShiftDate(-1)).unwrap();
        assert_eq!(view.selected_date, NaiveDate::MAX.pred_opt().unwrap());
    }
}
