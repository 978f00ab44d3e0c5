pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::{resolve_data_dir, Config};
pub use error::TimeError;
pub use model::aggregate::MonthlyAggregate;
pub use model::entry::ShiftEntry;
pub use model::rate::HourlyRate;
pub use repository::{FileStore, KeyValueStore, MemoryStore, SettingsRepository, ShiftRepository};
pub use service::aggregator::MonthlyAggregator;
pub use service::dto::{format_currency, EntryDto, MonthSummaryDto};
pub use service::editor::{EditorState, EntryEditor, SaveOutcome};
pub use service::settlement::{request_settlement, PendingSettlement, SettlementReceipt};
pub use time::{hours_worked, parse_human_date, period_of, snap_to_quarter, to_24_hour, ClockTime, Period};
pub use usecase::session::{Event, Notice, Session, ViewModel};
