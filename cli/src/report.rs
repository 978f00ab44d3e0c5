use shiftly_core::{EntryDto, MonthSummaryDto, ShiftEntry};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Helper struct for Table Row
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Hours")]
    hours: u32,
}

impl From<EntryDto> for EntryRow {
    fn from(dto: EntryDto) -> Self {
        Self {
            date: dto.date,
            day: dto.day_of_week,
            start: format!("{} {}", dto.start, dto.start_period),
            end: format!("{} {}", dto.end, dto.end_period),
            hours: dto.hours_worked,
        }
    }
}

pub fn print_entry(entry: &ShiftEntry) {
    let dto = EntryDto::from_entity(entry);
    println!(
        "{} ({}): {} {} - {} {}, {} h",
        dto.date, dto.day_of_week, dto.start, dto.start_period, dto.end, dto.end_period, dto.hours_worked
    );
}

pub fn print_summary(summary: &MonthSummaryDto) {
    println!("\x1b[1;36m{}\x1b[0m", summary.label);
    println!("  Hours:  {} hrs", summary.total_hours);
    println!("  Rate:   {}/hr", summary.rate);
    println!("  Amount: {}", summary.pay_display);
}

pub fn print_month(entries: &[ShiftEntry], summary: &MonthSummaryDto) {
    if entries.is_empty() {
        println!("No shifts recorded for {}.", summary.label);
        return;
    }

    let rows: Vec<EntryRow> = entries.iter().map(EntryDto::from_entity).map(EntryRow::from).collect();
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    println!("{}", table);
    print_summary(summary);
}
