mod logging;
mod report;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use shiftly_core::input::is_affirmative;
use shiftly_core::time::month_label;
use shiftly_core::{
    parse_human_date, resolve_data_dir, ClockTime, Config, Event, FileStore, MonthSummaryDto, Notice, Session,
};

use crate::logging::{enable_logging, LogTarget};

#[derive(Parser)]
#[command(name = "shiftly")]
#[command(about = "Track daily shifts and monthly pay", long_about = None)]
struct Cli {
    /// Directory holding the store, config and logs (default: $SHIFTLY_HOME or ~/.shiftly)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record a shift (usage: log 2025-01-05 9:00am 5:30pm)
    Log {
        /// Date: YYYY-MM-DD, today, yesterday, +Nd, -Nd
        date: String,
        /// Start time: 17:30, 5:30pm, 5pm
        start: String,
        /// End time
        end: String,
    },
    /// Show the shift recorded for a date
    Show { date: Option<String> },
    /// Hours and pay for the month containing a date
    Month { date: Option<String> },
    /// Table of every shift in the month containing a date
    List { date: Option<String> },
    /// Print or set the hourly rate
    Rate { value: Option<String> },
    /// Clear every shift in the month containing a date
    Settle {
        date: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let config = Config::load(&data_dir)?;

    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) {
        enable_logging(LogTarget::Files(&data_dir), &config.log_level)?;
    } else {
        enable_logging(LogTarget::Stderr, "warn")?;
    }

    let store = FileStore::new(Some(data_dir.clone()))?;
    let today = Local::now().date_naive();
    tracing::debug!(data_dir = %data_dir.display(), %today, "starting");

    let session = Session::open(store, &config, today)?;
    run_command(command, session, &config, today)
}

fn run_command(command: Commands, mut session: Session<FileStore>, config: &Config, today: NaiveDate) -> Result<()> {
    let date_or_today = |arg: Option<String>| -> Result<NaiveDate> {
        match arg {
            Some(text) => Ok(parse_human_date(&text, today)?),
            None => Ok(today),
        }
    };

    match command {
        Commands::Log { date, start, end } => {
            let date = parse_human_date(&date, today)?;
            let start: ClockTime = start.parse().context("Invalid start time")?;
            let end: ClockTime = end.parse().context("Invalid end time")?;

            session.dispatch(Event::SelectDate(date))?;
            session.dispatch(Event::SetStart(start))?;
            session.dispatch(Event::SetEnd(end))?;
            let view = session.dispatch(Event::Save)?;
            match view.notice {
                Some(Notice::Saved { hours }) => {
                    println!("Shift saved: {} ({} to {}), {} h", date, start, end, hours);
                    let summary = MonthSummaryDto::new(&view.aggregate, view.rate, &config.currency_symbol);
                    report::print_summary(&summary);
                }
                _ => println!("{}", not_saved_message(start, end)),
            }
        }
        Commands::Show { date } => {
            let view = session.dispatch(Event::SelectDate(date_or_today(date)?))?;
            match &view.active_entry {
                Some(entry) => report::print_entry(entry),
                None => println!("No shift recorded for {}.", view.selected_date),
            }
        }
        Commands::Month { date } => {
            let view = session.dispatch(Event::SelectDate(date_or_today(date)?))?;
            let summary = MonthSummaryDto::new(&view.aggregate, view.rate, &config.currency_symbol);
            report::print_summary(&summary);
        }
        Commands::List { date } => {
            let view = session.dispatch(Event::SelectDate(date_or_today(date)?))?;
            let summary = MonthSummaryDto::new(&view.aggregate, view.rate, &config.currency_symbol);
            report::print_month(&view.month_entries, &summary);
        }
        Commands::Rate { value } => match value {
            Some(text) => {
                let view = session.dispatch(Event::SetHourlyRate(text))?;
                println!("Hourly rate set to {}/hr", view.rate.0);
            }
            None => println!("{}/hr", session.view().rate.0),
        },
        Commands::Settle { date, yes } => {
            session.dispatch(Event::SelectDate(date_or_today(date)?))?;
            let view = session.dispatch(Event::RequestSettle)?;
            let label = match &view.notice {
                Some(Notice::SettleRequested { label }) => label.clone(),
                _ => month_label(view.selected_date),
            };

            let confirmed = yes || prompt(&format!("Settle {}? This deletes every shift in it. [y/N] ", label))?;
            if !confirmed {
                session.dispatch(Event::CancelSettle)?;
                println!("Settlement cancelled.");
                return Ok(());
            }
            let view = session.dispatch(Event::ConfirmSettle)?;
            if let Some(Notice::Settled { label, removed }) = view.notice {
                println!("Settled {}: removed {} shift(s).", label, removed);
            }
        }
        Commands::Tui => tui::run(session, config)?,
    }
    Ok(())
}

fn not_saved_message(start: ClockTime, end: ClockTime) -> String {
    format!("Not saved: {} to {} records no whole hours.", start, end)
}

fn prompt(question: &str) -> Result<bool> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}
