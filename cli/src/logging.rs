use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SHIFTLY_LOG";

/// Where log lines go. The TUI owns the terminal, so it logs to files.
pub enum LogTarget<'a> {
    Stderr,
    Files(&'a Path),
}

pub fn enable_logging(target: LogTarget<'_>, default_level: &str) -> Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(format!("shiftly_core={default_level},shiftly_cli={default_level}")),
    };

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogTarget::Files(data_dir) => {
            let appender = tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("shiftly")
                .filename_suffix("log")
                .build(data_dir.join("logs"))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_ansi(false)
                .init();
        }
    }
    Ok(())
}
