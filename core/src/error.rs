use thiserror::Error;

/// Errors raised while turning user text into clock times or dates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("hour out of range: {0}")]
    HourOutOfRange(u32),

    #[error("minute out of range: {0}")]
    MinuteOutOfRange(u32),

    #[error("invalid time: '{0}'")]
    InvalidTime(String),

    #[error("could not parse date: '{0}'")]
    InvalidDate(String),
}
