use crate::model::rate::HourlyRate;

/// Hourly rate from free text. Anything that is not a non-negative whole
/// number resolves to zero.
pub fn parse_rate_input(text: &str) -> HourlyRate {
    HourlyRate(text.trim().parse().unwrap_or(0))
}

/// Answer to a yes/no prompt. Only an explicit yes counts.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
