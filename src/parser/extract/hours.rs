use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_HOURS: &str = "Mo-Fr - 8:00 AM - 5:00 PM";

const HOURS_TERMINATORS: &[&str] = &[
    "Accepting New Patients",
    "Hospital Affiliations",
    "Languages",
    "Cultural",
    "Web address",
    "Areas of Expertise",
    "Accepting Existing Patients Only",
    "Does Not Accept New Patients",
];

// Day token, then lazily through the first AM/PM marker, then up to a terminator.
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let terminators = HOURS_TERMINATORS
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?m)(\b(?:Mo|Tu|We|Th|Fr|Sa|Su)[,\-\s].*?[AP]M\b.*?)(?:{terminators}|$)"
    ))
    .unwrap()
});

/// Office hours span, or the standard business-hours default when none is printed.
pub fn days_hours(text: &str) -> String {
    HOURS_RE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOURS.to_string())
}
