use std::sync::LazyLock;

use regex::Regex;

use crate::parser::segment::{CATEGORY_LABEL, SPECIALTY_LABEL};

/// Labels that end a free-text span such as hospital affiliations.
pub const SECTION_TERMINATORS: &[&str] = &[
    "Languages",
    "Cultural",
    "Areas of Expertise",
    "Areas",
    "Web address",
    "Accepting",
    "Does Not Accept",
    "Provider",
    "Hospital Affiliations",
    "Ages:",
];

static LANGUAGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Languages Spoken.*?Provider:\s*").unwrap());
static LANGUAGE_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z,\s]+").unwrap());
static AGES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\s*-\s*\d+|\d+\+)").unwrap());
static EXPERTISE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]\d{2}\b").unwrap());

/// Text after `label` up to the earliest terminator, end of line, or end of text.
///
/// Returns `None` when the label is absent or the bounded value is blank.
pub fn labeled_field(text: &str, label: &str, terminators: &[&str]) -> Option<String> {
    let start = text.find(label)? + label.len();
    let rest = &text[start..];
    let end = terminators
        .iter()
        .filter_map(|t| rest.find(t))
        .chain(rest.find('\n'))
        .min()
        .unwrap_or(rest.len());
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn group_name(text: &str) -> Option<String> {
    labeled_field(text, "Group Name:", &["Provider ID:", "NPI:"])
}

pub fn hospital_affiliations(text: &str) -> Option<String> {
    labeled_field(text, "Hospital Affiliations:", SECTION_TERMINATORS)
}

/// Specialty annotation; anything after a `|` separator is dropped.
pub fn provider_specialty(text: &str) -> Option<String> {
    labeled_field(text, SPECIALTY_LABEL, &["|"])
}

pub fn provider_category(text: &str) -> Option<String> {
    labeled_field(text, CATEGORY_LABEL, &["|"])
}

pub fn age_group(text: &str) -> Option<String> {
    let value = labeled_field(text, "Ages:", SECTION_TERMINATORS)?;
    AGES_RE.find(&value).map(|m| m.as_str().replace(' ', ""))
}

/// Expertise codes only (`letter + two digits`), comma-joined.
pub fn areas_of_expertise(text: &str) -> Option<String> {
    let value = labeled_field(text, "Areas of Expertise:", &["|"])?;
    let codes: Vec<&str> = EXPERTISE_CODE_RE
        .find_iter(&value)
        .map(|m| m.as_str())
        .collect();
    if codes.is_empty() {
        None
    } else {
        Some(codes.join(", "))
    }
}

pub fn web_address(text: &str) -> Option<String> {
    let value = labeled_field(text, "Web address:", &[])?;
    value.split_whitespace().next().map(str::to_string)
}

/// Languages listed after the provider sub-label of `Languages Spoken`.
pub fn languages(text: &str) -> Vec<String> {
    let Some(m) = LANGUAGES_RE.find(text) else {
        return Vec::new();
    };
    let rest = &text[m.end()..];
    let terminators: Vec<&str> = SECTION_TERMINATORS
        .iter()
        .copied()
        .chain(["Hospital", "Web", "Ages"])
        .collect();
    let end = terminators
        .iter()
        .filter_map(|t| rest.find(t))
        .chain(rest.find('\n'))
        .min()
        .unwrap_or(rest.len());
    let bounded = &rest[..end];
    let Some(list) = LANGUAGE_LIST_RE.find(bounded) else {
        return Vec::new();
    };
    list.as_str()
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
