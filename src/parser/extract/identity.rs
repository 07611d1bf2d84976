use std::sync::LazyLock;

use regex::Regex;

/// Credentials recognised in the identity block, longest first.
pub const DEGREES: &[&str] = &[
    "LCSW-R", "PMHNP", "APRN", "CRNP", "LCSW", "LMSW", "LMHC", "LMFT", "LCAT", "PsyD", "DNP",
    "FNP", "ANP", "CNM", "DDS", "DMD", "DPM", "RPA", "PhD", "AuD", "MD", "DO", "NP", "PA", "OD",
    "DC", "RN", "PT", "OT",
];

static IDENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let degrees = DEGREES
        .iter()
        .map(|d| regex::escape(d))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"^([^,]+),\s+([^,]+?)(?:\s+([A-Z])\.)?,\s+({degrees}),\s+\(([MF])\)"
    ))
    .unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub last: String,
    pub first: String,
    pub middle: Option<String>,
    pub degree: String,
    pub gender: String,
}

/// `Last, First[ M.], Degree, (G)` at the very start of the unit.
pub fn parse_identity(text: &str) -> Option<Identity> {
    let caps = IDENTITY_RE.captures(text)?;
    Some(Identity {
        last: caps[1].trim().to_string(),
        first: caps[2].trim().to_string(),
        middle: caps.get(3).map(|m| m.as_str().to_string()),
        degree: caps[4].to_string(),
        gender: caps[5].to_string(),
    })
}
