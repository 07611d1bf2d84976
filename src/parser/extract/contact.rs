use std::sync::LazyLock;

use regex::Regex;

static PROVIDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Provider ID:\s*(\d+)").unwrap());
static NPI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"NPI:\s*(\d+)").unwrap());
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{3}\)\s*\d{3}-\d{4}").unwrap());
// Span between the NPI digits and the first phone-like number.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"NPI:\s*\d+\s+(.*?)\s+\(?\d{3}\)?[-\s]\d{3}-\d{4}").unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub line: String,
    pub city: String,
    pub zip: String,
}

pub fn provider_id(text: &str) -> Option<String> {
    PROVIDER_ID_RE.captures(text).map(|c| c[1].to_string())
}

pub fn npi(text: &str) -> Option<String> {
    NPI_RE.captures(text).map(|c| c[1].to_string())
}

pub fn phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// Street line, city and ZIP from the span after the NPI.
///
/// Assumes the span ends in `City ZIP`; anything shorter than three tokens gives `None`.
pub fn address(text: &str) -> Option<Address> {
    let caps = ADDRESS_RE.captures(text)?;
    let tokens: Vec<&str> = caps[1].split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }
    let n = tokens.len();
    Some(Address {
        line: tokens[..n - 2].join(" ").trim_end_matches(',').to_string(),
        city: tokens[n - 2].trim_end_matches(',').to_string(),
        zip: tokens[n - 1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: &str = "Smith, Jane A., MD, (F) Group Name: Bronx Care Provider ID: 4455 \
        NPI: 1234567890 123 Main St, Springfield 12345 (555) 123-4567";

    #[test]
    fn ids_and_phone() {
        assert_eq!(provider_id(UNIT).as_deref(), Some("4455"));
        assert_eq!(npi(UNIT).as_deref(), Some("1234567890"));
        assert_eq!(phone(UNIT).as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn address_splits_city_and_zip() {
        let addr = address(UNIT).unwrap();
        assert_eq!(addr.line, "123 Main St");
        assert_eq!(addr.city, "Springfield");
        assert_eq!(addr.zip, "12345");
    }

    #[test]
    fn dashed_phone_also_bounds_address() {
        let text = "NPI: 42 1 Grand Concourse Bronx, 10451 718-555-0100";
        let addr = address(text).unwrap();
        assert_eq!(addr.line, "1 Grand Concourse");
        assert_eq!(addr.city, "Bronx");
        assert_eq!(addr.zip, "10451");
    }

    #[test]
    fn no_phone_means_no_address() {
        let text = "Smith, Jane, MD, (F) NPI: 1234567890 123 Main St, Springfield 12345";
        assert_eq!(address(text), None);
        assert_eq!(phone(text), None);
    }

    #[test]
    fn too_few_tokens_means_no_address() {
        let text = "NPI: 1234567890 Springfield 12345 (555) 123-4567";
        assert_eq!(address(text), None);
    }
}
