use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Accessibility legend printed on every directory page.
pub const ADA_LEGEND: &[(&str, &str)] = &[
    ("W", "Wheelchair"),
    ("PT", "Public Transportation nearby"),
    ("B", "Board Certified"),
    ("P", "Parking"),
    ("EB", "Exterior Building"),
    ("IB", "Interior Building"),
    ("R", "Restroom"),
    ("E", "Exam Room"),
    ("T", "Exam Table/Scale/Chairs"),
    ("G", "Gurneys & Stretchers"),
    ("PL", "Portable Lifts"),
    ("RE", "Radiologic Equipment"),
    ("S", "Signage & Documents"),
];

static ADA_RE: LazyLock<Regex> = LazyLock::new(|| {
    let codes = ADA_LEGEND
        .iter()
        .map(|(code, _)| *code)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({codes})\b")).unwrap()
});

pub fn describe(code: &str) -> Option<&'static str> {
    ADA_LEGEND
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, meaning)| *meaning)
}

/// Expanded meanings of every standalone legend code, deduplicated and sorted.
pub fn ada_features(text: &str) -> Vec<String> {
    ADA_RE
        .find_iter(text)
        .filter_map(|m| describe(m.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_codes_are_deduplicated() {
        assert_eq!(ada_features("W W B"), ["Board Certified", "Wheelchair"]);
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(ada_features("B W"), ada_features("W B W"));
    }

    #[test]
    fn two_letter_codes_win_over_prefixes() {
        assert_eq!(
            ada_features("PL PT"),
            ["Portable Lifts", "Public Transportation nearby"]
        );
    }

    #[test]
    fn codes_inside_words_are_ignored() {
        assert!(ada_features("Webster Avenue Bronx").is_empty());
    }

    #[test]
    fn every_code_has_a_meaning() {
        for (code, meaning) in ADA_LEGEND {
            assert_eq!(describe(code), Some(*meaning));
        }
        assert_eq!(describe("X"), None);
    }
}
