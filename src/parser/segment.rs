use std::sync::LazyLock;

use regex::Regex;

use super::headers::HeaderLine;

pub static GENDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([MF]\)").unwrap());

pub const SPECIALTY_LABEL: &str = "Provider Specialty:";
pub const CATEGORY_LABEL: &str = "Provider Category:";

/// Split reflowed lines into provider units, each opened by a gender-marker line.
///
/// Text before the first marker becomes a leading unit of its own; the field parser
/// drops it later since it carries no marker.
pub fn split_units<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if GENDER_RE.is_match(line) {
            if !current.trim().is_empty() {
                units.push(current.trim().to_string());
            }
            current = line.to_string();
        } else {
            current.push(' ');
            current.push_str(line);
        }
    }

    if !current.trim().is_empty() {
        units.push(current.trim().to_string());
    }

    units
}

/// Header carried from one unit to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtyState {
    pub current: Option<HeaderLine>,
}

impl SpecialtyState {
    /// One fold step: annotate `unit` with the header carried so far, then look for a
    /// new header inside it. A header found in unit *i* first applies to unit *i+1*.
    pub fn step(self, unit: &str, headers: &[HeaderLine]) -> (SpecialtyState, String) {
        let mut text = unit.to_string();
        if let Some(h) = &self.current {
            text.push('\n');
            text.push_str(SPECIALTY_LABEL);
            text.push(' ');
            text.push_str(h.specialty());
        }

        let found = headers
            .iter()
            .find(|h| self.current.as_ref() != Some(*h) && text.contains(h.text.as_str()));

        match found {
            Some(h) => {
                let text = text.replace(h.text.as_str(), "");
                (
                    SpecialtyState {
                        current: Some(h.clone()),
                    },
                    text,
                )
            }
            None => (self, text),
        }
    }
}

/// Run the specialty fold over every unit in order.
pub fn assign_specialties(units: Vec<String>, headers: &[HeaderLine]) -> Vec<String> {
    let mut state = SpecialtyState::default();
    let mut annotated = Vec::with_capacity(units.len());
    for unit in &units {
        let (next, text) = state.step(unit, headers);
        state = next;
        annotated.push(text);
    }
    annotated
}

pub fn append_category(unit: &mut String, category: &str) {
    unit.push('\n');
    unit.push_str(CATEGORY_LABEL);
    unit.push(' ');
    unit.push_str(category);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<HeaderLine> {
        names.iter().map(|n| HeaderLine::new(*n)).collect()
    }

    #[test]
    fn one_unit_per_gender_marker() {
        let lines = [
            "Smith, Jane, MD, (F)",
            "Group Name: Bronx Care",
            "",
            "Doe, John, DO, (M)",
            "NPI: 1234567890",
            "Lee, Kim, NP, (F)",
        ];
        let units = split_units(&lines);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0], "Smith, Jane, MD, (F) Group Name: Bronx Care");
        assert_eq!(units[1], "Doe, John, DO, (M) NPI: 1234567890");
        assert_eq!(units[2], "Lee, Kim, NP, (F)");
    }

    #[test]
    fn no_markers_yields_one_unparsable_unit() {
        let lines = ["Provider Directory", "Bronx County"];
        let units = split_units(&lines);
        assert_eq!(units, ["Provider Directory Bronx County"]);
        assert!(units.iter().all(|u| !GENDER_RE.is_match(u)));
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let lines: [&str; 2] = ["", "   "];
        assert!(split_units(&lines).is_empty());
    }

    #[test]
    fn preamble_before_first_marker_is_its_own_unit() {
        let lines = ["Family Practice", "Smith, Jane, MD, (F)", "Doe, John, DO, (M)"];
        let units = split_units(&lines);
        assert_eq!(units.len(), 3);
        assert_eq!(
            units.iter().filter(|u| GENDER_RE.is_match(u)).count(),
            2
        );
    }

    #[test]
    fn specialty_lags_one_unit_behind_detection() {
        let units = vec![
            "A, B, MD, (F) Cardiology".to_string(),
            "C, D, MD, (M) Neurology".to_string(),
            "E, F, MD, (F)".to_string(),
        ];
        let out = assign_specialties(units, &headers(&["Cardiology", "Neurology"]));
        assert!(!out[0].contains(SPECIALTY_LABEL));
        assert!(out[1].ends_with("Provider Specialty: Cardiology"));
        assert!(out[2].ends_with("Provider Specialty: Neurology"));
    }

    #[test]
    fn matched_header_text_is_removed() {
        let units = vec!["A, B, MD, (F) Pediatrics NPI: 1".to_string()];
        let out = assign_specialties(units, &headers(&["Pediatrics"]));
        assert_eq!(out[0], "A, B, MD, (F)  NPI: 1");
    }

    #[test]
    fn current_header_is_not_matched_again() {
        let hs = headers(&["Cardiology"]);
        let state = SpecialtyState {
            current: Some(HeaderLine::new("Cardiology")),
        };
        let (next, text) = state.step("A, B, MD, (F) Cardiology", &hs);
        assert_eq!(next.current, Some(HeaderLine::new("Cardiology")));
        // annotation appended, literal left in place
        assert!(text.starts_with("A, B, MD, (F) Cardiology\n"));
    }

    #[test]
    fn annotation_uses_text_before_slash() {
        let hs = headers(&["Obstetrics / Gynecology"]);
        let (state, _) = SpecialtyState::default().step("A, B, MD, (F) Obstetrics / Gynecology", &hs);
        let (_, text) = state.step("C, D, MD, (M)", &hs);
        assert_eq!(text, "C, D, MD, (M)\nProvider Specialty: Obstetrics");
    }

    #[test]
    fn category_line_is_appended() {
        let mut unit = "A, B, MD, (F)".to_string();
        append_category(&mut unit, "PCP");
        assert_eq!(unit, "A, B, MD, (F)\nProvider Category: PCP");
    }
}
