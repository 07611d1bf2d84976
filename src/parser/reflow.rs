/// Merge lines the layout engine wrapped mid-field.
///
/// A trimmed line ending in `,` is joined (space-separated) with the next non-blank
/// line, so a name split across a column break is rejoined. A trailing comma on the
/// very last line has nothing to join and is kept.
pub fn merge_continuations(text: &str) -> Vec<String> {
    let mut merged = Vec::new();
    let mut buffer = String::new();

    for line in text.split('\n') {
        let stripped = line.trim();
        if stripped.is_empty() && !buffer.is_empty() {
            continue;
        }
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(stripped);

        if !stripped.ends_with(',') {
            merged.push(std::mem::take(&mut buffer));
        }
    }

    if !buffer.is_empty() {
        merged.push(buffer);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_comma_terminated_lines() {
        let text = "Smith,\nJane, MD, (F)\nNPI: 123";
        assert_eq!(
            merge_continuations(text),
            ["Smith, Jane, MD, (F)", "NPI: 123"]
        );
    }

    #[test]
    fn chains_several_continuations() {
        let text = "Rivera,\nAna,\nNP, (F)";
        assert_eq!(merge_continuations(text), ["Rivera, Ana, NP, (F)"]);
    }

    #[test]
    fn trailing_comma_at_end_is_kept() {
        let text = "first\nlast,";
        assert_eq!(merge_continuations(text), ["first", "last,"]);
    }

    #[test]
    fn blank_lines_survive_as_empty_entries() {
        let text = "column one\n\ncolumn two";
        assert_eq!(merge_continuations(text), ["column one", "", "column two"]);
    }

    #[test]
    fn merging_is_idempotent() {
        let text = std::fs::read_to_string("tests/fixtures/bronx_columns.txt").unwrap();
        let once = merge_continuations(&text);
        let twice = merge_continuations(&once.join("\n"));
        assert_eq!(once, twice);
        assert!(once.iter().all(|l| !l.trim().ends_with(',')));
    }

    #[test]
    fn continuation_crosses_column_break() {
        let text = "Doe, John, DO, (M)\nNPI: 1\nSmith,\n\nJane, MD, (F)";
        let once = merge_continuations(text);
        assert_eq!(
            once,
            ["Doe, John, DO, (M)", "NPI: 1", "Smith, Jane, MD, (F)"]
        );
        assert_eq!(merge_continuations(&once.join("\n")), once);
    }

    #[test]
    fn blank_lines_after_trailing_comma_at_end() {
        assert_eq!(merge_continuations("first\nlast,\n\n"), ["first", "last,"]);
    }
}
