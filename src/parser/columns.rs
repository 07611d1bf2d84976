use crate::config::ColumnRegion;

use super::layout::PageLayout;

/// Text of each column region in declared order, trimmed; empty regions are skipped.
pub fn extract_column_text(page: &impl PageLayout, columns: &[ColumnRegion]) -> Vec<String> {
    columns
        .iter()
        .map(|region| page.region_text(region).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COLUMNS;
    use crate::parser::layout::testing::column;
    use crate::parser::layout::Page;

    #[test]
    fn columns_come_back_left_to_right() {
        let mut glyphs = column(&["Right A"], 420.0, 100.0, 9.0);
        glyphs.extend(column(&["Left A", "Left B"], 10.0, 100.0, 9.0));
        glyphs.extend(column(&["Middle A"], 240.0, 100.0, 9.0));
        let page = Page::new(1, 612.0, 792.0, glyphs);

        let blobs = extract_column_text(&page, &DEFAULT_COLUMNS);
        assert_eq!(blobs, ["Left A\nLeft B", "Middle A", "Right A"]);
    }

    #[test]
    fn empty_columns_are_omitted() {
        let glyphs = column(&["Only right"], 420.0, 100.0, 9.0);
        let page = Page::new(1, 612.0, 792.0, glyphs);
        assert_eq!(extract_column_text(&page, &DEFAULT_COLUMNS), ["Only right"]);
    }

    #[test]
    fn text_outside_regions_is_ignored() {
        // page banner above the column band
        let mut glyphs = column(&["Provider Directory"], 10.0, 20.0, 9.0);
        glyphs.extend(column(&["Body"], 10.0, 100.0, 9.0));
        let page = Page::new(1, 612.0, 792.0, glyphs);
        assert_eq!(extract_column_text(&page, &DEFAULT_COLUMNS), ["Body"]);
    }
}
