pub mod columns;
pub mod extract;
pub mod headers;
pub mod layout;
pub mod reflow;
pub mod segment;

use rayon::prelude::*;
use tracing::debug;

use crate::config::ColumnRegion;
use extract::{ParseDefaults, ProviderRecord};
use headers::HeaderLine;
use layout::PageLayout;

/// Everything one (file, pages, category) job produces.
#[derive(Debug, Default)]
pub struct JobOutput {
    pub headers: Vec<HeaderLine>,
    /// Annotated unit texts, including ones the field parser dropped.
    pub units: Vec<String>,
    pub records: Vec<ProviderRecord>,
}

/// Pipeline: pages → (headers, column text) → reflowed lines → units → records.
pub fn process_pages<P: PageLayout>(
    pages: &[P],
    columns: &[ColumnRegion],
    threshold: f32,
    defaults: &ParseDefaults,
) -> JobOutput {
    let mut headers = Vec::new();
    let mut blobs = Vec::new();

    for page in pages {
        let page_headers = headers::detect_headers(page, threshold);
        let page_blobs = columns::extract_column_text(page, columns);
        debug!(
            page = page.number(),
            headers = page_headers.len(),
            columns = page_blobs.len(),
            "Extracted page"
        );
        headers.extend(page_headers);
        blobs.extend(page_blobs);
    }

    process_text(&blobs, headers, defaults)
}

/// Text half of the pipeline, starting from column blobs already in reading order.
pub fn process_text(
    blobs: &[String],
    headers: Vec<HeaderLine>,
    defaults: &ParseDefaults,
) -> JobOutput {
    let combined = blobs.join("\n\n");
    let lines = reflow::merge_continuations(&combined);
    let units = segment::split_units(&lines);
    let mut units = segment::assign_specialties(units, &headers);
    for unit in &mut units {
        segment::append_category(unit, &defaults.category);
    }

    let records: Vec<ProviderRecord> = units
        .par_iter()
        .filter_map(|u| extract::parse_unit(u, defaults))
        .collect();

    debug!(
        category = %defaults.category,
        lines = lines.len(),
        units = units.len(),
        records = records.len(),
        "Segmented job"
    );

    JobOutput {
        headers,
        units,
        records,
    }
}

// ── Tests ──
