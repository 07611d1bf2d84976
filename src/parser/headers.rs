use super::layout::PageLayout;

/// A run of large-font words, e.g. `Cardiology / Interventional`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub text: String,
}

impl HeaderLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Text before the first `/`; the rest is a sub-specialty suffix.
    pub fn specialty(&self) -> &str {
        self.text.split('/').next().unwrap_or_default().trim()
    }
}

/// Collect header lines from a page: consecutive words at or above `threshold`.
///
/// Any word below the threshold (or without a size) ends the current run.
pub fn detect_headers(page: &impl PageLayout, threshold: f32) -> Vec<HeaderLine> {
    let mut headers = Vec::new();
    let mut run: Vec<String> = Vec::new();

    for word in page.words() {
        if word.size.unwrap_or(0.0) >= threshold {
            run.push(word.text);
        } else if !run.is_empty() {
            flush(&mut run, &mut headers);
        }
    }
    flush(&mut run, &mut headers);

    headers
}

fn flush(run: &mut Vec<String>, headers: &mut Vec<HeaderLine>) {
    let text = run.join(" ").trim().to_string();
    run.clear();
    if !text.is_empty() {
        headers.push(HeaderLine { text });
    }
}
