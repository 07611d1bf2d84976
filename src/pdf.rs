use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pdfium_render::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::parser::layout::{Glyph, Page};

const PDFIUM_DIR_ENV: &str = "PDFIUM_LIB_DIR";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to open {path}: {message}")]
    Open { path: PathBuf, message: String },
    #[error("{path}: page {page} not found (document has {count} pages)")]
    PageOutOfRange {
        path: PathBuf,
        page: usize,
        count: usize,
    },
    #[error("{path}: failed to read page {page}: {message}")]
    Page {
        path: PathBuf,
        page: usize,
        message: String,
    },
}

/// Bound pdfium library; opens documents for the runner.
pub struct PdfSource {
    pdfium: Pdfium,
}

impl PdfSource {
    /// Bind pdfium from `$PDFIUM_LIB_DIR` (default `./`), falling back to the system library.
    pub fn bind() -> Result<Self> {
        let dir = std::env::var(PDFIUM_DIR_ENV).unwrap_or_else(|_| "./".to_string());
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
                .or_else(|_| Pdfium::bind_to_system_library())
                .context("Failed to bind pdfium library")?,
        );
        debug!(dir = %dir, "Bound pdfium");
        Ok(Self { pdfium })
    }

    /// Open a document. The handle is released when the returned value is dropped.
    pub fn open(&self, path: &Path) -> Result<Document<'_>, SourceError> {
        if !path.exists() {
            return Err(SourceError::Missing(path.to_path_buf()));
        }
        let doc = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| SourceError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let doc = Document {
            path: path.to_path_buf(),
            doc,
        };
        info!(path = %path.display(), pages = doc.page_count(), "Opened document");
        Ok(doc)
    }
}

pub struct Document<'a> {
    path: PathBuf,
    doc: PdfDocument<'a>,
}

impl Document<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.doc.pages().len() as usize
    }

    /// Load a 1-based page as positioned glyphs.
    pub fn page(&self, number: usize) -> Result<Page, SourceError> {
        let count = self.page_count();
        if number == 0 || number > count {
            return Err(SourceError::PageOutOfRange {
                path: self.path.clone(),
                page: number,
                count,
            });
        }
        let page_err = |message: String| SourceError::Page {
            path: self.path.clone(),
            page: number,
            message,
        };

        let page = self
            .doc
            .pages()
            .get((number - 1) as PdfPageIndex)
            .map_err(|e| page_err(e.to_string()))?;
        let width = page.width().value;
        let height = page.height().value;
        let text = page
            .text()
            .map_err(|e| page_err(format!("Failed to get page text: {e}")))?;

        let mut glyphs = Vec::new();
        for ch in text.chars().iter() {
            let Some(c) = ch.unicode_char() else {
                continue;
            };
            let Ok(bounds) = ch.loose_bounds() else {
                continue;
            };
            glyphs.push(glyph_from_pdf_bounds(
                c,
                [
                    bounds.left().value,
                    bounds.top().value,
                    bounds.right().value,
                    bounds.bottom().value,
                ],
                height,
                ch.scaled_font_size().value,
            ));
        }
        debug!(page = number, glyphs = glyphs.len(), "Loaded page");

        Ok(Page::new(number, width, height, glyphs))
    }
}

/// Convert bottom-left-origin `[left, top, right, bottom]` bounds to a top-left glyph.
/// A zero font size means pdfium could not report one.
fn glyph_from_pdf_bounds(ch: char, bounds: [f32; 4], page_height: f32, size: f32) -> Glyph {
    let [left, top, right, bottom] = bounds;
    Glyph {
        ch,
        x0: left,
        top: page_height - top,
        x1: right,
        bottom: page_height - bottom,
        size: (size > 0.0).then_some(size),
    }
}
