use crate::error::PremiumError;
use crate::extraction::PageTextSource;
use std::path::Path;

/// Page separator written by pdftotext between pages.
pub const PAGE_SEPARATOR: char = '\x0c';

/// Report text held in memory, one string per page.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    pages: Vec<String>,
    backend: String,
}

impl TextDocument {
    pub fn from_pages(pages: Vec<String>, backend: &str) -> Self {
        TextDocument {
            pages,
            backend: backend.to_string(),
        }
    }

    /// Split text on form feeds into pages.
    ///
    /// The empty segment after a trailing form feed is not a page. Blank
    /// pages in the middle are kept so page numbers stay aligned.
    pub fn from_form_feed_text(text: &str, backend: &str) -> Self {
        let mut pages: Vec<String> = text
            .split(PAGE_SEPARATOR)
            .map(|p| p.to_string())
            .collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        TextDocument::from_pages(pages, backend)
    }

    /// Read pre-extracted text (pages separated by form feeds) from a file.
    pub fn open(path: &Path) -> Result<Self, PremiumError> {
        let text = std::fs::read_to_string(path)?;
        Ok(TextDocument::from_form_feed_text(&text, "text"))
    }
}

impl PageTextSource for TextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Result<String, PremiumError> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or_else(|| PremiumError::PageNotFound {
                page,
                page_count: self.pages.len(),
            })
    }

    fn backend_name(&self) -> &str {
        &self.backend
    }
}
