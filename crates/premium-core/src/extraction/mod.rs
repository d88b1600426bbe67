pub mod pdftotext;
pub mod text;

use crate::error::PremiumError;
pub use text::TextDocument;

/// Page-by-page plain text of a report.
pub trait PageTextSource {
    fn page_count(&self) -> usize;

    /// Text of a 1-based page; fails with `PageNotFound` past the last page.
    fn page_text(&self, page: usize) -> Result<String, PremiumError>;

    /// Name of the backend that produced the text (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the text of every page from PDF bytes.
    fn extract_document(&self, pdf_bytes: &[u8]) -> Result<TextDocument, PremiumError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
