use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PremiumError {
    #[error("page {page} not found (document has {page_count} page(s))")]
    PageNotFound { page: usize, page_count: usize },

    #[error("malformed amount '{raw}'")]
    MalformedAmount { raw: String },

    #[error("cannot read columns for '{label}': {reason}")]
    SubsectionUnparsable { label: String, reason: String },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("no transaction amounts were extracted from the report")]
    NoData,

    #[error("extraction incomplete: {failures} failure(s), {gaps} missing amount(s)")]
    Incomplete { failures: usize, gaps: usize },

    #[error("failed to write output: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
