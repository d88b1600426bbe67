pub mod builtin;
pub mod schema;

use crate::error::PremiumError;
use schema::ReportLayout;
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<ReportLayout, PremiumError> {
    let content = std::fs::read_to_string(path).map_err(|e| PremiumError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<ReportLayout, PremiumError> {
    let layout: ReportLayout = serde_json::from_str(json).map_err(|e| PremiumError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<ReportLayout, PremiumError> {
    let layout: ReportLayout = serde_json::from_str(json).map_err(PremiumError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &ReportLayout) -> Result<(), PremiumError> {
    if layout.template.section_marker.trim().is_empty() {
        return Err(PremiumError::LayoutInvalid(
            "section_marker must not be empty".into(),
        ));
    }

    if layout
        .template
        .section_end_markers
        .iter()
        .any(|m| m.trim().is_empty())
    {
        return Err(PremiumError::LayoutInvalid(
            "section_end_markers must not contain empty markers".into(),
        ));
    }

    if layout.transaction_types.is_empty() {
        return Err(PremiumError::LayoutInvalid(
            "transaction_types must not be empty".into(),
        ));
    }

    let mut seen_types = HashSet::new();
    for t in &layout.transaction_types {
        if !seen_types.insert(t) {
            return Err(PremiumError::LayoutInvalid(format!(
                "transaction type '{}' is listed twice",
                t
            )));
        }
    }

    if layout.divisions.is_empty() {
        return Err(PremiumError::LayoutInvalid(
            "divisions must not be empty".into(),
        ));
    }

    let mut seen_pages = HashSet::new();
    for division in &layout.divisions {
        if division.page == 0 {
            return Err(PremiumError::LayoutInvalid(format!(
                "division '{}' has page 0 (pages are numbered from 1)",
                division.label
            )));
        }

        if division.label.trim().is_empty() {
            return Err(PremiumError::LayoutInvalid(format!(
                "division on page {} has an empty label",
                division.page
            )));
        }

        if !seen_pages.insert(division.page) {
            return Err(PremiumError::LayoutInvalid(format!(
                "page {} is assigned to more than one division",
                division.page
            )));
        }

        if layout.skipped_pages.contains(&division.page) {
            return Err(PremiumError::LayoutInvalid(format!(
                "page {} ('{}') is both a division and a skipped page",
                division.page, division.label
            )));
        }
    }

    Ok(())
}
