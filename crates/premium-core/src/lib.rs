pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;

use error::PremiumError;
use extraction::{PageTextSource, PdfExtractor};
use layout::schema::ReportLayout;
use log::{debug, warn};
use model::{Division, ExtractedRow, ExtractionFailure, ExtractionReport, FailureKind, Gap};
use parsing::{CellOutcome, PageScan};

/// Main API entry point: extract GROSS amounts from a PDF report.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: &ReportLayout,
) -> Result<ExtractionReport, PremiumError> {
    let document = extractor.extract_document(pdf_bytes)?;
    Ok(extract_report(&document, layout))
}

/// Extract every division page named by the layout.
///
/// A failing page or cell never stops the run: it is recorded in
/// `failures` and the remaining pages and labels are still processed.
/// Labels absent from a division's DIRECT BILLED rows are recorded as `gaps`.
pub fn extract_report(source: &dyn PageTextSource, layout: &ReportLayout) -> ExtractionReport {
    let mut report = ExtractionReport {
        layout: layout.name.clone(),
        skipped_pages: layout.skipped_pages.clone(),
        ..Default::default()
    };

    debug!(
        "extracting {} division(s) from {} page(s) via {}",
        layout.divisions.len(),
        source.page_count(),
        source.backend_name()
    );

    for division in &layout.divisions {
        let text = match source.page_text(division.page) {
            Ok(text) => text,
            Err(e) => {
                warn!("page {} ({}): {}", division.page, division.label, e);
                report.failures.push(page_failure(division, FailureKind::from(&e), &e));
                continue;
            }
        };

        let cells = match parsing::scan_page(&text, &layout.transaction_types, &layout.template) {
            PageScan::Scanned(cells) => cells,
            PageScan::NoSubsection => {
                warn!(
                    "page {} ({}): no '{}' subsection",
                    division.page, division.label, layout.template.section_marker
                );
                report.failures.push(ExtractionFailure {
                    page: division.page,
                    division: division.label.clone(),
                    transaction_type: None,
                    kind: FailureKind::MissingSubsection,
                    message: format!("no '{}' subsection", layout.template.section_marker),
                });
                continue;
            }
        };

        for cell in cells {
            match cell.outcome {
                CellOutcome::Found(amount) => {
                    debug!(
                        "page {} ({}): {} = {}",
                        division.page, division.label, cell.transaction_type, amount
                    );
                    report.rows.push(ExtractedRow {
                        division: division.label.clone(),
                        page: division.page,
                        transaction_type: cell.transaction_type,
                        amount,
                    });
                }
                CellOutcome::Missing => {
                    warn!(
                        "page {} ({}): {} not listed",
                        division.page, division.label, cell.transaction_type
                    );
                    report.gaps.push(Gap {
                        page: division.page,
                        division: division.label.clone(),
                        transaction_type: cell.transaction_type,
                    });
                }
                CellOutcome::Failed(e) => {
                    warn!(
                        "page {} ({}): {}: {}",
                        division.page, division.label, cell.transaction_type, e
                    );
                    report.failures.push(ExtractionFailure {
                        transaction_type: Some(cell.transaction_type),
                        ..page_failure(division, FailureKind::from(&e), &e)
                    });
                }
            }
        }
    }

    report
}

fn page_failure(division: &Division, kind: FailureKind, err: &PremiumError) -> ExtractionFailure {
    ExtractionFailure {
        page: division.page,
        division: division.label.clone(),
        transaction_type: None,
        kind,
        message: err.to_string(),
    }
}
