use premium_core::error::PremiumError;
use premium_core::extraction::pdftotext::PdftotextExtractor;
use premium_core::extraction::TextDocument;
use premium_core::model::ExtractionReport;
use std::path::PathBuf;

use crate::commands::layout;
use crate::output;
use crate::PrintFormat;

pub fn run(
    input_file: PathBuf,
    output_file: Option<PathBuf>,
    output_format: PrintFormat,
    wide: bool,
    layout_file: Option<PathBuf>,
    strict: bool,
) -> Result<(), PremiumError> {
    let layout = layout::load(layout_file.as_deref())?;

    // Determine input type by extension
    let is_text = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    let report = if is_text {
        let document = TextDocument::open(&input_file)?;
        premium_core::extract_report(&document, &layout)
    } else {
        let pdf_bytes = std::fs::read(&input_file)?;
        let extractor = PdftotextExtractor::new();
        premium_core::extract_pdf(&pdf_bytes, &extractor, &layout)?
    };

    report_issues(&report);

    if report.rows.is_empty() {
        return Err(PremiumError::NoData);
    }

    match output_file {
        Some(path) => {
            if wide {
                output::csv::save_wide(&report, &layout, &path)?;
            } else {
                output::csv::save_rows(&report, &path)?;
            }
            eprintln!(
                "Extracted {} amount(s) for {} division(s), written to {}",
                report.rows.len(),
                report.divisions().len(),
                path.display()
            );
        }
        None => match output_format {
            PrintFormat::Json => output::json::print(&report)?,
            PrintFormat::Table => {
                print!("{}", output::table::format_report(&report, &layout));
            }
        },
    }

    if strict && !report.is_clean() {
        return Err(PremiumError::Incomplete {
            failures: report.failures.len(),
            gaps: report.gaps.len(),
        });
    }

    Ok(())
}

/// Print failures and gaps so a partial result is never silent.
fn report_issues(report: &ExtractionReport) {
    for f in &report.failures {
        match f.transaction_type {
            Some(t) => eprintln!(
                "  failure: page {} ({}), {}: {}",
                f.page, f.division, t, f.message
            ),
            None => eprintln!("  failure: page {} ({}): {}", f.page, f.division, f.message),
        }
    }
    for g in &report.gaps {
        eprintln!(
            "  missing: page {} ({}), {} not listed",
            g.page, g.division, g.transaction_type
        );
    }
}
