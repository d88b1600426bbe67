use premium_core::error::PremiumError;
use premium_core::layout::schema::ReportLayout;
use premium_core::model::ExtractionReport;
use premium_core::parsing::amount::format_amount_compact;
use std::fs::File;
use std::io;
use std::path::Path;

pub const ROW_HEADERS: [&str; 3] = ["Division", "Transaction Type", "Amount"];

/// First column of the one-row-per-division format.
pub const WIDE_DIVISION_HEADER: &str = "Company";

/// Write one record per extracted amount, amounts in canonical form.
pub fn write_rows<W: io::Write>(report: &ExtractionReport, writer: W) -> Result<(), PremiumError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(ROW_HEADERS).map_err(output_error)?;
    for record in report.records() {
        wtr.write_record([&record.division, &record.transaction_type, &record.amount])
            .map_err(output_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one record per division with a column per transaction type.
///
/// Zero renders as ".00" as in the source report. Amounts that were not
/// extracted are left empty rather than filled with zero.
pub fn write_wide<W: io::Write>(
    report: &ExtractionReport,
    layout: &ReportLayout,
    writer: W,
) -> Result<(), PremiumError> {
    let mut wtr = ::csv::Writer::from_writer(writer);

    let mut header = vec![WIDE_DIVISION_HEADER.to_string()];
    header.extend(layout.transaction_types.iter().map(|t| t.title().to_string()));
    wtr.write_record(&header).map_err(output_error)?;

    let extracted = report.divisions();
    for division in &layout.divisions {
        if !extracted.contains(&division.label.as_str()) {
            continue;
        }
        let mut record = vec![division.label.clone()];
        record.extend(layout.transaction_types.iter().map(|&t| {
            report
                .amount(&division.label, t)
                .map(format_amount_compact)
                .unwrap_or_default()
        }));
        wtr.write_record(&record).map_err(output_error)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_rows(report: &ExtractionReport, path: &Path) -> Result<(), PremiumError> {
    write_rows(report, create_output(path)?)
}

pub fn save_wide(
    report: &ExtractionReport,
    layout: &ReportLayout,
    path: &Path,
) -> Result<(), PremiumError> {
    write_wide(report, layout, create_output(path)?)
}

fn create_output(path: &Path) -> Result<File, PremiumError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

fn output_error(e: ::csv::Error) -> PremiumError {
    PremiumError::Output(e.to_string())
}
