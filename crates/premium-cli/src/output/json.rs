use premium_core::error::PremiumError;
use premium_core::model::ExtractionReport;

pub fn print(report: &ExtractionReport) -> Result<(), PremiumError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
