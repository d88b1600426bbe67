use premium_core::error::PremiumError;
use premium_core::layout::builtin;
use premium_core::layout::schema::ReportLayout;
use std::path::Path;

pub fn load(layout_file: Option<&Path>) -> Result<ReportLayout, PremiumError> {
    match layout_file {
        Some(path) => premium_core::layout::load_layout(path),
        None => builtin::default_layout(),
    }
}

pub fn show(layout_file: Option<&Path>) -> Result<(), PremiumError> {
    let layout = load(layout_file)?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

pub fn validate(path: &Path) -> Result<(), PremiumError> {
    let layout = premium_core::layout::load_layout(path)?;
    println!(
        "Valid layout: {} (v{}), {} division(s), {} transaction type(s), GROSS column {}",
        layout.name,
        layout.version,
        layout.divisions.len(),
        layout.transaction_types.len(),
        layout.template.gross_column
    );
    Ok(())
}
