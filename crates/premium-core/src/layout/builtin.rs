use crate::error::PremiumError;
use crate::layout::schema::ReportLayout;
use crate::layout::validate_layout;

const PREMIUM_TRANSACTIONS_JSON: &str =
    include_str!("../../../../layouts/premium-transactions.json");

/// The built-in premium transaction report layout, used when none is given.
pub fn default_layout() -> Result<ReportLayout, PremiumError> {
    let layout: ReportLayout = serde_json::from_str(PREMIUM_TRANSACTIONS_JSON)?;
    validate_layout(&layout)?;
    Ok(layout)
}
