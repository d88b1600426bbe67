use crate::model::{Division, TransactionType};
use crate::parsing::PageTemplate;
use serde::{Deserialize, Serialize};

/// Where the amounts of a report live: which pages, which rows, which column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(flatten)]
    pub template: PageTemplate,
    /// Rows to extract from every division page.
    pub transaction_types: Vec<TransactionType>,
    /// Division pages, in output order.
    pub divisions: Vec<Division>,
    /// Pages deliberately left out of extraction.
    #[serde(default)]
    pub skipped_pages: Vec<usize>,
    #[serde(default)]
    pub skipped_note: Option<String>,
}
