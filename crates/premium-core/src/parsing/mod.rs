pub mod amount;

use crate::error::PremiumError;
use crate::model::TransactionType;
use amount::parse_amount;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker line that opens the subsection holding the extracted rows.
pub const DIRECT_BILLED: &str = "DIRECT BILLED";

/// Markers of the subsections that follow DIRECT BILLED on a page.
pub const SECTION_END_MARKERS: &[&str] = &["AGENCY BILLED"];

/// Position of the GROSS amount among the amounts following a row label.
///
/// Rows read `TRANS TYPE  GROSS  COMMISSION  NET  GROSS  COMMISSION  NET`.
pub const GROSS_COLUMN: usize = 0;

/// Amounts found on one page, keyed by transaction type in canonical order.
pub type PageAmounts = BTreeMap<TransactionType, Decimal>;

/// Fixed positions of the page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTemplate {
    pub section_marker: String,
    #[serde(default)]
    pub section_end_markers: Vec<String>,
    pub gross_column: usize,
}

impl Default for PageTemplate {
    fn default() -> Self {
        PageTemplate {
            section_marker: DIRECT_BILLED.to_string(),
            section_end_markers: SECTION_END_MARKERS.iter().map(|s| s.to_string()).collect(),
            gross_column: GROSS_COLUMN,
        }
    }
}

/// What happened to one target label on a page.
#[derive(Debug)]
pub enum CellOutcome {
    Found(Decimal),
    Missing,
    Failed(PremiumError),
}

#[derive(Debug)]
pub struct CellScan {
    pub transaction_type: TransactionType,
    pub outcome: CellOutcome,
}

/// Result of scanning a page, one entry per target label.
#[derive(Debug)]
pub enum PageScan {
    NoSubsection,
    Scanned(Vec<CellScan>),
}

/// Extract the GROSS amount of each target label from a page's DIRECT BILLED rows.
///
/// A page without the subsection yields an empty map. Labels that are not
/// listed are left out of the map. The first cell error is returned as is.
pub fn extract_page(
    page_text: &str,
    targets: &[TransactionType],
    template: &PageTemplate,
) -> Result<PageAmounts, PremiumError> {
    let mut amounts = PageAmounts::new();

    let cells = match scan_page(page_text, targets, template) {
        PageScan::NoSubsection => return Ok(amounts),
        PageScan::Scanned(cells) => cells,
    };

    for cell in cells {
        match cell.outcome {
            CellOutcome::Found(amount) => {
                amounts.insert(cell.transaction_type, amount);
            }
            CellOutcome::Missing => {}
            CellOutcome::Failed(e) => return Err(e),
        }
    }

    Ok(amounts)
}

/// Scan a page and report the outcome of every target label independently.
pub fn scan_page(
    page_text: &str,
    targets: &[TransactionType],
    template: &PageTemplate,
) -> PageScan {
    let Some(lines) = subsection_lines(page_text, template) else {
        return PageScan::NoSubsection;
    };

    let rows: Vec<Vec<&str>> = lines
        .iter()
        .map(|l| l.split_whitespace().collect())
        .filter(|tokens: &Vec<&str>| !tokens.is_empty())
        .collect();

    let cells = targets
        .iter()
        .map(|&transaction_type| {
            let outcome = match find_row(&rows, transaction_type) {
                None => CellOutcome::Missing,
                Some(tokens) => {
                    match gross_amount(transaction_type, tokens, template.gross_column) {
                        Ok(amount) => CellOutcome::Found(amount),
                        Err(e) => CellOutcome::Failed(e),
                    }
                }
            };
            CellScan {
                transaction_type,
                outcome,
            }
        })
        .collect();

    PageScan::Scanned(cells)
}

/// Lines after the section marker, up to the next section marker or end of page.
fn subsection_lines<'a>(page_text: &'a str, template: &PageTemplate) -> Option<Vec<&'a str>> {
    let marker = template.section_marker.as_str();
    let mut lines = page_text.lines();
    lines.by_ref().find(|line| line.contains(marker))?;

    let is_boundary = |line: &str| {
        line.contains(marker)
            || template
                .section_end_markers
                .iter()
                .any(|m| line.contains(m.as_str()))
    };

    Some(lines.take_while(|&line| !is_boundary(line)).collect())
}

/// Tokens following the first row whose leading tokens spell the label.
fn find_row<'r, 'a>(
    rows: &'r [Vec<&'a str>],
    transaction_type: TransactionType,
) -> Option<&'r [&'a str]> {
    let label: Vec<&str> = transaction_type.label().split_whitespace().collect();

    rows.iter()
        .find(|tokens| tokens.starts_with(&label))
        .map(|tokens| &tokens[label.len()..])
}

/// Group row tokens into amount columns; a standalone "CR" belongs to the amount before it.
fn amount_columns(tokens: &[&str]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match columns.last_mut() {
            Some(last) if token.eq_ignore_ascii_case("cr") => {
                last.push(' ');
                last.push_str(token);
            }
            _ => columns.push(token.to_string()),
        }
    }

    columns
}

fn gross_amount(
    transaction_type: TransactionType,
    tokens: &[&str],
    gross_column: usize,
) -> Result<Decimal, PremiumError> {
    let columns = amount_columns(tokens);
    debug!("{transaction_type}: columns {columns:?}");

    let raw = columns
        .get(gross_column)
        .ok_or_else(|| PremiumError::SubsectionUnparsable {
            label: transaction_type.label().to_string(),
            reason: format!(
                "expected at least {} amount column(s), found {}",
                gross_column + 1,
                columns.len()
            ),
        })?;

    parse_amount(raw)
}
