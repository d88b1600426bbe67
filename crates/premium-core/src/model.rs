use crate::error::PremiumError;
use crate::parsing::amount::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction categories listed on every division page.
///
/// Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "NEW POLICIES")]
    NewPolicies,
    #[serde(rename = "REWRITES")]
    Rewrites,
    #[serde(rename = "ADDED PREMIUM")]
    AddedPremium,
    #[serde(rename = "RETURN PREMIUM")]
    ReturnPremium,
    #[serde(rename = "RENEWALS")]
    Renewals,
    #[serde(rename = "CANCELLATIONS")]
    Cancellations,
}

impl TransactionType {
    pub const ALL: [TransactionType; 6] = [
        TransactionType::NewPolicies,
        TransactionType::Rewrites,
        TransactionType::AddedPremium,
        TransactionType::ReturnPremium,
        TransactionType::Renewals,
        TransactionType::Cancellations,
    ];

    /// Label exactly as printed at the start of a report row.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::NewPolicies => "NEW POLICIES",
            TransactionType::Rewrites => "REWRITES",
            TransactionType::AddedPremium => "ADDED PREMIUM",
            TransactionType::ReturnPremium => "RETURN PREMIUM",
            TransactionType::Renewals => "RENEWALS",
            TransactionType::Cancellations => "CANCELLATIONS",
        }
    }

    /// Column heading used in the one-row-per-division CSV.
    pub fn title(&self) -> &'static str {
        match self {
            TransactionType::NewPolicies => "New Policies",
            TransactionType::Rewrites => "Rewrites",
            TransactionType::AddedPremium => "Added Premium",
            TransactionType::ReturnPremium => "Return Premium",
            TransactionType::Renewals => "Renewals",
            TransactionType::Cancellations => "Cancellations",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An organizational unit, reported on a single page of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    /// 1-based page number.
    pub page: usize,
    pub label: String,
}

/// One extracted GROSS amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRow {
    pub division: String,
    pub page: usize,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
}

/// Output row handed to writers: the amount is already in canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRecord {
    pub division: String,
    pub transaction_type: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PageNotFound,
    MissingSubsection,
    MalformedAmount,
    SubsectionUnparsable,
    Extraction,
}

impl From<&PremiumError> for FailureKind {
    fn from(err: &PremiumError) -> Self {
        match err {
            PremiumError::PageNotFound { .. } => FailureKind::PageNotFound,
            PremiumError::MalformedAmount { .. } => FailureKind::MalformedAmount,
            PremiumError::SubsectionUnparsable { .. } => FailureKind::SubsectionUnparsable,
            _ => FailureKind::Extraction,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::PageNotFound => "page not found",
            FailureKind::MissingSubsection => "missing subsection",
            FailureKind::MalformedAmount => "malformed amount",
            FailureKind::SubsectionUnparsable => "unparsable subsection",
            FailureKind::Extraction => "extraction error",
        };
        write!(f, "{s}")
    }
}

/// A failure attributed to a page, and to a transaction type when it concerns one cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub page: usize,
    pub division: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    pub kind: FailureKind,
    pub message: String,
}

/// A transaction type that was not listed in a division's DIRECT BILLED rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub page: usize,
    pub division: String,
    pub transaction_type: TransactionType,
}

/// Everything produced by one run over a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub layout: String,
    pub rows: Vec<ExtractedRow>,
    #[serde(default)]
    pub gaps: Vec<Gap>,
    #[serde(default)]
    pub failures: Vec<ExtractionFailure>,
    /// Pages excluded by the layout; never scanned.
    #[serde(default)]
    pub skipped_pages: Vec<usize>,
}

impl ExtractionReport {
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.failures.is_empty()
    }

    pub fn amount(&self, division: &str, transaction_type: TransactionType) -> Option<Decimal> {
        self.rows
            .iter()
            .find(|r| r.division == division && r.transaction_type == transaction_type)
            .map(|r| r.amount)
    }

    /// Divisions that produced at least one row, in extraction order.
    pub fn divisions(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !out.contains(&row.division.as_str()) {
                out.push(&row.division);
            }
        }
        out
    }

    pub fn records(&self) -> Vec<RowRecord> {
        self.rows
            .iter()
            .map(|r| RowRecord {
                division: r.division.clone(),
                transaction_type: r.transaction_type.label().to_string(),
                amount: format_amount(r.amount),
            })
            .collect()
    }
}
