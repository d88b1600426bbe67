//! Integration tests for the extract_report() pipeline.
//!
//! Uses a MockSource that serves pre-built page text without invoking
//! pdftotext, so these tests run without poppler-utils.

use premium_core::error::PremiumError;
use premium_core::extract_pdf;
use premium_core::extract_report;
use premium_core::extraction::{PageTextSource, PdfExtractor, TextDocument};
use premium_core::layout::builtin::default_layout;
use premium_core::model::{FailureKind, TransactionType};
use rust_decimal_macros::dec;

struct MockSource {
    pages: Vec<String>,
}

impl PageTextSource for MockSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Result<String, PremiumError> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or(PremiumError::PageNotFound {
                page,
                page_count: self.pages.len(),
            })
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct MockExtractor {
    text: String,
}

impl PdfExtractor for MockExtractor {
    fn extract_document(&self, _pdf_bytes: &[u8]) -> Result<TextDocument, PremiumError> {
        Ok(TextDocument::from_form_feed_text(&self.text, "mock"))
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn division_page(page: usize, lines: &[&str]) -> String {
    let mut text = format!(
        "PREMIUM TRANSACTION REPORT - PAGE {page}\nInsurance Division {page}\nDIRECT BILLED\n\
         TRANS TYPE          GROSS      COMMISSION      NET      GROSS      COMMISSION      NET\n"
    );
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("\nAGENCY BILLED\n");
    for t in TransactionType::ALL {
        text.push_str(&format!("{}  .00  .00  .00  .00  .00  .00\n", t.label()));
    }
    text
}

fn full_rows() -> Vec<&'static str> {
    vec![
        "NEW POLICIES  21,149.00  3,172.35  17,976.65  .00  .00  .00",
        "REWRITES  5,000.00  750.00  4,250.00  .00  .00  .00",
        "ADDED PREMIUM  1,500.50  225.08  1,275.42  .00  .00  .00",
        "RETURN PREMIUM  500.00CR  75.00CR  425.00CR  .00  .00  .00",
        "RENEWALS  10,000.00  1,500.00  8,500.00  .00  .00  .00",
        "CANCELLATIONS  .00  .00  .00  .00  .00  .00",
    ]
}

/// Twelve pages: divisions on 4, 5, 7, 8, 10, 11; zero pages elsewhere.
fn twelve_page_report() -> Vec<String> {
    (1..=12)
        .map(|page| match page {
            4 | 5 | 7 | 8 | 10 | 11 => division_page(page, &full_rows()),
            _ => "TENNESSEE DIVISION\nDIRECT BILLED\nNEW POLICIES  99.00  .00  .00\n".to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Test 1: All six divisions, all six transaction types
// ---------------------------------------------------------------------------
#[test]
fn full_report_extracts_thirty_six_rows() {
    let layout = default_layout().unwrap();
    let source = MockSource {
        pages: twelve_page_report(),
    };

    let report = extract_report(&source, &layout);

    assert!(report.is_clean(), "unexpected issues: {:?}", report.failures);
    assert_eq!(report.rows.len(), 36);
    assert_eq!(
        report.divisions(),
        vec![
            "Insurance Division 4",
            "Insurance Division 5",
            "Insurance Division 7",
            "Insurance Division 8",
            "Insurance Division 10",
            "Insurance Division 11",
        ]
    );
    assert_eq!(
        report.amount("Insurance Division 7", TransactionType::NewPolicies),
        Some(dec!(21149.00))
    );
    assert_eq!(
        report.amount("Insurance Division 11", TransactionType::ReturnPremium),
        Some(dec!(-500.00))
    );
    assert_eq!(report.skipped_pages, vec![6, 9, 12]);
}

// ---------------------------------------------------------------------------
// Test 2: Rows come out in division order, then canonical transaction order
// ---------------------------------------------------------------------------
#[test]
fn records_are_ordered_and_canonical() {
    let layout = default_layout().unwrap();
    let source = MockSource {
        pages: twelve_page_report(),
    };

    let records = extract_report(&source, &layout).records();

    let first: Vec<(&str, &str)> = records[..6]
        .iter()
        .map(|r| (r.transaction_type.as_str(), r.amount.as_str()))
        .collect();
    assert_eq!(
        first,
        vec![
            ("NEW POLICIES", "21149.00"),
            ("REWRITES", "5000.00"),
            ("ADDED PREMIUM", "1500.50"),
            ("RETURN PREMIUM", "-500.00"),
            ("RENEWALS", "10000.00"),
            ("CANCELLATIONS", "0.00"),
        ]
    );
    assert!(records[..6].iter().all(|r| r.division == "Insurance Division 4"));
    assert_eq!(records[6].division, "Insurance Division 5");
}

// ---------------------------------------------------------------------------
// Test 3: Short document, missing pages become failures, others still process
// ---------------------------------------------------------------------------
#[test]
fn missing_pages_do_not_abort_run() {
    let layout = default_layout().unwrap();
    let mut pages = twelve_page_report();
    pages.truncate(7);
    let source = MockSource { pages };

    let report = extract_report(&source, &layout);

    // Pages 4, 5 and 7 exist; 8, 10 and 11 do not.
    assert_eq!(report.rows.len(), 18);
    let missing: Vec<usize> = report
        .failures
        .iter()
        .filter(|f| f.kind == FailureKind::PageNotFound)
        .map(|f| f.page)
        .collect();
    assert_eq!(missing, vec![8, 10, 11]);
    assert!(report.failures.iter().all(|f| f.transaction_type.is_none()));
}

// ---------------------------------------------------------------------------
// Test 4: Malformed cell is attributed and the rest of the page survives
// ---------------------------------------------------------------------------
#[test]
fn malformed_cell_is_reported_per_label() {
    let layout = default_layout().unwrap();
    let mut pages = twelve_page_report();
    let mut rows = full_rows();
    rows[1] = "REWRITES  5,OOO.00  750.00  4,250.00  .00  .00  .00";
    pages[4] = division_page(5, &rows);
    let source = MockSource { pages };

    let report = extract_report(&source, &layout);

    assert_eq!(report.rows.len(), 35);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.page, 5);
    assert_eq!(failure.division, "Insurance Division 5");
    assert_eq!(failure.transaction_type, Some(TransactionType::Rewrites));
    assert_eq!(failure.kind, FailureKind::MalformedAmount);
    assert!(failure.message.contains("5,OOO.00"));
    assert_eq!(
        report.amount("Insurance Division 5", TransactionType::Renewals),
        Some(dec!(10000.00))
    );
    assert_eq!(
        report.amount("Insurance Division 5", TransactionType::Rewrites),
        None
    );
}

// ---------------------------------------------------------------------------
// Test 5: Labels absent from a page are gaps, not zeros
// ---------------------------------------------------------------------------
#[test]
fn absent_labels_are_gaps() {
    let layout = default_layout().unwrap();
    let mut pages = twelve_page_report();
    let rows: Vec<&str> = full_rows()
        .into_iter()
        .filter(|r| !r.starts_with("REWRITES") && !r.starts_with("RENEWALS"))
        .collect();
    pages[7] = division_page(8, &rows);
    let source = MockSource { pages };

    let report = extract_report(&source, &layout);

    assert_eq!(report.rows.len(), 34);
    assert!(report.failures.is_empty());
    let gaps: Vec<(usize, TransactionType)> =
        report.gaps.iter().map(|g| (g.page, g.transaction_type)).collect();
    assert_eq!(
        gaps,
        vec![
            (8, TransactionType::Rewrites),
            (8, TransactionType::Renewals)
        ]
    );
    assert!(!report.is_clean());
}

// ---------------------------------------------------------------------------
// Test 6: Page without DIRECT BILLED is a page-level failure
// ---------------------------------------------------------------------------
#[test]
fn page_without_subsection_is_reported() {
    let layout = default_layout().unwrap();
    let mut pages = twelve_page_report();
    pages[9] = "Insurance Division 10\nNo activity this period\n".to_string();
    let source = MockSource { pages };

    let report = extract_report(&source, &layout);

    assert_eq!(report.rows.len(), 30);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].page, 10);
    assert_eq!(report.failures[0].kind, FailureKind::MissingSubsection);
    assert!(report.gaps.is_empty());
}

// ---------------------------------------------------------------------------
// Test 7: Agency billed rows never leak into the result
// ---------------------------------------------------------------------------
#[test]
fn agency_billed_rows_are_ignored() {
    let layout = default_layout().unwrap();
    let mut pages = twelve_page_report();
    pages[3] = division_page(4, &full_rows()[..1]);
    let source = MockSource { pages };

    let report = extract_report(&source, &layout);

    // Only NEW POLICIES is in DIRECT BILLED; the AGENCY BILLED rows below must not fill the rest.
    assert_eq!(
        report.amount("Insurance Division 4", TransactionType::NewPolicies),
        Some(dec!(21149.00))
    );
    assert_eq!(
        report.amount("Insurance Division 4", TransactionType::Rewrites),
        None
    );
    assert_eq!(report.gaps.len(), 5);
}

// ---------------------------------------------------------------------------
// Test 8: PDF entry point splits extractor output on form feeds
// ---------------------------------------------------------------------------
#[test]
fn extract_pdf_uses_extractor_pages() {
    let layout = default_layout().unwrap();
    let extractor = MockExtractor {
        text: twelve_page_report().join("\x0c") + "\x0c",
    };

    let report = extract_pdf(&[], &extractor, &layout).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.rows.len(), 36);
}
