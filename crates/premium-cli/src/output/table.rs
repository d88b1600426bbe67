use premium_core::layout::schema::ReportLayout;
use premium_core::model::ExtractionReport;
use premium_core::parsing::amount::format_amount;

/// Render a report as one block per division, in layout order.
pub fn format_report(report: &ExtractionReport, layout: &ReportLayout) -> String {
    let mut out = String::new();

    let width = layout
        .transaction_types
        .iter()
        .map(|t| t.title().len())
        .max()
        .unwrap_or(14);

    for division in &layout.divisions {
        out.push_str(&format!("\n--- {} (page {}) ---\n", division.label, division.page));

        let page_failure = report
            .failures
            .iter()
            .find(|f| f.page == division.page && f.transaction_type.is_none());
        if let Some(f) = page_failure {
            out.push_str(&format!("  {}: {}\n", f.kind, f.message));
            continue;
        }

        for &t in &layout.transaction_types {
            let cell = match report.amount(&division.label, t) {
                Some(amount) => format_amount(amount),
                None => {
                    let failed = report.failures.iter().any(|f| {
                        f.page == division.page && f.transaction_type == Some(t)
                    });
                    if failed {
                        "(unreadable)".to_string()
                    } else {
                        "(not found)".to_string()
                    }
                }
            };
            out.push_str(&format!("  {:<width$}  {:>14}\n", t.title(), cell, width = width));
        }
    }

    if !report.skipped_pages.is_empty() {
        let pages: Vec<String> = report.skipped_pages.iter().map(|p| p.to_string()).collect();
        out.push_str(&format!("\nSkipped pages: {}\n", pages.join(", ")));
    }

    out
}
