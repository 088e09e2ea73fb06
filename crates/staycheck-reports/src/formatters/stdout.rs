use prettytable::{Cell, Row, Table};
use staycheck_core::SuiteReport;

use crate::Reporter;

pub struct StdOutFormatter {
    intro: String,
}

impl StdOutFormatter {
    pub fn new(version: String) -> Self {
        Self {
            intro: format!("StayCheck v{version} - Data Quality Report"),
        }
    }

    /// Render one suite run as a table: check name, verdict, diagnostic.
    pub fn render(&self, report: &SuiteReport) -> String {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Check"),
            Cell::new("Result"),
            Cell::new("Detail"),
        ]));

        for outcome in report.outcomes() {
            let status = if outcome.is_passed() { "PASSED" } else { "FAILED" };
            // Keep the table readable, diagnostics can span several lines
            let detail = outcome.detail().unwrap_or("-");
            table.add_row(Row::new(vec![
                Cell::new(outcome.name),
                Cell::new(status),
                Cell::new(detail),
            ]));
        }

        table.to_string()
    }
}

impl Reporter for StdOutFormatter {
    fn on_start(&self) {
        println!("{}", self.intro);
        println!("Run date: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    }

    fn on_fetch(&self, reference: &str) {
        println!("Fetching {reference}...");
    }

    fn on_suite_start(&self) {
        println!("\nValidating...");
    }

    fn on_report(&self, report: &SuiteReport) {
        let status = if report.is_passed() { "PASSED" } else { "FAILED" };
        println!(
            "\n{} ({} rows) - {}",
            report.table_name, report.total_rows, status
        );
        println!("{}", self.render(report));
    }

    fn on_complete(&self, passed: usize, failed: usize) {
        println!("Summary: {passed} passed, {failed} failed");
    }
}
