use serde_json::json;
use staycheck_core::SuiteReport;

use crate::Reporter;

/// Machine-readable output for downstream pipeline steps.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &SuiteReport) -> String {
        let checks: Vec<_> = report
            .outcomes()
            .iter()
            .map(|outcome| {
                json!({
                    "check": outcome.name,
                    "passed": outcome.is_passed(),
                    "detail": outcome.detail(),
                })
            })
            .collect();

        let value = json!({
            "table": report.table_name,
            "total_rows": report.total_rows,
            "passed": report.is_passed(),
            "checks": checks,
        });
        // json! output is always serializable
        serde_json::to_string_pretty(&value).expect("valid json value")
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonFormatter {
    fn on_start(&self) {}
    fn on_fetch(&self, _reference: &str) {}
    fn on_suite_start(&self) {}

    fn on_report(&self, report: &SuiteReport) {
        println!("{}", self.render(report));
    }

    fn on_complete(&self, _passed: usize, _failed: usize) {}
}
