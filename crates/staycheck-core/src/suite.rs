//! Check suite runner and its report.
//!
//! The suite runs all six checks regardless of individual failures, so a
//! single run reports every violated rule instead of stopping at the first.

use crate::checks;
use crate::errors::CheckError;
use crate::table::ListingTable;

/// Numeric thresholds for a validation run, immutable once built.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub min_price: f64,
    pub max_price: f64,
    pub kl_threshold: f64,
}

/// Verdict of a single check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    passed: bool,
    detail: Option<String>,
}

impl CheckOutcome {
    pub fn passed(name: &'static str) -> Self {
        Self {
            name,
            passed: true,
            detail: None,
        }
    }

    pub fn failed(name: &'static str, error: &CheckError) -> Self {
        Self {
            name,
            passed: false,
            detail: Some(error.to_string()),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// Collected outcomes of one suite run.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub table_name: String,
    pub total_rows: usize,
    outcomes: Vec<CheckOutcome>,
}

impl SuiteReport {
    pub fn new(table_name: String, total_rows: usize) -> Self {
        Self {
            table_name,
            total_rows,
            outcomes: Vec::new(),
        }
    }

    pub fn add_outcome(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn is_passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::is_passed)
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }
}

/// Run the six checks of the quality gate against a reference dataset.
pub fn run_checks(
    candidate: &ListingTable,
    reference: &ListingTable,
    thresholds: &Thresholds,
) -> SuiteReport {
    let mut report = SuiteReport::new(candidate.name().to_string(), candidate.num_rows());

    report.add_outcome(record("column_names", checks::check_columns(candidate)));
    report.add_outcome(record(
        "neighbourhood_groups",
        checks::check_categories(candidate),
    ));
    report.add_outcome(record("geo_boundaries", checks::check_bounds(candidate)));
    report.add_outcome(record(
        "neighbourhood_distribution",
        checks::check_drift(candidate, reference, thresholds.kl_threshold),
    ));
    report.add_outcome(record("row_count", checks::check_row_count(candidate)));
    report.add_outcome(record(
        "price_range",
        checks::check_price_range(candidate, thresholds.min_price, thresholds.max_price),
    ));

    tracing::info!(
        candidate = report.table_name.as_str(),
        passed = report.passed_count(),
        failed = report.failed_count(),
        "check suite finished"
    );
    report
}

fn record(name: &'static str, result: Result<(), CheckError>) -> CheckOutcome {
    match result {
        Ok(()) => CheckOutcome::passed(name),
        Err(error) => {
            tracing::warn!(check = name, %error, "check failed");
            CheckOutcome::failed(name, &error)
        }
    }
}
