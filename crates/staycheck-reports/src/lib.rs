pub mod formatters;

pub use formatters::{json::JsonFormatter, stdout::StdOutFormatter};

use staycheck_core::SuiteReport;

pub trait Reporter {
    fn on_start(&self);
    fn on_fetch(&self, reference: &str);
    fn on_suite_start(&self);
    fn on_report(&self, report: &SuiteReport);
    fn on_complete(&self, passed: usize, failed: usize);
}
