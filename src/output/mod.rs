//! Report structures and output formatters

pub mod report;
pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::EvaluationReport;
