//! Report aggregation and output formatting

pub mod report;
pub mod formatter;
pub mod progress;

pub use report::{CompleteReport, Download, ReportSection};
pub use formatter::ReportGenerator;
