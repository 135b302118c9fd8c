pub mod batch;
pub mod collate;
pub mod error;
pub mod evaluate;
pub mod report;
pub mod scan;

#[cfg(test)]
mod testing;

pub use batch::{run, ScanOutcome};
pub use collate::collate;
pub use error::ScanError;
pub use evaluate::{evaluate, ProbeFailure, TenantEvaluation};
pub use report::{ReportSink, ScanIssue, ScanReport, ScanRequest};
pub use scan::scan;
