use chrono::{DateTime, Utc};
use realmscan_domain::{AggregationMode, Endpoint, ReportRow, ReportStatus, Tenant};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub tenants: Vec<Tenant>,
    /// Region codes as given by the operator; empty means the default region.
    pub regions: Vec<String>,
    pub mode: AggregationMode,
    /// Maximum tenant evaluations in flight.
    pub concurrency: usize,
}

/// A non-fatal problem met during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanIssue {
    /// One probe produced no usable signal.
    ProbeIndeterminate {
        tenant: Tenant,
        endpoint: Endpoint,
        reason: String,
    },
    /// A tenant could not be evaluated at all; it is reported as unknown.
    TenantFailed { tenant: Tenant, reason: String },
}

impl std::fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanIssue::ProbeIndeterminate { tenant, endpoint, reason } => {
                write!(f, "{} on {}: {}", tenant, endpoint, reason)
            }
            ScanIssue::TenantFailed { tenant, reason } => write!(f, "{}: {}", tenant, reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub mode: AggregationMode,
    /// Endpoints probed, in resolver order.
    pub endpoints: Vec<Endpoint>,
    /// Enabled tenants first, then the rest, each group by tenant id.
    pub rows: Vec<ReportRow>,
    pub issues: Vec<ScanIssue>,
}

impl ScanReport {
    pub fn count(&self, status: ReportStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }

    /// Hand the ordered rows to `sink` in a single write.
    pub fn write_to<S: ReportSink + ?Sized>(&self, sink: &mut S) -> std::io::Result<()> {
        sink.write(&self.rows)
    }
}

/// Consumer of the final ordered rows (CSV file, console, ...).
pub trait ReportSink {
    fn write(&mut self, rows: &[ReportRow]) -> std::io::Result<()>;
}

impl ReportSink for Vec<ReportRow> {
    fn write(&mut self, rows: &[ReportRow]) -> std::io::Result<()> {
        self.extend_from_slice(rows);
        Ok(())
    }
}
