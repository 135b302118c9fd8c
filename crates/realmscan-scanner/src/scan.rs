use std::sync::Arc;

use chrono::Utc;
use realmscan_domain::{EndpointResolver, ReportStatus};
use realmscan_probe::RealmProbe;
use tracing::info;
use uuid::Uuid;

use crate::batch::run;
use crate::collate::collate;
use crate::error::ScanError;
use crate::report::{ScanReport, ScanRequest};

/// Run a full scan: resolve, evaluate every tenant, collate.
pub async fn scan(
    req: ScanRequest,
    probe: Arc<dyn RealmProbe>,
    resolver: &EndpointResolver,
) -> Result<ScanReport, ScanError> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(%run_id, regions = ?req.regions, "Starting scan");

    let outcome = run(
        probe,
        resolver,
        req.tenants,
        req.regions.as_slice(),
        req.mode,
        req.concurrency,
    )
    .await?;

    let report = ScanReport {
        run_id,
        started_at,
        finished_at: Utc::now(),
        mode: req.mode,
        endpoints: outcome.endpoints,
        rows: collate(&outcome.results),
        issues: outcome.issues,
    };

    info!(
        %run_id,
        enabled = report.count(ReportStatus::Enabled),
        disabled = report.count(ReportStatus::Disabled),
        unknown = report.count(ReportStatus::Unknown),
        issues = report.issues.len(),
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Scan complete"
    );
    Ok(report)
}
