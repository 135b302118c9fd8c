use std::collections::HashMap;

use realmscan_domain::{ReportRow, ReportStatus, Tenant, TenantResult};

/// Turn raw tenant results into report rows.
///
/// A later result for the same tenant replaces an earlier one. Rows are
/// ordered enabled first, then disabled and unknown, each group ascending by
/// tenant identifier. Identifiers are unique after dedup, so the order is total.
pub fn collate(results: &[TenantResult]) -> Vec<ReportRow> {
    let mut latest: HashMap<&Tenant, &TenantResult> = HashMap::new();
    for r in results {
        latest.insert(&r.tenant, r);
    }

    let mut rows: Vec<ReportRow> = latest.into_values().map(ReportRow::from).collect();
    rows.sort_by(|a, b| {
        let a_key = (a.status != ReportStatus::Enabled, &a.tenant);
        let b_key = (b.status != ReportStatus::Enabled, &b.tenant);
        a_key.cmp(&b_key)
    });
    rows
}
