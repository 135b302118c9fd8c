use std::io::Write;

use colored::Colorize;
use realmscan_domain::{RegionCatalog, ReportRow, ReportStatus};
use realmscan_scanner::{ReportSink, ScanIssue};

const CSV_HEADER: [&str; 3] = ["Tenant", "Status", "Regional URL"];

// ── CSV ───────────────────────────────────────────────────────────────────────

/// Writes `Tenant,Status,Regional URL` rows.
pub struct CsvSink<W: Write> {
    out: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: csv::Writer::from_writer(out),
        }
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn write(&mut self, rows: &[ReportRow]) -> std::io::Result<()> {
        self.out.write_record(CSV_HEADER)?;
        for row in rows {
            let status = row.status.to_string();
            let url = row.regional_url();
            self.out
                .write_record([row.tenant.as_str(), status.as_str(), url.as_str()])?;
        }
        self.out.flush()
    }
}

// ── Console ───────────────────────────────────────────────────────────────────

/// One colored line per tenant: green enabled, red disabled, yellow unknown.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn write(&mut self, rows: &[ReportRow]) -> std::io::Result<()> {
        writeln!(self.out, "\n--- Tenant Check Results ---")?;
        for row in rows {
            writeln!(self.out, "{}", render_console_line(row))?;
        }
        self.out.flush()
    }
}

pub fn render_console_line(row: &ReportRow) -> String {
    let line = format!(
        "Tenant: {}, Status: {}, Regional URL(s): {}",
        row.tenant,
        row.status,
        row.regional_url()
    );
    match row.status {
        ReportStatus::Enabled => line.green().to_string(),
        ReportStatus::Disabled => line.red().to_string(),
        ReportStatus::Unknown => line.yellow().to_string(),
    }
}

pub fn render_issues(issues: &[ScanIssue]) -> String {
    let mut out = format!("{} issue(s):\n", issues.len());
    for issue in issues {
        let line = match issue {
            ScanIssue::ProbeIndeterminate { .. } => format!("  ? {}", issue),
            ScanIssue::TenantFailed { .. } => format!("  ! {}", issue),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render the region catalog as plain text.
pub fn render_regions(catalog: &RegionCatalog) -> String {
    let mut out = String::new();
    for region in catalog.regions() {
        let marker = if &region.code == catalog.default_region() {
            " (default)"
        } else {
            ""
        };
        out.push_str(&format!("{}{}\n", region.code, marker));
        for endpoint in &region.endpoints {
            out.push_str(&format!("  {}\n", endpoint));
        }
    }
    out
}
