use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use realmscan_config::{load_settings, load_tenants, recommended_max_concurrency, Settings};
use realmscan_domain::{dedup_tenants, AggregationMode, EndpointResolver, Tenant};
use realmscan_probe::{HttpProbeConfig, HttpRealmProbe, RealmProbe};
use realmscan_scanner::ScanRequest;
use tracing::info;

use crate::cli::ScanArgs;
use crate::output::{self, ConsoleSink, CsvSink};

// ── Scan ──────────────────────────────────────────────────────────────────────

pub async fn scan(args: ScanArgs, config: Option<&Path>) -> Result<()> {
    let mut settings = settings(config)?;
    if let Some(secs) = args.timeout_secs {
        if secs == 0 {
            bail!("--timeout-secs must be at least 1");
        }
        settings.request_timeout = Duration::from_secs(secs);
    }

    let max = recommended_max_concurrency();
    if args.concurrency == 0 || args.concurrency > max {
        bail!(
            "--concurrency must be between 1 and {} on this host (got {})",
            max,
            args.concurrency
        );
    }

    let explicit = !args.tenants.is_empty();
    let tenants = if explicit {
        dedup_tenants(
            args.tenants
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(Tenant::new),
        )
    } else {
        load_tenants(&args.tenants_file).with_context(|| {
            format!(
                "Failed to read tenants from {} (pass --tenants to list them instead)",
                args.tenants_file.display()
            )
        })?
    };
    if tenants.is_empty() {
        bail!("no tenants to check");
    }

    let resolver = EndpointResolver::new(settings.catalog.clone());
    resolver.resolve(args.regions.as_slice()).context("Invalid --regions")?;

    // Opened before probing so an unwritable destination fails fast.
    let mut csv_sink = create_csv_sink(&args.output)?;

    let probe: Arc<dyn RealmProbe> = Arc::new(
        HttpRealmProbe::new(HttpProbeConfig {
            client_id: settings.client_id.clone(),
            refresh_token: settings.refresh_token.clone(),
            timeout: settings.request_timeout,
        })
        .context("Failed to initialise HTTP probe")?,
    );

    let req = ScanRequest {
        tenants,
        regions: args.regions,
        mode: if args.exhaustive {
            AggregationMode::Exhaustive
        } else {
            AggregationMode::FirstMatch
        },
        concurrency: args.concurrency,
    };
    let report = realmscan_scanner::scan(req, probe, &resolver)
        .await
        .context("Scan failed")?;

    report
        .write_to(&mut csv_sink)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {} row(s) to {}", report.rows.len(), args.output.display());

    if explicit || args.console {
        report
            .write_to(&mut ConsoleSink::new(std::io::stdout().lock()))
            .context("Failed to print report")?;
    }

    if !report.issues.is_empty() {
        eprint!("\n{}", output::render_issues(&report.issues));
    }

    Ok(())
}

// ── Regions ───────────────────────────────────────────────────────────────────

pub fn regions(config: Option<&Path>) -> Result<()> {
    let settings = settings(config)?;
    print!("{}", output::render_regions(&settings.catalog));
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn create_csv_sink(path: &Path) -> Result<CsvSink<BufWriter<File>>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(CsvSink::new(BufWriter::new(file)))
}

/// Settings from --config / REALMSCAN_CONFIG, or the built-in defaults.
fn settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realmscan_scanner::ReportSink;

    #[test]
    fn csv_sink_is_created_before_rows_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tenant_status.csv");

        let mut sink = create_csv_sink(&path).unwrap();
        assert!(path.exists());

        sink.write(&[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Tenant,Status,Regional URL\n");
    }

    #[test]
    fn unwritable_destination_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tenant_status.csv");

        let err = create_csv_sink(&path).err().unwrap();
        assert!(err.to_string().contains("tenant_status.csv"), "{err}");
    }
}
