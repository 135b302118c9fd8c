use clap::{Args, Parser, Subcommand};
use realmscan_config::DEFAULT_CONCURRENCY;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "realmscan",
    about = "Check which identity-provider regions host each tenant's realm",
    version
)]
pub struct Cli {
    /// Settings file (YAML). Built-in settings are used when absent.
    #[arg(long, env = "REALMSCAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe every tenant and write the status report.
    Scan(ScanArgs),

    /// List the known regions and their endpoints.
    Regions,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Tenants to check. When omitted, tenants are read from --tenants-file.
    #[arg(long, num_args = 1..)]
    pub tenants: Vec<String>,

    /// File with one tenant per line.
    #[arg(long, env = "REALMSCAN_TENANTS_FILE", default_value = "tenants.txt")]
    pub tenants_file: PathBuf,

    /// Region codes to probe, or ALL. Defaults to the catalog's default region.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Probe every endpoint and report all matches instead of stopping at the first.
    #[arg(long)]
    pub exhaustive: bool,

    /// Tenants checked at the same time.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds. Overrides the settings file.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// CSV report destination.
    #[arg(long, short, default_value = "tenant_status.csv")]
    pub output: PathBuf,

    /// Also print the report to the console (implied by --tenants).
    #[arg(long)]
    pub console: bool,
}
