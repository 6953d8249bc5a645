//! Gatescout command-line entry point

use clap::Parser;
use gatescout::config::{load_config, ScanConfig};
use gatescout::enrich::HttpCountryResolver;
use gatescout::fetch::HttpFetcher;
use gatescout::scan::{run_scan, ScanRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Gatescout: a payment-stack fingerprinting crawler
///
/// Crawls the target site to a bounded depth and classifies fetched content
/// against a signature catalog: payment gateways, CAPTCHA vendors,
/// e-commerce platforms, card brands, and 3-D Secure flows.
#[derive(Parser, Debug)]
#[command(name = "gatescout")]
#[command(version = "1.0.0")]
#[command(about = "Fingerprint a site's payment stack", long_about = None)]
struct Cli {
    /// Target URL to scan (scheme optional, https assumed)
    #[arg(value_name = "URL")]
    url: String,

    /// Traversal depth (0 = root page only)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Wall-clock budget for the whole scan, in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => ScanConfig::default(),
    };

    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout())?);
    let resolver = Arc::new(HttpCountryResolver::new()?);

    let request = ScanRequest {
        url: cli.url,
        depth: cli.depth,
        timeout_secs: cli.timeout,
    };

    let outcome = run_scan(request, fetcher, resolver, &config).await;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{}", rendered);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gatescout=warn"),
            1 => EnvFilter::new("gatescout=info"),
            2 => EnvFilter::new("gatescout=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
