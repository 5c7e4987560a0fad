//! CLI for gitea-mirror.
//!
//! Mirrors every repository visible on a Gitea server into a local directory,
//! optionally restricted to a single owner.

use clap::Parser;
use gitea_mirror::{FilterMode, MirrorConfig, RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Gitea Mirror - Clone every repository you can see on a Gitea server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the KEY=VALUE configuration file.
    #[arg(long, env = "GITEA_MIRROR_CONFIG", default_value = "config.env")]
    config: PathBuf,

    /// Fetch repositories owned by the token's user only.
    #[arg(long = "onlyme")]
    only_me: bool,

    /// Fetch repositories owned by this user or organization only.
    #[arg(long)]
    user: Option<String>,

    /// Maximum simultaneous clones (unbounded if omitted).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    concurrency: Option<u64>,

    /// Time budget for each clone, in seconds.
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// List repositories without cloning them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Args::parse();

    // Failures are reported, not turned into an exit status.
    match run(args).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => error!(error = %e, "Mirror run aborted"),
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mirror = MirrorConfig::load(&args.config)?;
    let filter = FilterMode::from_flags(args.only_me, args.user.as_deref());

    let config = RunnerConfig::new(mirror, filter)
        .with_dry_run(args.dry_run)
        .with_concurrency(args.concurrency.map(|n| usize::try_from(n).unwrap_or(usize::MAX)))
        .with_clone_timeout(Duration::from_secs(args.timeout_secs));

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!(
        "  Repositories discovered: {}",
        summary.repositories_discovered
    );

    if !summary.dry_run {
        println!("  Cloned: {}", summary.cloned);
        println!("  Already present: {}", summary.skipped);
        println!("  Failed: {}", summary.failed);
    }
}
