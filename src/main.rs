//! u-bookscan CLI. Schedules every input instance in parallel and writes
//! one output file per input.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use u_bookscan::config::RunConfig;
use u_bookscan::dispatching::Policy;
use u_bookscan::runner::RunCoordinator;

#[derive(Parser)]
#[command(
    name = "u-bookscan",
    about = "Greedy library signup and book scanning scheduler",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Directory in which the output files are stored
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Library scoring policy
    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Number of worker threads (default: available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Instance files, one scheduling run each
    inputs: Vec<PathBuf>,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => RunConfig::default(),
        };

        config.debug |= self.debug;
        if let Some(dir) = &self.outdir {
            config.out_dir = dir.clone();
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.run_config()?;

    let filter = if config.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    if cli.inputs.is_empty() {
        warn!("no input files given");
        return Ok(());
    }
    info!(
        out_dir = %config.out_dir.display(),
        policy = %config.policy,
        "storing the outputs"
    );

    let results = RunCoordinator::new(config).run(&cli.inputs);

    let mut failed = 0;
    for result in &results {
        match result {
            Ok(report) => println!(
                "{} -> {}: value {} ({} books from {} libraries, {:.1}% of reachable)",
                report.input.display(),
                report.output.display(),
                report.kpi.total_value,
                report.kpi.books_delivered,
                report.kpi.libraries_scheduled,
                report.kpi.coverage * 100.0
            ),
            Err(e) => {
                failed += 1;
                error!(path = %e.path().display(), "{e}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} instances failed", results.len());
    }
    Ok(())
}
