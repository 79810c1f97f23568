//! lccqa CLI - Land cover change QA reports

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::FmtSubscriber;

use lccqa_cli::config::LoggingConfig;
use lccqa_cli::source::read_region_list;
use lccqa_cli::{run_region, write_report, Config, Engine};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "lccqa")]
#[command(
    author,
    version,
    about = "Automated land cover change QA: change matrices, version differences and static totals",
    long_about = None
)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Regions to process, comma separated (e.g. caro_51033,balt_24005)
    #[arg(long, value_delimiter = ',', conflicts_with = "region_list")]
    regions: Vec<String>,

    /// Delimited text file listing regions to process; requires --column
    #[arg(long, requires = "column")]
    region_list: Option<PathBuf>,

    /// Column of --region-list holding the region identifiers
    #[arg(long, requires = "region_list")]
    column: Option<String>,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false);

    match &logging.folder {
        Some(folder) => {
            std::fs::create_dir_all(folder)
                .with_context(|| format!("Failed to create log folder {}", folder.display()))?;
            let appender = tracing_appender::rolling::never(folder, &logging.name);
            let (file, guard) = tracing_appender::non_blocking(appender);
            let subscriber = builder
                .with_ansi(false)
                .with_writer(std::io::stderr.and(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set default subscriber")?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = builder.finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set default subscriber")?;
            Ok(None)
        }
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn resolve_regions(cli: &Cli) -> Result<Vec<String>> {
    if let (Some(list), Some(column)) = (&cli.region_list, &cli.column) {
        return read_region_list(list, column);
    }
    let regions: Vec<String> = cli
        .regions
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();
    if regions.is_empty() {
        bail!("Expecting either --regions or --region-list and --column to be passed.");
    }
    Ok(regions)
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let _guard = setup_logging(cli.verbose, &config.logging)?;

    let regions = resolve_regions(&cli)?;
    info!("--------------------Starting Run-----------------------");
    info!("Regions to QA: {}", regions.join(", "));

    let engine = Engine::from_config(&config)?;
    let start = Instant::now();
    let mut failed = Vec::new();

    for region in &regions {
        info!("Starting {}", region);
        let pb = spinner(&format!("Processing {}...", region));
        let result = run_region(&config, &engine, region)
            .and_then(|report| write_report(&report, &engine.palette, &config.folders.qaqc));
        pb.finish_and_clear();

        match result {
            Ok(path) => info!("{} report saved to: {}", region, path.display()),
            Err(e) => {
                error!("{} failed: {:#}", region, e);
                failed.push(region.clone());
            }
        }
    }

    info!("Processing time: {:.2?}", start.elapsed());
    if !failed.is_empty() {
        bail!("{} of {} regions failed: {}", failed.len(), regions.len(), failed.join(", "));
    }
    Ok(())
}
