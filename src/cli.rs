//! Command-line interface components.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::NordicConfig;
use crate::models::SolutionType;
use crate::processor::{BatchProcessor, BatchStats};
use crate::resolver::DetachedResolver;

#[derive(Parser, Debug)]
#[command(name = "nordic-ingest")]
#[command(about = "Validate Nordic seismic bulletin files and report per-event failures")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Nordic bulletin files to read
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Skip the correction pass and validate fields as written
    #[arg(long)]
    pub no_fixes: bool,

    /// Right-pad lines shorter than 80 columns
    #[arg(long)]
    pub pad: bool,

    /// Solution type tag for every event (O, A, R, P, F)
    #[arg(long, default_value = "O")]
    pub solution_type: SolutionType,

    /// Number of worker threads (defaults to the CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Assemble groups on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Print every failure message, not just the counts
    #[arg(long)]
    pub show_failures: bool,

    /// Exit with an error when any event fails
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the library configuration from the flags
    pub fn to_config(&self) -> NordicConfig {
        let mut config = NordicConfig::default().with_solution_type(self.solution_type);
        if self.no_fixes {
            config = config.without_fixes();
        }
        if self.pad {
            config = config.with_padding();
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nordic_ingest={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Process every file and print a summary, returning the combined counters
pub async fn run(args: Args) -> Result<BatchStats> {
    let config = args.to_config();
    let processor = BatchProcessor::new(&config, Arc::new(DetachedResolver))
        .context("Invalid configuration")?;

    let mut total = BatchStats::new();
    for path in &args.files {
        let result = if args.sequential {
            processor.process_file(path)
        } else {
            processor.process_file_parallel(path).await
        }
        .with_context(|| format!("Failed to read {}", path.display()))?;

        print_file_summary(path, &result.stats);
        if args.show_failures {
            for failure in &result.failures {
                println!("    {}", failure.bright_red());
            }
        }
        merge(&mut total, &result.stats);
    }

    if args.files.len() > 1 {
        println!(
            "\n{} {} events from {} groups ({:.1}%)",
            "Total:".bright_green().bold(),
            total.events.to_string().bright_white().bold(),
            total.groups,
            total.success_rate()
        );
    }

    if args.strict && !total.is_clean() {
        anyhow::bail!("{} events failed validation", total.failures);
    }
    Ok(total)
}

fn print_file_summary(path: &std::path::Path, stats: &BatchStats) {
    println!("{} {}", "Bulletin:".bright_cyan(), path.display());
    println!(
        "  {} {} events, {} phase lines",
        "Assembled".bright_green(),
        stats.events.to_string().bright_white().bold(),
        stats.phase_lines
    );
    if stats.failures > 0 {
        println!(
            "  {} {} of {} groups",
            "Failed".bright_yellow(),
            stats.failures.to_string().bright_white().bold(),
            stats.groups
        );
        for (category, count) in &stats.failure_categories {
            println!("    {}: {}", category, count);
        }
    }
    println!(
        "  {} {:.1}% in {}ms",
        "Success rate".bright_cyan(),
        stats.success_rate(),
        stats.processing_time_ms
    );
}

fn merge(total: &mut BatchStats, stats: &BatchStats) {
    total.groups += stats.groups;
    total.events += stats.events;
    total.failures += stats.failures;
    total.phase_lines += stats.phase_lines;
    total.processing_time_ms += stats.processing_time_ms;
    for (category, count) in &stats.failure_categories {
        *total.failure_categories.entry(category.clone()).or_insert(0) += count;
    }
}
