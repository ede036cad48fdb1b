//! Astro CLI - Pre-publish arrangement checks for scene files

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{inspect, record, validate};
use tracing_subscriber::EnvFilter;

/// Targets are matched by prefix, so `astro` covers every astro crate
const DEFAULT_LOG_FILTER: &str = "warn,astro=info";
const VERBOSE_LOG_FILTER: &str = "warn,astro=debug";

#[derive(Parser)]
#[command(name = "astro")]
#[command(about = "Validate sphere and polyhedron arrangements before publishing a scene", long_about = None)]
#[command(version)]
struct Cli {
    /// Log rule evaluation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scene against the arrangement rules
    Validate {
        /// Path to scene file
        scene: String,

        /// Path to tolerance config (defaults to ./astro.toml when present)
        #[arg(long)]
        config: Option<String>,

        /// Recorded sphere distances to check against
        #[arg(long)]
        baseline: Option<String>,

        /// Reposition objects and save the scene
        #[arg(long)]
        fix: bool,

        /// Preview fixes without applying
        #[arg(long)]
        dry_run: bool,

        /// Show diff of changes
        #[arg(long)]
        output_diff: bool,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Record current sphere distances as the baseline
    Record {
        /// Path to scene file
        scene: String,

        /// Output baseline path
        #[arg(short, long, default_value = "baseline.toml")]
        output: String,
    },

    /// Show each object's kind, pairing and distance from the origin
    Inspect {
        /// Path to scene file
        scene: String,

        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// `RUST_LOG` wins over both defaults
fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)))
}

fn init_logging(verbose: bool) {
    let filter = log_filter(verbose);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate {
            scene,
            config,
            baseline,
            fix,
            dry_run,
            output_diff,
            format,
        } => validate::run(validate::ValidateArgs {
            scene,
            config,
            baseline,
            fix,
            dry_run,
            output_diff,
            format,
        }),
        Commands::Record { scene, output } => record::run(&scene, &output),
        Commands::Inspect { scene, format } => inspect::run(&scene, &format),
    }
}
