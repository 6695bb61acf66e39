//! LST CLI
//!
//! Command-line interface for lossless semantic trees of HCL and Dockerfiles

mod commands;
mod discover;
mod report;
mod stats;

use clap::{Parser, Subcommand};
use lst_core::{ConfigLoader, init_tracing_with};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "lst")]
#[command(about = "Parse, print and inspect lossless semantic trees")]
#[command(version = lst_core::VERSION)]
#[command(
    long_about = "lst parses HCL (.hcl, .tf, .tfvars) and Dockerfiles into lossless semantic trees.\n\
\n\
Examples:\n  \
lst check                      # Round-trip every supported file below .\n  \
lst check infra --include '*.tf'\n  \
lst print main.tf --find region  # Mark every `region` identifier\n  \
lst stats --json ."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (lst.toml/lst.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel parsing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse files and verify that each prints back unchanged
    Check {
        #[arg(help = "Files or directories to check (default: current directory)")]
        paths: Vec<PathBuf>,

        #[arg(
            long,
            help = "Only check files matching pattern (can be used multiple times)"
        )]
        include: Vec<String>,
    },

    /// Parse one file and print it back
    Print {
        file: PathBuf,

        #[arg(
            long,
            help = "Mark HCL identifiers or Dockerfile instructions with this name"
        )]
        find: Option<String>,
    },

    /// Count tree nodes per kind
    Stats {
        #[arg(help = "Files or directories to inspect (default: current directory)")]
        paths: Vec<PathBuf>,

        #[arg(long, help = "Only count files matching pattern")]
        include: Vec<String>,

        #[arg(long, help = "Print counts as JSON")]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "lst=warn",
        1 => "lst=info",
        2 => "lst=debug",
        _ => "lst=trace",
    };
    init_tracing_with(filter);

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        return ExitCode::FAILURE;
    }

    match run_command(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the selected command; `Ok(false)` means it found problems
fn run_command(cli: Cli) -> anyhow::Result<bool> {
    let config = ConfigLoader::load(cli.config.as_deref(), None)?;
    let colors = !cli.no_color;

    match cli.command {
        Commands::Check { paths, include } => {
            commands::check_command(&or_current_dir(paths), &include, &config, colors)
        }
        Commands::Print { file, find } => {
            commands::print_command(&file, find.as_deref(), &config, colors)
        }
        Commands::Stats {
            paths,
            include,
            json,
        } => commands::stats_command(&or_current_dir(paths), &include, &config, json),
    }
}

fn or_current_dir(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}
