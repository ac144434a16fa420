//! Rebind CLI - find and repair lost animation bindings

mod commands;
mod config;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, fix, flatten, init};
use config::{OutputFormat, RebindConfig};

#[derive(Parser)]
#[command(name = "rebind")]
#[command(about = "Find animation clip bindings whose paths no longer resolve, and repair them", long_about = None)]
#[command(version)]
struct Cli {
    /// Only print errors in logs
    #[arg(long, global = true)]
    quiet: bool,

    /// Print debug logs
    #[arg(long, global = true)]
    verbose: bool,

    /// Disable the progress bar
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a sample project with lost bindings
    Init {
        /// Project name/directory
        name: String,
    },

    /// List lost bindings of the selected object's clips
    Check {
        /// Path to hierarchy file
        hierarchy: String,

        /// Path of the selected object below the hierarchy root
        #[arg(long)]
        select: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Repair lost bindings by unique name match
    Fix {
        /// Path to hierarchy file
        hierarchy: String,

        /// Path of the selected object below the hierarchy root
        #[arg(long)]
        select: Option<String>,

        /// Repair only the clip with this name
        #[arg(long)]
        clip: Option<String>,

        /// Repair in memory without writing clip files
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List every object below the selection with its relative path
    Flatten {
        /// Path to hierarchy file
        hierarchy: String,

        /// Path of the selected object below the hierarchy root
        #[arg(long)]
        select: Option<String>,

        /// Only list objects with this name
        #[arg(long)]
        name: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REBIND_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = RebindConfig::load()?;
    let progress = config.progress && !cli.no_progress && !cli.quiet;

    match cli.command {
        Commands::Init { name } => init::run(&name),
        Commands::Check {
            hierarchy,
            select,
            format,
        } => check::run(check::CheckArgs {
            hierarchy,
            select,
            format: format.unwrap_or(config.format),
        }),
        Commands::Fix {
            hierarchy,
            select,
            clip,
            dry_run,
            format,
        } => fix::run(fix::FixArgs {
            hierarchy,
            select,
            clip,
            dry_run: dry_run || !config.save,
            format: format.unwrap_or(config.format),
            progress,
        }),
        Commands::Flatten {
            hierarchy,
            select,
            name,
            format,
        } => flatten::run(flatten::FlattenArgs {
            hierarchy,
            select,
            name,
            format: format.unwrap_or(config.format),
        }),
    }
}
