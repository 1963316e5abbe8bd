//! coursebank - maintain a catalog of university courses from the command line
//!
//! Every invocation loads the depot, runs one command, prints its output on
//! stdout and writes the depot back. Logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod depot;

use commands::CatalogCommand;
use depot::{Depot, DEFAULT_DEPOT};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "coursebank",
    about = "Course catalog with prerequisite checking",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Catalog file to operate on
    #[clap(long, env = "COURSEBANK_DEPOT", default_value = DEFAULT_DEPOT, global = true)]
    depot: PathBuf,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty depot
    Init {
        /// Replace an existing depot
        #[clap(long)]
        force: bool,
    },

    #[clap(flatten)]
    Catalog(CatalogCommand),
}

/// Initialize tracing; logs never go to stdout, which carries command output
fn initialize_tracing(log_level: &LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_filter_directive()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let depot = Depot::new(cli.depot);
    debug!(depot = %depot.path().display(), "Using depot");

    match cli.command {
        Command::Init { force } => depot.init(force),
        Command::Catalog(command) => run_catalog_command(&depot, &command),
    }
}

/// Load, execute, print, save. Nothing is written when the command fails.
fn run_catalog_command(depot: &Depot, command: &CatalogCommand) -> Result<()> {
    let catalog = depot.load()?;

    let outcome = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        command.execute(catalog, &mut input)?
    };

    if let Some(output) = &outcome.output {
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
    }

    depot.save(&outcome.catalog)?;
    info!(command = command.name(), "Command completed");
    Ok(())
}
