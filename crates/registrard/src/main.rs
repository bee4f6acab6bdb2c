//! HTTP daemon and command line interface for the registrar paper registration store.
//!
//! This crate serves the `registrar` library over HTTP and exposes the same operations on
//! the command line:
//! - Writing a configuration that points at a Google Sheets worksheet
//! - Serving `POST /` (register a paper) and `GET /` (look registrations up)
//! - Submitting and looking up registrations directly from a terminal
//!
//! # Usage
//!
//! ```bash
//! # Point the registry at a spreadsheet
//! registrard init --spreadsheet-id 1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms
//!
//! # Serve the HTTP interface
//! REGISTRAR_ACCESS_TOKEN=... registrard serve --bind 0.0.0.0:8000
//!
//! # Register a paper from a JSON file, then find it again
//! registrard submit paper.json
//! registrard lookup --email a@x.com
//! ```
//!
//! Logging goes to stderr; repeat `-v` for more detail or set `RUST_LOG`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use registrar::{
  config::{Config, GoogleSheetConfig, StoreConfig},
  error::RegistrarError,
  instruction::LookupParams,
  schema::Node,
  Registrar,
};
use serde_json::Value;
use tracing::{debug, error, info, trace};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod commands;
pub mod error;
pub mod server;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Continuation line for tree structure
static CONTINUE_PREFIX: &str = "│  ";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";
/// Leaf character for tree structure (end of branch)
static TREE_LEAF: &str = "└";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "HTTP server and CLI for the registrar paper registry")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

impl Cli {
  /// The configuration file this invocation reads or writes.
  fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
/// * `log_dir` - Directory for a daily rotated log file, in addition to stderr
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// The returned guard flushes the log file when dropped and must outlive the program's work.
fn setup_logging(verbosity: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  let stderr = fmt::layer()
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true);

  let (file, guard) = match log_dir {
    Some(dir) => {
      let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "registrard.log"));
      (Some(fmt::layer().with_writer(writer).with_ansi(false).with_target(true)), Some(guard))
    },
    None => (None, None),
  };

  tracing_subscriber::registry().with(filter).with(stderr).with(file).init();
  guard
}

/// Loads the configuration, pointing the user at `init` when it cannot be read.
fn load_config(path: &Path) -> Result<Config> {
  trace!("Using configuration at: {}", path.display());
  Config::load(path).map_err(|e| {
    eprintln!(
      "{} Failed to open configuration at {}! Please run `registrard init` to create one.",
      style(ERROR_PREFIX).red(),
      style(path.display()).yellow()
    );
    RegistrardError::from(e)
  })
}

/// Runs the parsed command.
async fn run(cli: Cli) -> Result<()> {
  let config_path = cli.config_path();
  match cli.command {
    Commands::Init(init_args) => init(&config_path, init_args),
    Commands::Serve(serve_args) => serve(load_config(&config_path)?, serve_args).await,
    Commands::Submit(submit_args) => submit(&load_config(&config_path)?, submit_args).await,
    Commands::Lookup(lookup_args) => lookup(&load_config(&config_path)?, lookup_args).await,
  }
}

/// Entry point for the registrard CLI application
///
/// Parses arguments, sets up logging and executes the requested command. Failures are
/// reported on stderr and end the process with a non-zero exit code.
#[tokio::main]
async fn main() {
  let cli = Cli::parse();

  let log_dir = match &cli.command {
    Commands::Serve(ServeArgs { log_dir, .. }) => log_dir.clone(),
    _ => None,
  };
  let _guard = setup_logging(cli.verbose, log_dir.as_deref());

  if let Err(e) = run(cli).await {
    error!("{e}");
    eprintln!("{} {}", style(ERROR_PREFIX).red(), style(&e).red());
    std::process::exit(1);
  }
}
