//! docaudit CLI
//!
//! Command-line interface for inspecting audit policies and diffs

use clap::{Parser, Subcommand};
use docaudit_core::logging_facility::{init, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "docaudit")]
#[command(about = "docaudit - Audit diffs for document snapshots", long_about = None)]
struct Cli {
    /// Plugin configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Human-readable debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON logs on stderr
    #[arg(long, global = true, conflicts_with = "verbose")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the policy index extracted from a schema
    Index(commands::index::IndexArgs),
    /// Diff two document snapshots under a schema
    Diff(commands::diff::DiffArgs),
    /// Redact sensitive keys in a JSON document
    Redact(commands::redact::RedactArgs),
    /// Stamp audit bookkeeping fields into a JSON document
    Stamp(commands::stamp::StampArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init(Profile::Development);
    } else if cli.json_logs {
        init(Profile::Production);
    }

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Index(args) => commands::index::execute(args, &config),
            Commands::Diff(args) => commands::diff::execute(args, &config),
            Commands::Redact(args) => commands::redact::execute(args),
            Commands::Stamp(args) => commands::stamp::execute(args, &config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
